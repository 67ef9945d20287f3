//! [`StatusEvent`]-related endpoints.

use axum::{extract::Query, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{AsError, Context, Error};

/// Recorded status change of an application, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    /// ID of this [`StatusEvent`].
    pub id: Uuid,

    /// ID of the application whose status changed.
    pub application_id: Uuid,

    /// Label of the status moved to.
    pub status: &'static str,

    /// Remarks given along the change.
    pub remarks: String,

    /// Who made the change.
    pub updated_by: String,

    /// Date of the change, as `YYYY-MM-DD`.
    pub updated_at: String,
}

impl From<domain::StatusEvent> for StatusEvent {
    fn from(e: domain::StatusEvent) -> Self {
        Self {
            id: e.id.into(),
            application_id: e.application_id.into(),
            status: e.status.label(),
            remarks: e.remarks.to_string(),
            updated_by: e.updated_by.to_string(),
            updated_at: e.updated_at.to_string(),
        }
    }
}

/// Query parameters of [`list()`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// ID of the application to list the history of.
    pub application_id: Option<Uuid>,
}

/// Lists the status history of an application, the oldest first.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - `applicationId` is missing or malformed.
#[tracing::instrument(skip_all, fields(application.id = ?params.application_id))]
pub async fn list(
    ctx: Context,
    WithRejection(Query(params), _): WithRejection<Query<Params>, Error>,
) -> Result<Json<Vec<StatusEvent>>, Error> {
    let id = params
        .application_id
        .ok_or_else(|| Error::invalid_input(&"applicationId is required"))?;

    let history = ctx
        .service()
        .execute(query::status_history::ByApplication::by(id.into()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(history.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::api::{
        application::spec::file_application,
        test_util::{api, call, login},
    };

    #[tokio::test]
    async fn lists_transitions_in_order() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let id = app["id"].as_str().unwrap();

        for status in ["Under Initial Screening", "For Examination", "Rejected"]
        {
            let (code, json) = call(
                &api,
                http::Method::PATCH,
                &format!("/applications/{id}/status"),
                Some(&token),
                Some(json!({"status": status})),
            )
            .await;
            assert_eq!(code, http::StatusCode::OK, "{json}");
        }

        let (status, json) = call(
            &api,
            http::Method::GET,
            &format!("/status-history?applicationId={id}"),
            None,
            None,
        )
        .await;

        assert_eq!(status, http::StatusCode::OK);
        let statuses = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["status"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            statuses,
            ["Under Initial Screening", "For Examination", "Rejected"],
        );
    }

    #[tokio::test]
    async fn requires_application_id() {
        let api = api().await;

        let (status, json) =
            call(&api, http::Method::GET, "/status-history", None, None).await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "applicationId is required");
    }

    #[tokio::test]
    async fn is_emptied_with_deleted_application() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let id = app["id"].as_str().unwrap();
        _ = call(
            &api,
            http::Method::PATCH,
            &format!("/applications/{id}/status"),
            Some(&token),
            Some(json!({"status": "Hired"})),
        )
        .await;

        let (status, _) = call(
            &api,
            http::Method::DELETE,
            &format!("/applications/{id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, http::StatusCode::NO_CONTENT);

        let (_, json) = call(
            &api,
            http::Method::GET,
            &format!("/status-history?applicationId={id}"),
            None,
            None,
        )
        .await;
        assert!(json.as_array().unwrap().is_empty());
    }
}
