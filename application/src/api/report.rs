//! Reporting endpoints, served under `/reports`.

use axum::Json;
use serde::Serialize;
use service::{query, read, Query as _};

use crate::{AsError, Context, Error};

/// Counts of the hiring pipeline entities, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of all the vacancies.
    pub total_jobs: u64,

    /// Number of all the applicants.
    pub total_applicants: u64,

    /// Number of all the applications.
    pub total_applications: u64,

    /// Number of applications per status.
    pub applications_by_status: Vec<StatusCount>,

    /// Number of vacancies per status.
    pub vacancies_by_status: Vec<StatusCount>,
}

/// Number of entities having the same status.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatusCount {
    /// Status label.
    pub status: &'static str,

    /// Number of entities in the [`StatusCount::status`].
    pub count: u64,
}

impl From<read::Summary> for Summary {
    fn from(s: read::Summary) -> Self {
        Self {
            total_jobs: s.total_jobs,
            total_applicants: s.total_applicants,
            total_applications: s.total_applications,
            applications_by_status: s
                .applications_by_status
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status: status.label(),
                    count,
                })
                .collect(),
            vacancies_by_status: s
                .vacancies_by_status
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status: status.label(),
                    count,
                })
                .collect(),
        }
    }
}

/// Returns the [`Summary`] of the hiring pipeline.
#[tracing::instrument(skip_all)]
pub async fn summary(ctx: Context) -> Result<Json<Summary>, Error> {
    let summary = ctx
        .service()
        .execute(query::summary::Get::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::api::{
        application::spec::file_application,
        test_util::{api, call, login},
    };

    #[tokio::test]
    async fn counts_pipeline() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        _ = file_application(&api, &token, "Pedro Reyes", None).await;
        let (status, json) = call(
            &api,
            http::Method::PATCH,
            &format!("/applications/{}/status", app["id"].as_str().unwrap()),
            Some(&token),
            Some(json!({"status": "Rejected"})),
        )
        .await;
        assert_eq!(status, http::StatusCode::OK, "{json}");

        let (status, json) =
            call(&api, http::Method::GET, "/reports/summary", None, None).await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(json["totalJobs"], 2);
        assert_eq!(json["totalApplicants"], 2);
        assert_eq!(json["totalApplications"], 2);
        assert_eq!(
            json["applicationsByStatus"],
            json!([
                {"status": "Application Received", "count": 1},
                {"status": "Rejected", "count": 1},
            ]),
        );
        assert_eq!(
            json["vacanciesByStatus"],
            json!([{"status": "Open", "count": 2}]),
        );
    }
}
