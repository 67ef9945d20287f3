//! [`Application`]-related endpoints.

use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, status_history::StatusEvent, PathId, Payload},
    define_error, AsError, Context, Error, Session,
};

/// Application of an applicant to a vacancy, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// ID of this [`Application`].
    pub id: Uuid,

    /// ID of the applicant.
    pub applicant_id: Uuid,

    /// ID of the vacancy applied for.
    pub vacancy_id: Uuid,

    /// Current status label of this [`Application`].
    pub status: &'static str,

    /// Date this [`Application`] was filed on, as `YYYY-MM-DD`.
    pub date_applied: String,

    /// Remarks on this [`Application`], if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl From<domain::Application> for Application {
    fn from(a: domain::Application) -> Self {
        Self {
            id: a.id.into(),
            applicant_id: a.applicant_id.into(),
            vacancy_id: a.vacancy_id.into(),
            status: a.status.label(),
            date_applied: a.date_applied.to_string(),
            remarks: a.remarks.map(|r| r.to_string()),
        }
    }
}

/// Request body for filing a new [`Application`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    /// ID of the applicant.
    pub applicant_id: Uuid,

    /// ID of the vacancy applied for.
    pub vacancy_id: Uuid,

    /// Initial status label, `Application Received` if omitted.
    pub status: Option<String>,

    /// Filing date, today if omitted.
    pub date_applied: Option<String>,

    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for updating an [`Application`].
///
/// Omitted fields are left as they are. Status is changed only through
/// [`transition_status()`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationChanges {
    /// ID of the new applicant.
    pub applicant_id: Option<Uuid>,

    /// ID of the new vacancy.
    pub vacancy_id: Option<Uuid>,

    /// New filing date.
    pub date_applied: Option<String>,

    /// New remarks, cleared by an explicit `null`.
    #[serde(default, deserialize_with = "api::nullable")]
    pub remarks: Option<Option<String>>,
}

/// Request body for moving an [`Application`] to another status.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    /// Label of the status to move to.
    pub status: Option<String>,

    /// Remarks replacing the current ones.
    pub remarks: Option<String>,
}

/// Result of a status transition.
#[derive(Debug, Serialize)]
pub struct Transition {
    /// [`Application`] after the transition.
    pub application: Application,

    /// [`StatusEvent`] recording the transition.
    pub history: StatusEvent,
}

/// Lists all the [`Application`]s, the most recently filed first.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Application>>, Error> {
    let applications = ctx
        .service()
        .execute(query::application::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(applications.into_iter().map(Into::into).collect()))
}

/// Returns a single [`Application`].
///
/// # Errors
///
/// Possible error codes:
/// - `APPLICATION_NOT_FOUND` - [`Application`] doesn't exist.
#[tracing::instrument(skip_all, fields(application.id = %id))]
pub async fn get(
    ctx: Context,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Application>, Error> {
    ctx.service()
        .execute(query::application::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|a| Json(a.into()))
        .ok_or_else(|| ApplicationError::NotExists.into())
}

/// Files a new [`Application`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is missing or invalid;
/// - `APPLICANT_NOT_FOUND` - referenced applicant doesn't exist;
/// - `VACANCY_NOT_FOUND` - referenced vacancy doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(
        applicant.id = %body.applicant_id,
        user.id = %session.user.id,
        vacancy.id = %body.vacancy_id,
    ),
)]
pub async fn create(
    ctx: Context,
    session: Session,
    WithRejection(Json(body), _): Payload<NewApplication>,
) -> Result<(http::StatusCode, Json<Application>), Error> {
    let cmd = command::CreateApplication {
        applicant_id: body.applicant_id.into(),
        vacancy_id: body.vacancy_id.into(),
        status: api::parse_opt("status", body.status.as_deref())?,
        date_applied: api::parse_opt(
            "dateApplied",
            body.date_applied.as_deref(),
        )?,
        remarks: api::parse_opt("remarks", body.remarks.as_deref())?,
    };

    let application = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok((http::StatusCode::CREATED, Json(application.into())))
}

/// Updates the non-status fields of an [`Application`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is invalid;
/// - `APPLICATION_NOT_FOUND` - [`Application`] doesn't exist;
/// - `APPLICANT_NOT_FOUND` - referenced applicant doesn't exist;
/// - `VACANCY_NOT_FOUND` - referenced vacancy doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(application.id = %id, user.id = %session.user.id),
)]
pub async fn update(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(body), _): Payload<ApplicationChanges>,
) -> Result<Json<Application>, Error> {
    let cmd = command::UpdateApplication {
        id: id.into(),
        applicant_id: body.applicant_id.map(Into::into),
        vacancy_id: body.vacancy_id.map(Into::into),
        date_applied: api::parse_opt(
            "dateApplied",
            body.date_applied.as_deref(),
        )?,
        remarks: body
            .remarks
            .map(|r| api::parse_opt("remarks", r.as_deref()))
            .transpose()?,
    };

    let application = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(application.into()))
}

/// Deletes an [`Application`] along with its status history and evaluation.
///
/// # Errors
///
/// Possible error codes:
/// - `APPLICATION_NOT_FOUND` - [`Application`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(application.id = %id, user.id = %session.user.id),
)]
pub async fn delete(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
) -> Result<http::StatusCode, Error> {
    ctx.service()
        .execute(command::DeleteApplication { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(http::StatusCode::NO_CONTENT)
}

/// Moves an [`Application`] to another status on behalf of the
/// authenticated user, recording the change in its status history.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - status is missing or unknown;
/// - `APPLICATION_NOT_FOUND` - [`Application`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(
        application.id = %id,
        status = ?body.status,
        user.id = %session.user.id,
    ),
)]
pub async fn transition_status(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(body), _): Payload<StatusChange>,
) -> Result<Json<Transition>, Error> {
    let status = body
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::invalid_input(&"Status is required"))?;

    let output = ctx
        .service()
        .execute(command::TransitionApplicationStatus {
            application_id: id.into(),
            status: api::parse("status", status)?,
            remarks: api::parse_opt("remarks", body.remarks.as_deref())?,
            actor: session.actor(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Transition {
        application: output.application.into(),
        history: output.event.into(),
    }))
}

impl AsError for command::create_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicantNotExists(_) => {
                Some(ReferenceError::ApplicantNotExists.into())
            }
            Self::VacancyNotExists(_) => {
                Some(ReferenceError::VacancyNotExists.into())
            }
        }
    }
}

impl AsError for command::update_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicationNotExists(_) => {
                Some(ApplicationError::NotExists.into())
            }
            Self::ApplicantNotExists(_) => {
                Some(ReferenceError::ApplicantNotExists.into())
            }
            Self::VacancyNotExists(_) => {
                Some(ReferenceError::VacancyNotExists.into())
            }
        }
    }
}

impl AsError for command::delete_application::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicationNotExists(_) => {
                Some(ApplicationError::NotExists.into())
            }
        }
    }
}

impl AsError for command::transition_application_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicationNotExists(_) => {
                Some(ApplicationError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum ApplicationError {
        #[code = "APPLICATION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Application not found"]
        NotExists,
    }
}

define_error! {
    enum ReferenceError {
        #[code = "APPLICANT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Applicant not found"]
        ApplicantNotExists,

        #[code = "VACANCY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Job not found"]
        VacancyNotExists,
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use axum::Router;
    use serde_json::{json, Value};

    use crate::api::test_util::{api, call, login, DEPARTMENT_ID};

    /// Creates a vacancy and an applicant, then files an application linking
    /// them, returning its JSON.
    pub(crate) async fn file_application(
        api: &Router,
        token: &str,
        applicant: &str,
        vacancy: Option<&str>,
    ) -> Value {
        let vacancy_id = if let Some(id) = vacancy {
            id.to_owned()
        } else {
            let (_, vacancy) = call(
                api,
                http::Method::POST,
                "/jobs",
                Some(token),
                Some(json!({
                    "positionTitle": "Administrative Aide IV",
                    "departmentId": DEPARTMENT_ID,
                    "salaryGrade": 4,
                    "qualifications": "Completion of two years in college",
                    "closingDate": "2026-03-01",
                })),
            )
            .await;
            vacancy["id"].as_str().unwrap().to_owned()
        };
        let (_, applicant) = call(
            api,
            http::Method::POST,
            "/applicants",
            Some(token),
            Some(json!({
                "fullName": applicant,
                "contactNumber": "09171234567",
                "email": "applicant@example.com",
                "address": "Zamboanga City",
                "educationalBackground": "BS Psychology",
                "workExperience": "1 year as a clerk",
            })),
        )
        .await;

        let (status, application) = call(
            api,
            http::Method::POST,
            "/applications",
            Some(token),
            Some(json!({
                "applicantId": applicant["id"],
                "vacancyId": vacancy_id,
                "dateApplied": "2026-01-15",
            })),
        )
        .await;
        assert_eq!(status, http::StatusCode::CREATED, "{application}");
        application
    }

    #[tokio::test]
    async fn files_application_as_received() {
        let api = api().await;
        let token = login(&api).await;

        let app = file_application(&api, &token, "Ana Lim", None).await;

        assert_eq!(app["status"], "Application Received");
        assert_eq!(app["dateApplied"], "2026-01-15");
        assert!(app.get("remarks").is_none());
    }

    #[tokio::test]
    async fn transitions_status_on_behalf_of_user() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let id = app["id"].as_str().unwrap();

        let (status, json) = call(
            &api,
            http::Method::PATCH,
            &format!("/applications/{id}/status"),
            Some(&token),
            Some(json!({
                "status": "For Interview",
                "remarks": "Passed the exam",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::OK, "{json}");
        assert_eq!(json["application"]["status"], "For Interview");
        assert_eq!(json["application"]["remarks"], "Passed the exam");
        assert_eq!(json["history"]["status"], "For Interview");
        assert_eq!(json["history"]["remarks"], "Passed the exam");
        assert_eq!(json["history"]["updatedBy"], "Maria Santos");
        assert_eq!(json["history"]["applicationId"], id);
    }

    #[tokio::test]
    async fn rejects_missing_or_unknown_status() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let uri = format!("/applications/{}/status", app["id"].as_str().unwrap());

        for body in [json!({}), json!({"status": ""}), json!({"status": "Done"})]
        {
            let (status, json) = call(
                &api,
                http::Method::PATCH,
                &uri,
                Some(&token),
                Some(body),
            )
            .await;
            assert_eq!(status, http::StatusCode::BAD_REQUEST, "{json}");
        }

        let (_, json) = call(
            &api,
            http::Method::GET,
            &format!("/status-history?applicationId={}", app["id"].as_str().unwrap()),
            None,
            None,
        )
        .await;
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reports_missing_application_on_transition() {
        let api = api().await;
        let token = login(&api).await;
        let uri = format!("/applications/{}/status", uuid::Uuid::new_v4());

        let (status, json) = call(
            &api,
            http::Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"status": "Hired"})),
        )
        .await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "APPLICATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn updates_without_touching_status() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let id = app["id"].as_str().unwrap();

        let (status, json) = call(
            &api,
            http::Method::PUT,
            &format!("/applications/{id}"),
            Some(&token),
            Some(json!({
                "status": "Hired",
                "dateApplied": "2026-01-16",
                "remarks": "Late submission",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::OK, "{json}");
        assert_eq!(json["status"], "Application Received");
        assert_eq!(json["dateApplied"], "2026-01-16");
        assert_eq!(json["remarks"], "Late submission");
    }

    #[tokio::test]
    async fn clears_remarks_on_explicit_null() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let uri = format!("/applications/{}", app["id"].as_str().unwrap());
        let (status, json) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({"remarks": "Late submission"})),
        )
        .await;
        assert_eq!(status, http::StatusCode::OK, "{json}");

        let (_, kept) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({"dateApplied": "2026-01-20"})),
        )
        .await;
        assert_eq!(kept["remarks"], "Late submission");

        let (status, cleared) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({"remarks": null})),
        )
        .await;
        assert_eq!(status, http::StatusCode::OK, "{cleared}");
        assert!(cleared.get("remarks").is_none());
        assert_eq!(cleared["dateApplied"], "2026-01-20");
    }

    #[tokio::test]
    async fn deletes_application() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let uri = format!("/applications/{}", app["id"].as_str().unwrap());

        let (status, _) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NO_CONTENT);

        let (status, _) = call(&api, http::Method::GET, &uri, None, None).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);

        let (status, _) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_unknown_references() {
        let api = api().await;
        let token = login(&api).await;

        let (status, json) = call(
            &api,
            http::Method::POST,
            "/applications",
            Some(&token),
            Some(json!({
                "applicantId": uuid::Uuid::new_v4(),
                "vacancyId": uuid::Uuid::new_v4(),
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert!(
            json["code"] == "APPLICANT_NOT_FOUND"
                || json["code"] == "VACANCY_NOT_FOUND",
        );
    }
}
