//! [`Vacancy`]-related endpoints, served under `/jobs`.

use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, vacancy},
    query, read, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, department::DepartmentError, PathId, Payload},
    define_error, AsError, Context, Error, Session,
};

/// Job vacancy, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    /// ID of this [`Vacancy`].
    pub id: Uuid,

    /// Title of the offered position.
    pub position_title: String,

    /// ID of the department offering this [`Vacancy`].
    pub department_id: Uuid,

    /// Salary grade of the offered position.
    pub salary_grade: i16,

    /// Qualifications required from applicants.
    pub qualifications: String,

    /// Date this [`Vacancy`] was posted on, as `YYYY-MM-DD`.
    pub posting_date: String,

    /// Date this [`Vacancy`] closes on, as `YYYY-MM-DD`.
    pub closing_date: String,

    /// Status of this [`Vacancy`]: `Open`, `Closed` or `Filled`.
    pub status: &'static str,
}

impl From<domain::Vacancy> for Vacancy {
    fn from(v: domain::Vacancy) -> Self {
        Self {
            id: v.id.into(),
            position_title: v.position_title.to_string(),
            department_id: v.department_id.into(),
            salary_grade: v.salary_grade.into(),
            qualifications: v.qualifications.to_string(),
            posting_date: v.posting_date.to_string(),
            closing_date: v.closing_date.to_string(),
            status: v.status.label(),
        }
    }
}

/// Request body for creating a new [`Vacancy`] or replacing the details of
/// an existing one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyDetails {
    /// Title of the offered position.
    pub position_title: String,

    /// ID of the department offering the [`Vacancy`].
    pub department_id: Uuid,

    /// Salary grade of the offered position.
    pub salary_grade: i64,

    /// Qualifications required from applicants.
    pub qualifications: String,

    /// Posting date.
    ///
    /// If omitted, today for a new [`Vacancy`], and kept as it is for an
    /// existing one.
    pub posting_date: Option<String>,

    /// Closing date.
    pub closing_date: String,

    /// Status.
    ///
    /// If omitted, `Open` for a new [`Vacancy`], and kept as it is for an
    /// existing one.
    pub status: Option<String>,
}

/// Single entry of a [`vacancy`] ranking.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// ID of the ranked application.
    pub application_id: Uuid,

    /// ID of the evaluation the rank is based on.
    pub evaluation_id: Uuid,

    /// Full name of the ranked applicant.
    pub applicant_name: String,

    /// Exam score of the applicant.
    pub exam_score: f64,

    /// Interview score of the applicant.
    pub interview_score: f64,

    /// Total score of the applicant.
    pub total_score: f64,

    /// Remarks of the evaluator.
    pub remarks: String,

    /// Date of the evaluation, as `YYYY-MM-DD`.
    pub evaluated_at: String,
}

impl From<read::ranking::Entry> for RankingEntry {
    fn from(e: read::ranking::Entry) -> Self {
        Self {
            application_id: e.application_id.into(),
            evaluation_id: e.evaluation_id.into(),
            applicant_name: e.applicant_name.to_string(),
            exam_score: e.exam_score.into(),
            interview_score: e.interview_score.into(),
            total_score: e.total_score.into(),
            remarks: e.remarks.to_string(),
            evaluated_at: e.evaluated_at.to_string(),
        }
    }
}

/// Lists all the [`Vacancy`]s, the most recently posted first.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Vacancy>>, Error> {
    let vacancies = ctx
        .service()
        .execute(query::vacancy::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(vacancies.into_iter().map(Into::into).collect()))
}

/// Returns a single [`Vacancy`].
///
/// # Errors
///
/// Possible error codes:
/// - `VACANCY_NOT_FOUND` - [`Vacancy`] doesn't exist.
#[tracing::instrument(skip_all, fields(vacancy.id = %id))]
pub async fn get(
    ctx: Context,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Vacancy>, Error> {
    ctx.service()
        .execute(query::vacancy::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|v| Json(v.into()))
        .ok_or_else(|| VacancyError::NotExists.into())
}

/// Creates a new [`Vacancy`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is missing or invalid.
/// - `DEPARTMENT_NOT_FOUND` - referenced department doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(
        position_title = %body.position_title,
        user.id = %session.user.id,
    ),
)]
pub async fn create(
    ctx: Context,
    session: Session,
    WithRejection(Json(body), _): Payload<VacancyDetails>,
) -> Result<(http::StatusCode, Json<Vacancy>), Error> {
    let cmd = command::CreateVacancy {
        position_title: api::parse("positionTitle", &body.position_title)?,
        department_id: body.department_id.into(),
        salary_grade: vacancy::SalaryGrade::new(body.salary_grade)
            .ok_or_else(|| Error::invalid_input(&"Invalid `salaryGrade`"))?,
        qualifications: api::parse("qualifications", &body.qualifications)?,
        posting_date: api::parse_opt(
            "postingDate",
            body.posting_date.as_deref(),
        )?,
        closing_date: api::parse("closingDate", &body.closing_date)?,
        status: api::parse_opt("status", body.status.as_deref())?,
    };

    let vacancy = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok((http::StatusCode::CREATED, Json(vacancy.into())))
}

/// Replaces the details of a [`Vacancy`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is missing or invalid.
/// - `VACANCY_NOT_FOUND` - [`Vacancy`] doesn't exist.
/// - `DEPARTMENT_NOT_FOUND` - referenced department doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(vacancy.id = %id, user.id = %session.user.id),
)]
pub async fn update(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(body), _): Payload<VacancyDetails>,
) -> Result<Json<Vacancy>, Error> {
    let cmd = command::UpdateVacancy {
        id: id.into(),
        position_title: api::parse("positionTitle", &body.position_title)?,
        department_id: body.department_id.into(),
        salary_grade: vacancy::SalaryGrade::new(body.salary_grade)
            .ok_or_else(|| Error::invalid_input(&"Invalid `salaryGrade`"))?,
        qualifications: api::parse("qualifications", &body.qualifications)?,
        posting_date: api::parse_opt(
            "postingDate",
            body.posting_date.as_deref(),
        )?,
        closing_date: api::parse("closingDate", &body.closing_date)?,
        status: api::parse_opt("status", body.status.as_deref())?,
    };

    let vacancy = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(vacancy.into()))
}

/// Deletes a [`Vacancy`] along with all the applications filed to it.
///
/// # Errors
///
/// Possible error codes:
/// - `VACANCY_NOT_FOUND` - [`Vacancy`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(vacancy.id = %id, user.id = %session.user.id),
)]
pub async fn delete(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
) -> Result<http::StatusCode, Error> {
    ctx.service()
        .execute(command::DeleteVacancy { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(http::StatusCode::NO_CONTENT)
}

/// Ranks the evaluated applications of a [`Vacancy`] by their total score.
///
/// # Errors
///
/// Possible error codes:
/// - `VACANCY_NOT_FOUND` - [`Vacancy`] doesn't exist.
#[tracing::instrument(skip_all, fields(vacancy.id = %id))]
pub async fn ranking(
    ctx: Context,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Vec<RankingEntry>>, Error> {
    let ranking = ctx
        .service()
        .execute(query::ranking::ForVacancy {
            vacancy_id: id.into(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ranking.into_iter().map(Into::into).collect()))
}

impl AsError for command::create_vacancy::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DepartmentNotExists(_) => {
                Some(DepartmentError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_vacancy::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DepartmentNotExists(_) => {
                Some(DepartmentError::NotExists.into())
            }
            Self::VacancyNotExists(_) => Some(VacancyError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_vacancy::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VacancyNotExists(_) => Some(VacancyError::NotExists.into()),
        }
    }
}

impl AsError for query::ranking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VacancyNotExists(_) => Some(VacancyError::NotExists.into()),
        }
    }
}

define_error! {
    enum VacancyError {
        #[code = "VACANCY_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Job not found"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use axum::Router;
    use serde_json::{json, Value};

    use crate::api::{
        application::spec::file_application,
        test_util::{api, call, login, DEPARTMENT_ID},
    };

    /// Posts a new vacancy, returning its JSON.
    async fn post_vacancy(api: &Router, token: &str) -> Value {
        let (status, json) = call(
            api,
            http::Method::POST,
            "/jobs",
            Some(token),
            Some(json!({
                "positionTitle": "Instructor I",
                "departmentId": DEPARTMENT_ID,
                "salaryGrade": 12,
                "qualifications": "Master's degree",
                "postingDate": "2026-01-05",
                "closingDate": "2026-02-05",
            })),
        )
        .await;
        assert_eq!(status, http::StatusCode::CREATED, "{json}");
        json
    }

    #[tokio::test]
    async fn creates_and_lists_vacancies() {
        let api = api().await;
        let token = login(&api).await;

        let (status, created) = call(
            &api,
            http::Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({
                "positionTitle": "Instructor I",
                "departmentId": DEPARTMENT_ID,
                "salaryGrade": 12,
                "qualifications": "Master's degree",
                "postingDate": "2026-01-05",
                "closingDate": "2026-02-05",
            })),
        )
        .await;
        assert_eq!(status, http::StatusCode::CREATED, "{created}");
        assert_eq!(created["status"], "Open");
        assert_eq!(created["postingDate"], "2026-01-05");
        assert_eq!(created["departmentId"], DEPARTMENT_ID);

        let (status, list) =
            call(&api, http::Method::GET, "/jobs", None, None).await;
        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let uri = format!("/jobs/{}", created["id"].as_str().unwrap());
        let (status, found) =
            call(&api, http::Method::GET, &uri, None, None).await;
        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn requires_authorization_to_create() {
        let api = api().await;

        let (status, _) = call(
            &api,
            http::Method::POST,
            "/jobs",
            None,
            Some(json!({})),
        )
        .await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn rejects_unknown_status() {
        let api = api().await;
        let token = login(&api).await;

        let (status, json) = call(
            &api,
            http::Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({
                "positionTitle": "Instructor I",
                "departmentId": DEPARTMENT_ID,
                "salaryGrade": 12,
                "qualifications": "Master's degree",
                "closingDate": "2026-02-05",
                "status": "Paused",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid `status`");
    }

    #[tokio::test]
    async fn reports_missing_vacancy() {
        let api = api().await;
        let uri = format!("/jobs/{}/ranking", uuid::Uuid::new_v4());

        let (status, json) =
            call(&api, http::Method::GET, &uri, None, None).await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "VACANCY_NOT_FOUND");
    }

    #[tokio::test]
    async fn rejects_unknown_department() {
        let api = api().await;
        let token = login(&api).await;

        let (status, json) = call(
            &api,
            http::Method::POST,
            "/jobs",
            Some(&token),
            Some(json!({
                "positionTitle": "Instructor I",
                "departmentId": uuid::Uuid::new_v4(),
                "salaryGrade": 12,
                "qualifications": "Master's degree",
                "closingDate": "2026-02-05",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "DEPARTMENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn replaces_vacancy_details() {
        let api = api().await;
        let token = login(&api).await;
        let created = post_vacancy(&api, &token).await;
        let uri = format!("/jobs/{}", created["id"].as_str().unwrap());

        let (status, json) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "positionTitle": "Instructor II",
                "departmentId": DEPARTMENT_ID,
                "salaryGrade": 14,
                "qualifications": "Doctorate degree",
                "closingDate": "2026-03-01",
                "status": "Closed",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::OK, "{json}");
        assert_eq!(json["positionTitle"], "Instructor II");
        assert_eq!(json["salaryGrade"], 14);
        assert_eq!(json["status"], "Closed");
        assert_eq!(json["postingDate"], "2026-01-05");
        let (_, found) = call(&api, http::Method::GET, &uri, None, None).await;
        assert_eq!(found, json);
    }

    #[tokio::test]
    async fn reports_missing_vacancy_on_update() {
        let api = api().await;
        let token = login(&api).await;
        let uri = format!("/jobs/{}", uuid::Uuid::new_v4());

        let (status, json) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({
                "positionTitle": "Instructor II",
                "departmentId": DEPARTMENT_ID,
                "salaryGrade": 14,
                "qualifications": "Doctorate degree",
                "closingDate": "2026-03-01",
            })),
        )
        .await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "VACANCY_NOT_FOUND");
    }

    #[tokio::test]
    async fn deletes_vacancy_with_its_applications() {
        let api = api().await;
        let token = login(&api).await;
        let created = post_vacancy(&api, &token).await;
        let vacancy_id = created["id"].as_str().unwrap();
        let app =
            file_application(&api, &token, "Ana Lim", Some(vacancy_id)).await;
        let uri = format!("/jobs/{vacancy_id}");

        let (status, _) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NO_CONTENT);

        let (status, _) = call(&api, http::Method::GET, &uri, None, None).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);
        let (status, _) = call(
            &api,
            http::Method::GET,
            &format!("/applications/{}", app["id"].as_str().unwrap()),
            None,
            None,
        )
        .await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);

        let (status, json) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "VACANCY_NOT_FOUND");
    }

    #[tokio::test]
    async fn requires_authorization_to_delete() {
        let api = api().await;
        let token = login(&api).await;
        let created = post_vacancy(&api, &token).await;
        let uri = format!("/jobs/{}", created["id"].as_str().unwrap());

        let (status, _) =
            call(&api, http::Method::DELETE, &uri, None, None).await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    }
}
