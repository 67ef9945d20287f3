//! [`Evaluation`]-related endpoints.

use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, evaluation},
    query, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, application::ApplicationError, PathId, Payload},
    define_error, AsError, Context, Error, Session,
};

/// Scoring of an application, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// ID of this [`Evaluation`].
    pub id: Uuid,

    /// ID of the evaluated application.
    pub application_id: Uuid,

    /// Exam score.
    pub exam_score: f64,

    /// Interview score.
    pub interview_score: f64,

    /// Mean of the exam and interview scores.
    pub total_score: f64,

    /// Remarks of the evaluator.
    pub remarks: String,

    /// Who evaluated.
    pub evaluated_by: String,

    /// Date of the evaluation, as `YYYY-MM-DD`.
    pub evaluated_at: String,
}

impl From<domain::Evaluation> for Evaluation {
    fn from(e: domain::Evaluation) -> Self {
        Self {
            id: e.id.into(),
            application_id: e.application_id.into(),
            exam_score: e.exam_score.into(),
            interview_score: e.interview_score.into(),
            total_score: e.total_score.into(),
            remarks: e.remarks.to_string(),
            evaluated_by: e.evaluated_by.to_string(),
            evaluated_at: e.evaluated_at.to_string(),
        }
    }
}

/// Request body for evaluating an application.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvaluation {
    /// ID of the application to evaluate.
    pub application_id: Uuid,

    /// Exam score.
    pub exam_score: Option<f64>,

    /// Interview score.
    pub interview_score: Option<f64>,

    /// Remarks.
    pub remarks: Option<String>,
}

/// Request body for rescoring an [`Evaluation`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rescore {
    /// New exam score.
    pub exam_score: Option<f64>,

    /// New interview score.
    pub interview_score: Option<f64>,

    /// New remarks.
    pub remarks: Option<String>,
}

/// Lists all the [`Evaluation`]s.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Evaluation>>, Error> {
    let evaluations = ctx
        .service()
        .execute(query::evaluation::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(evaluations.into_iter().map(Into::into).collect()))
}

/// Evaluates an application on behalf of the authenticated user.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the scores is missing;
/// - `APPLICATION_NOT_FOUND` - evaluated application doesn't exist;
/// - `EVALUATION_EXISTS` - application has been evaluated already.
#[tracing::instrument(
    skip_all,
    fields(application.id = %body.application_id, user.id = %session.user.id),
)]
pub async fn create(
    ctx: Context,
    session: Session,
    WithRejection(Json(body), _): Payload<NewEvaluation>,
) -> Result<(http::StatusCode, Json<Evaluation>), Error> {
    let (exam_score, interview_score) =
        scores(body.exam_score, body.interview_score)?;

    let evaluation = ctx
        .service()
        .execute(command::CreateEvaluation {
            application_id: body.application_id.into(),
            exam_score,
            interview_score,
            remarks: api::parse_opt("remarks", body.remarks.as_deref())?,
            evaluator: session.actor(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((http::StatusCode::CREATED, Json(evaluation.into())))
}

/// Replaces the scores and remarks of an [`Evaluation`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the scores is missing;
/// - `EVALUATION_NOT_FOUND` - [`Evaluation`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(evaluation.id = %id, user.id = %session.user.id),
)]
pub async fn update(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(body), _): Payload<Rescore>,
) -> Result<Json<Evaluation>, Error> {
    let (exam_score, interview_score) =
        scores(body.exam_score, body.interview_score)?;

    let evaluation = ctx
        .service()
        .execute(command::UpdateEvaluation {
            id: id.into(),
            exam_score,
            interview_score,
            remarks: api::parse_opt("remarks", body.remarks.as_deref())?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(evaluation.into()))
}

/// Deletes an [`Evaluation`].
///
/// # Errors
///
/// Possible error codes:
/// - `EVALUATION_NOT_FOUND` - [`Evaluation`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(evaluation.id = %id, user.id = %session.user.id),
)]
pub async fn delete(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
) -> Result<http::StatusCode, Error> {
    ctx.service()
        .execute(command::DeleteEvaluation { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(http::StatusCode::NO_CONTENT)
}

/// Validates both sub-scores being provided.
fn scores(
    exam: Option<f64>,
    interview: Option<f64>,
) -> Result<(evaluation::Score, evaluation::Score), Error> {
    let (Some(exam), Some(interview)) = (exam, interview) else {
        return Err(Error::invalid_input(
            &"examScore and interviewScore are required",
        ));
    };
    let exam = evaluation::Score::new(exam)
        .ok_or_else(|| Error::invalid_input(&"Invalid `examScore`"))?;
    let interview = evaluation::Score::new(interview)
        .ok_or_else(|| Error::invalid_input(&"Invalid `interviewScore`"))?;

    Ok((exam, interview))
}

impl AsError for command::create_evaluation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicationNotExists(_) => {
                Some(ApplicationError::NotExists.into())
            }
            Self::EvaluationExists(_) => {
                Some(EvaluationError::AlreadyExists.into())
            }
        }
    }
}

impl AsError for command::update_evaluation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EvaluationNotExists(_) => {
                Some(EvaluationError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_evaluation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EvaluationNotExists(_) => {
                Some(EvaluationError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum EvaluationError {
        #[code = "EVALUATION_EXISTS"]
        #[status = CONFLICT]
        #[message = "Application has been evaluated already"]
        AlreadyExists,

        #[code = "EVALUATION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Evaluation not found"]
        NotExists,
    }
}

#[cfg(test)]
mod spec {
    use axum::Router;
    use serde_json::{json, Value};

    use crate::api::{
        application::spec::file_application,
        test_util::{api, call, login},
    };

    async fn evaluate(
        api: &Router,
        token: &str,
        application: &Value,
        exam: f64,
        interview: f64,
    ) -> (http::StatusCode, Value) {
        call(
            api,
            http::Method::POST,
            "/evaluations",
            Some(token),
            Some(json!({
                "applicationId": application["id"],
                "examScore": exam,
                "interviewScore": interview,
                "remarks": "Evaluated",
            })),
        )
        .await
    }

    #[tokio::test]
    async fn averages_sub_scores() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;

        let (status, json) = evaluate(&api, &token, &app, 85.0, 0.0).await;

        assert_eq!(status, http::StatusCode::CREATED, "{json}");
        assert_eq!(json["totalScore"], 42.5);
        assert_eq!(json["evaluatedBy"], "Maria Santos");
        assert_eq!(json["applicationId"], app["id"]);
    }

    #[tokio::test]
    async fn allows_single_evaluation_per_application() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        _ = evaluate(&api, &token, &app, 80.0, 90.0).await;

        let (status, json) = evaluate(&api, &token, &app, 70.0, 70.0).await;

        assert_eq!(status, http::StatusCode::CONFLICT);
        assert_eq!(json["code"], "EVALUATION_EXISTS");
    }

    #[tokio::test]
    async fn reports_missing_application() {
        let api = api().await;
        let token = login(&api).await;
        let app = json!({"id": uuid::Uuid::new_v4()});

        let (status, json) = evaluate(&api, &token, &app, 80.0, 90.0).await;

        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "APPLICATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn requires_both_scores() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;

        let (status, _) = call(
            &api,
            http::Method::POST,
            "/evaluations",
            Some(&token),
            Some(json!({"applicationId": app["id"], "examScore": 90})),
        )
        .await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rescores_and_deletes() {
        let api = api().await;
        let token = login(&api).await;
        let app = file_application(&api, &token, "Ana Lim", None).await;
        let (_, created) = evaluate(&api, &token, &app, 80.0, 90.0).await;
        let uri = format!("/evaluations/{}", created["id"].as_str().unwrap());

        let (status, json) = call(
            &api,
            http::Method::PUT,
            &uri,
            Some(&token),
            Some(json!({"examScore": 60, "interviewScore": 70})),
        )
        .await;
        assert_eq!(status, http::StatusCode::OK, "{json}");
        assert_eq!(json["totalScore"], 65.0);
        assert_eq!(json["remarks"], "");
        assert_eq!(json["evaluatedAt"], created["evaluatedAt"]);

        let (status, _) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NO_CONTENT);

        let (status, json) =
            call(&api, http::Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, http::StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "EVALUATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn ranks_vacancy_applicants_by_total_score() {
        let api = api().await;
        let token = login(&api).await;
        let first = file_application(&api, &token, "Ana Lim", None).await;
        let vacancy = first["vacancyId"].as_str().unwrap().to_owned();
        let second =
            file_application(&api, &token, "Pedro Reyes", Some(&vacancy)).await;
        let third =
            file_application(&api, &token, "Jose Cruz", Some(&vacancy)).await;
        _ = evaluate(&api, &token, &first, 70.0, 80.0).await;
        _ = evaluate(&api, &token, &second, 90.0, 95.0).await;

        let (status, json) = call(
            &api,
            http::Method::GET,
            &format!("/jobs/{vacancy}/ranking"),
            None,
            None,
        )
        .await;

        assert_eq!(status, http::StatusCode::OK);
        let ranking = json.as_array().unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0]["applicantName"], "Pedro Reyes");
        assert_eq!(ranking[0]["totalScore"], 92.5);
        assert_eq!(ranking[1]["applicantName"], "Ana Lim");
        assert!(ranking.iter().all(|e| e["applicationId"] != third["id"]));
    }
}
