//! [`Applicant`]-related endpoints.

use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain, query, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, PathId, Payload},
    define_error, AsError, Context, Error, Session,
};

/// Job applicant, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// ID of this [`Applicant`].
    pub id: Uuid,

    /// Full name of this [`Applicant`].
    pub full_name: String,

    /// Phone number of this [`Applicant`].
    pub contact_number: String,

    /// Email of this [`Applicant`].
    pub email: String,

    /// Postal address of this [`Applicant`].
    pub address: String,

    /// Educational background of this [`Applicant`].
    pub educational_background: String,

    /// Work experience of this [`Applicant`].
    pub work_experience: String,
}

impl From<domain::Applicant> for Applicant {
    fn from(a: domain::Applicant) -> Self {
        Self {
            id: a.id.into(),
            full_name: a.full_name.to_string(),
            contact_number: a.contact_number.to_string(),
            email: a.email.to_string(),
            address: a.address.to_string(),
            educational_background: a.educational_background.to_string(),
            work_experience: a.work_experience.to_string(),
        }
    }
}

/// Request body for registering a new [`Applicant`] or replacing the details
/// of an existing one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    /// Full name.
    pub full_name: String,

    /// Phone number.
    pub contact_number: String,

    /// Email.
    pub email: String,

    /// Postal address.
    pub address: String,

    /// Educational background.
    pub educational_background: String,

    /// Work experience.
    pub work_experience: String,
}

/// Lists all the [`Applicant`]s ordered by their full names.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Applicant>>, Error> {
    let applicants = ctx
        .service()
        .execute(query::applicant::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(applicants.into_iter().map(Into::into).collect()))
}

/// Returns a single [`Applicant`].
///
/// # Errors
///
/// Possible error codes:
/// - `APPLICANT_NOT_FOUND` - [`Applicant`] doesn't exist.
#[tracing::instrument(skip_all, fields(applicant.id = %id))]
pub async fn get(
    ctx: Context,
    WithRejection(Path(id), _): PathId,
) -> Result<Json<Applicant>, Error> {
    ctx.service()
        .execute(query::applicant::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|a| Json(a.into()))
        .ok_or_else(|| ApplicantError::NotExists.into())
}

/// Registers a new [`Applicant`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is missing or invalid.
#[tracing::instrument(skip_all, fields(user.id = %session.user.id))]
pub async fn create(
    ctx: Context,
    session: Session,
    WithRejection(Json(body), _): Payload<ApplicantDetails>,
) -> Result<(http::StatusCode, Json<Applicant>), Error> {
    let cmd = command::CreateApplicant {
        full_name: api::parse("fullName", &body.full_name)?,
        contact_number: api::parse("contactNumber", &body.contact_number)?,
        email: api::parse("email", &body.email)?,
        address: api::parse("address", &body.address)?,
        educational_background: api::parse(
            "educationalBackground",
            &body.educational_background,
        )?,
        work_experience: api::parse(
            "workExperience",
            &body.work_experience,
        )?,
    };

    let applicant = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok((http::StatusCode::CREATED, Json(applicant.into())))
}

/// Replaces the details of an [`Applicant`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - any of the fields is missing or invalid.
/// - `APPLICANT_NOT_FOUND` - [`Applicant`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(applicant.id = %id, user.id = %session.user.id),
)]
pub async fn update(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
    WithRejection(Json(body), _): Payload<ApplicantDetails>,
) -> Result<Json<Applicant>, Error> {
    let cmd = command::UpdateApplicant {
        id: id.into(),
        full_name: api::parse("fullName", &body.full_name)?,
        contact_number: api::parse("contactNumber", &body.contact_number)?,
        email: api::parse("email", &body.email)?,
        address: api::parse("address", &body.address)?,
        educational_background: api::parse(
            "educationalBackground",
            &body.educational_background,
        )?,
        work_experience: api::parse(
            "workExperience",
            &body.work_experience,
        )?,
    };

    let applicant = ctx
        .service()
        .execute(cmd)
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(applicant.into()))
}

/// Deletes an [`Applicant`] along with all their applications.
///
/// # Errors
///
/// Possible error codes:
/// - `APPLICANT_NOT_FOUND` - [`Applicant`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(applicant.id = %id, user.id = %session.user.id),
)]
pub async fn delete(
    ctx: Context,
    session: Session,
    WithRejection(Path(id), _): PathId,
) -> Result<http::StatusCode, Error> {
    ctx.service()
        .execute(command::DeleteApplicant { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(http::StatusCode::NO_CONTENT)
}

impl AsError for command::update_applicant::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicantNotExists(_) => {
                Some(ApplicantError::NotExists.into())
            }
        }
    }
}

impl AsError for command::delete_applicant::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ApplicantNotExists(_) => {
                Some(ApplicantError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum ApplicantError {
        #[code = "APPLICANT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Applicant not found"]
        NotExists,
    }
}
