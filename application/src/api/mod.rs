//! REST API definitions.

pub mod applicant;
pub mod application;
pub mod auth;
pub mod department;
pub mod evaluation;
pub mod report;
pub mod status_history;
pub mod vacancy;

use std::str::FromStr;

use axum::{
    extract::Path,
    routing::{get, patch, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::Error;

/// JSON request body, rejected as an [`Error`] when malformed.
pub type Payload<T> = WithRejection<Json<T>, Error>;

/// ID in a request path, rejected as an [`Error`] when malformed.
pub type PathId = WithRejection<Path<Uuid>, Error>;

/// Builds the [`Router`] of the whole REST API.
///
/// Handlers expect the [`Service`] to be provided as an [`Extension`].
///
/// [`Extension`]: axum::Extension
/// [`Service`]: crate::Service
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/departments", get(department::list))
        .route("/jobs", get(vacancy::list).post(vacancy::create))
        .route(
            "/jobs/:id",
            get(vacancy::get).put(vacancy::update).delete(vacancy::delete),
        )
        .route("/jobs/:id/ranking", get(vacancy::ranking))
        .route("/applicants", get(applicant::list).post(applicant::create))
        .route(
            "/applicants/:id",
            get(applicant::get)
                .put(applicant::update)
                .delete(applicant::delete),
        )
        .route(
            "/applications",
            get(application::list).post(application::create),
        )
        .route(
            "/applications/:id",
            get(application::get)
                .put(application::update)
                .delete(application::delete),
        )
        .route(
            "/applications/:id/status",
            patch(application::transition_status),
        )
        .route("/status-history", get(status_history::list))
        .route("/evaluations", get(evaluation::list).post(evaluation::create))
        .route(
            "/evaluations/:id",
            put(evaluation::update).delete(evaluation::delete),
        )
        .route("/reports/summary", get(report::summary))
}

/// Liveness of the API.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Health {
    /// Always `true` when the API responds.
    pub ok: bool,
}

/// Reports the API being alive.
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

/// Parses the named request `field`, rejecting an invalid `value`.
///
/// # Errors
///
/// If the `value` doesn't represent a valid `T`.
pub fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| Error::invalid_input(&format!("Invalid `{field}`")))
}

/// Parses the named optional request `field`.
///
/// # Errors
///
/// If the `value` is present, but doesn't represent a valid `T`.
pub fn parse_opt<T: FromStr>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, Error> {
    value.map(|v| parse(field, v)).transpose()
}

/// Deserializes a nullable field, telling an explicit `null` (`Some(None)`)
/// apart from an omitted field ([`None`], given `#[serde(default)]`).
///
/// # Errors
///
/// If the value is neither `null` nor a valid `T`.
pub fn nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
