//! Authentication endpoints.

use axum::Json;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain,
};
use uuid::Uuid;

use crate::{api::Payload, define_error, AsError, Context, Error, Session};

/// Authenticated user, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Uuid,

    /// Full name of this [`User`].
    pub name: String,

    /// Email of this [`User`].
    pub email: String,

    /// Role of this [`User`]: `admin` or `staff`.
    pub role: &'static str,
}

impl From<domain::User> for User {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            name: user.name.into(),
            email: user.email.to_string(),
            role: user.role.label(),
        }
    }
}

/// Credentials to log in with.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Email of the [`User`].
    pub email: Option<String>,

    /// Password of the [`User`].
    pub password: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResult {
    /// Bearer token to authorize further requests with.
    pub token: String,

    /// Logged in [`User`].
    pub user: User,
}

/// Currently authenticated [`User`].
#[derive(Debug, Serialize)]
pub struct Me {
    /// Authenticated [`User`].
    pub user: User,
}

/// Exchanges the provided [`Credentials`] for a bearer token.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_INPUT` - email or password is missing;
/// - `WRONG_CREDENTIALS` - credentials don't match any [`User`].
#[tracing::instrument(skip_all, fields(email = ?creds.email))]
pub async fn login(
    ctx: Context,
    WithRejection(Json(creds), _): Payload<Credentials>,
) -> Result<Json<LoginResult>, Error> {
    let (Some(email), Some(password)) = (
        creds.email.filter(|e| !e.is_empty()),
        creds.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(Error::invalid_input(&"Email and password are required"));
    };

    // Unknown formats can't match any stored `User`.
    let (Some(email), Some(password)) = (
        domain::user::Email::new(email),
        domain::user::Password::new(password),
    ) else {
        return Err(CredentialsError::WrongCredentials.into());
    };

    let output = ctx
        .service()
        .execute(command::CreateUserSession {
            email,
            password: secrecy::SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(LoginResult {
        token: output.token.to_string(),
        user: output.user.into(),
    }))
}

/// Returns the authenticated [`User`].
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
#[tracing::instrument(skip_all, fields(user.id = %session.user.id))]
pub async fn me(session: Session) -> Json<Me> {
    Json(Me {
        user: session.user.into(),
    })
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => {
                Some(CredentialsError::WrongCredentials.into())
            }
        }
    }
}

define_error! {
    enum CredentialsError {
        #[code = "WRONG_CREDENTIALS"]
        #[status = UNAUTHORIZED]
        #[message = "Invalid credentials"]
        WrongCredentials,
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::api::test_util::{api, call, login, EMAIL};

    #[tokio::test]
    async fn logs_in_and_returns_current_user() {
        let api = api().await;
        let token = login(&api).await;

        let (status, json) =
            call(&api, http::Method::GET, "/me", Some(&token), None).await;

        assert_eq!(status, http::StatusCode::OK);
        assert_eq!(json["user"]["name"], "Maria Santos");
        assert_eq!(json["user"]["email"], EMAIL);
        assert_eq!(json["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let api = api().await;

        let (status, json) = call(
            &api,
            http::Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": EMAIL, "password": "nope"})),
        )
        .await;

        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "WRONG_CREDENTIALS");
    }

    #[tokio::test]
    async fn requires_credentials() {
        let api = api().await;

        let (status, _) = call(
            &api,
            http::Method::POST,
            "/auth/login",
            None,
            Some(json!({"email": EMAIL})),
        )
        .await;

        assert_eq!(status, http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_missing_and_invalid_tokens() {
        let api = api().await;

        let (status, json) =
            call(&api, http::Method::GET, "/me", None, None).await;
        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "AUTHORIZATION_REQUIRED");

        let (status, _) =
            call(&api, http::Method::GET, "/me", Some("garbage"), None).await;
        assert_eq!(status, http::StatusCode::UNAUTHORIZED);
    }
}
