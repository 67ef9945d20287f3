//! [`Context`]-related definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use service::{
    command::{self, Command as _},
    domain::{self, user::session, Actor},
};

use crate::{define_error, AsError, Error, Service};

/// Request context giving access to the [`Service`].
#[derive(Clone, Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,
}

impl Context {
    /// Returns [`Service`] instance of this [`Context`].
    #[must_use]
    pub fn service(&self) -> &Service {
        &self.service
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Context
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;

        Ok(Self { service })
    }
}

/// Session of an authenticated [`domain::User`].
///
/// Extracting it rejects requests without a valid bearer token.
#[derive(Clone, Debug)]
pub struct Session {
    /// Authenticated [`domain::User`].
    pub user: domain::User,

    /// Authentication token.
    pub token: session::Token,

    /// Date and time when this [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl Session {
    /// Returns the [`Actor`] performing changes within this [`Session`].
    #[must_use]
    pub fn actor(&self) -> Actor {
        self.user.name.clone().into()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let ctx = Context::from_request_parts(parts, state).await?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                if e.is_missing() {
                    AuthError::AuthorizationRequired
                } else {
                    AuthError::InvalidToken
                }
            })?;

        #[expect(unsafe_code, reason = "specified in correct header")]
        let token =
            unsafe { session::Token::new_unchecked(bearer.token().to_owned()) };
        let output = ctx
            .service()
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map_err(AsError::into_error)?;

        Ok(Self {
            user: output.user,
            token,
            expires_at: output.session.expires_at,
        })
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenDecodeError(_) | Self::UserNotExists(_) => {
                Some(AuthError::InvalidToken.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_TOKEN"]
        #[status = UNAUTHORIZED]
        #[message = "Unauthorized"]
        InvalidToken,
    }
}
