use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::borrow::Cow;
use std::collections::HashMap;

pub type SocResult<T, E = SocError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum SocError {
    #[error("authentication required")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("account not found")]
    AccountNotFound,

    #[error("profile not found")]
    ProfileNotFound,

    #[error("missing data")]
    MissingData,

    #[error("invalid credentials")]
    BadCredentials,

    #[error("username does not exist")]
    UsernameDoesNotExist,

    #[error("username is taken")]
    UsernameTaken,

    #[error("email is taken")]
    EmailTaken,

    #[error("a database error occurred")]
    Sqlx(#[from] sqlx::Error),

    #[error("an internal server error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl SocError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::BadCredentials => StatusCode::UNAUTHORIZED,
            Self::UsernameDoesNotExist => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UsernameTaken => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EmailTaken => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SocError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized | Self::BadCredentials => (
                self.status_code(),
                [(WWW_AUTHENTICATE, HeaderValue::from_static("Token"))]
                    .into_iter()
                    .collect::<HeaderMap>(),
                self.to_string(),
            )
                .into_response(),
            Self::Forbidden => (self.status_code(), ()).into_response(),
            Self::AccountNotFound => (self.status_code(), ()).into_response(),
            Self::ProfileNotFound => (self.status_code(), ()).into_response(),
            Self::MissingData => (self.status_code(), self.to_string()).into_response(),
            Self::UsernameDoesNotExist => {
                unprocessable_entity_with_errors([("username".into(), vec!["does not exist".into()])])
            }
            Self::UsernameTaken => unprocessable_entity_with_errors([(
                "username".into(),
                vec!["username is taken".into()],
            )]),
            Self::EmailTaken => {
                unprocessable_entity_with_errors([("email".into(), vec!["email is taken".into()])])
            }
            Self::Sqlx(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (self.status_code(), self.to_string()).into_response()
            }
            Self::Anyhow(ref e) => {
                tracing::error!("Generic error: {:?}", e);
                (self.status_code(), self.to_string()).into_response()
            }
        }
    }
}

#[derive(serde::Serialize)]
struct JsonErrors {
    errors: HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>,
}

fn unprocessable_entity_with_errors(
    errors: impl Into<HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>>,
) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(JsonErrors {
            errors: errors.into(),
        }),
    )
        .into_response()
}
