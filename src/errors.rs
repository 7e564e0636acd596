use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String, String),
    Conflict(String),
    NotFound(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    pub fn bad_request(message: impl Into<String>, meta: Option<String>) -> Self {
        Self::BadRequest(message.into(), meta.unwrap_or_default())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InternalServerError(message) => write!(f, "Status=500, InternalServerError: {}", message),
            ApiError::BadRequest(message, meta) => write!(f, "Status=400, BadRequest: {}. {}", message, meta),
            ApiError::Conflict(message) => write!(f, "Status=409, Conflict: {}", message),
            ApiError::NotFound(message) => write!(f, "Status=404, NotFound: {}", message),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        #[derive(serde::Serialize)]
        struct ErrorBody {
            error: String,
        }

        let (status, error) = match self {
            ServerError::Api(e) => {
                warn!("{}", e);
                match e {
                    ApiError::InternalServerError(message) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, message)
                    }
                    ApiError::BadRequest(message, _) => (StatusCode::BAD_REQUEST, message),
                    ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
                    ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
                }
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Unexpected Error".to_string()),
        };

        (status, axum::Json(ErrorBody { error })).into_response()
    }
}
