use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use size_chart_api_types::result::AjaxResponse;
use size_chart_db::DbError;
use thiserror::Error;
use tracing::error;

pub(crate) const SERVICE_UNAVAILABLE: &str = "size chart service unavailable";

/// Errors of the json endpoints. Every variant still answers with the
/// `{"success": false, "data": {"message": ..}}` shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Store error {0}")]
    Store(#[from] DbError),
    #[error("unknown action")]
    UnknownAction(Option<String>),
    #[error("bad token")]
    BadToken,
    /// The body could not be read at all, the detail is only logged.
    #[error("bad request")]
    Malformed(String),
}

impl ApiError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UnknownAction(_) | ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::BadToken => StatusCode::FORBIDDEN,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) => SERVICE_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(_) => error!("error {self}"),
            ApiError::UnknownAction(action) => {
                tracing::info!("unknown ajax action {action:?}")
            }
            ApiError::BadToken => tracing::warn!("rejected request with a bad admin token"),
            ApiError::Malformed(detail) => tracing::info!("malformed request {detail}"),
        }
        (
            self.as_status_code(),
            Json(AjaxResponse::failure(self.public_message())),
        )
            .into_response()
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Db Error {0}")]
    Store(#[from] DbError),
    #[error("Invalid product")]
    InvalidProduct(String),
    #[error("Forbidden")]
    Forbidden,
}

impl WebError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::InvalidProduct(_) => StatusCode::NOT_FOUND,
            WebError::Forbidden => StatusCode::FORBIDDEN,
            WebError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Error returned {self:?}");
        (self.as_status_code(), format!("{self}")).into_response()
    }
}
