use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON {0}")]
    Json(#[from] serde_json::Error),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Page error: {0}")]
    Dom(String),
}

pub type AppResult<T> = Result<T, AppError>;
