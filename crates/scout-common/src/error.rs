use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid map region: {0}")]
    InvalidRegion(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type CommonResult<T> = std::result::Result<T, CommonError>;
