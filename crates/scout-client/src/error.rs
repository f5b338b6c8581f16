use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not logged in: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Common(#[from] scout_common::CommonError),

    #[error("TUI error: {0}")]
    Tui(String),
}

impl From<reqwest::Error> for ScoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScoutError::Network(format!("request timed out: {err}"))
        } else {
            ScoutError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
