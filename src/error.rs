use thiserror::Error;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Storage(#[from] crate::storage::StorageError),
    #[error("{0}")]
    Prompt(#[from] dialoguer::Error),
}

impl ServiceError {
    /// Message safe to show in the UI. Validation failures surface as-is;
    /// everything else (network, auth, quota, malformed model output)
    /// collapses to one generic line. The cause is logged, not shown.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Validation(msg) => msg.clone(),
            _ => "Failed to generate roadmap. Check your API key and try again.".to_string(),
        }
    }
}
