use std::time::Duration;

use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request took too long, timed out after {} second(s)", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },
    #[error("{message} ({status})")]
    Http { status: u16, message: String },
    #[error("{detail}")]
    Validation { detail: String },
    #[error("no recipe is currently loaded")]
    NoActiveRecipe,
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("bookmark persistence failed: {0:#}")]
    Persistence(anyhow::Error),
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ClientError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A missing resource surfaces as an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
