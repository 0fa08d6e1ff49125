use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Chain lookup failed for subject '{subject}': {reason}")]
    ChainLookup { subject: String, reason: String },

    #[error("Chain fork detected for subject '{subject}': linked against {expected:?}, store holds {found:?}")]
    ChainFork {
        subject: String,
        expected: Option<String>,
        found: Option<String>,
    },

    #[error("Chain broken at record '{id}': {reason}")]
    ChainBroken { id: String, reason: String },

    #[error("Record '{id}' does not exist")]
    NotFound { id: String },

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn validation(reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            reason: reason.into(),
        }
    }
}
