use crate::store::TierKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} tier is not available")]
    TierUnavailable(TierKind),

    #[error("Invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("Corrupt document for {key} in {tier} tier: {source}")]
    Parse {
        key: String,
        tier: TierKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {key} from {tier} tier: {source}")]
    Read {
        key: String,
        tier: TierKind,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key} to {tier} tier: {source}")]
    Write {
        key: String,
        tier: TierKind,
        #[source]
        source: std::io::Error,
    },

    #[error("Document for {key} does not match its registered shape: {source}")]
    Schema {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl StoreError {
    /// True when the stored bytes exist but cannot be used as a document.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Parse { .. } | StoreError::Schema { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
