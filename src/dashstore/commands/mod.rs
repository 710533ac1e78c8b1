use crate::config::DashConfig;
use crate::key::StoreKey;
use crate::store::facade::KeyEntry;
use serde_json::Value;
use std::path::PathBuf;

pub mod check;
pub mod clear;
pub mod config;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod paths;
pub mod remove;
pub mod set;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A document as returned by `get` and `export`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedDoc {
    pub key: StoreKey,
    pub doc: Value,
}

/// Where a key lives in each tier.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPaths {
    pub key: StoreKey,
    pub fast: PathBuf,
    pub durable: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub documents: Vec<KeyedDoc>,
    pub entries: Vec<KeyEntry>,
    pub paths: Vec<KeyPaths>,
    pub config: Option<DashConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_documents(mut self, documents: Vec<KeyedDoc>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_entries(mut self, entries: Vec<KeyEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_paths(mut self, paths: Vec<KeyPaths>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: DashConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Documents as one `{key: document}` JSON object.
    pub fn bundle(&self) -> Value {
        Value::Object(
            self.documents
                .iter()
                .map(|d| (d.key.to_string(), d.doc.clone()))
                .collect(),
        )
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
