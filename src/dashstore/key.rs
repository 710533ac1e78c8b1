//! # Storage Keys
//!
//! Keys form a single flat namespace shared by both tiers. The durable tier
//! maps a key to a file named `<key>.json`, so a key must be usable as a
//! plain filename on every platform:
//!
//! - non-empty and at most [`MAX_KEY_LEN`] bytes
//! - no `/`, `\`, NUL or other control characters
//! - no leading `.` (dot-files are reserved for in-flight temp files)
//! - no trailing `.json` (the suffix is added by the durable tier)
//!
//! [`DocKey`] pairs a key name with the document type stored under it, so
//! typed callers never repeat the key string or the shape.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub const MAX_KEY_LEN: usize = 128;
pub const FILE_SUFFIX: &str = ".json";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        validate(&raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename used by the durable tier.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.0, FILE_SUFFIX)
    }

    /// Reverse of [`StoreKey::file_name`]. Returns `None` for anything that is
    /// not a key file (temp files, foreign files, invalid names).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(FILE_SUFFIX)?;
        Self::new(stem).ok()
    }
}

fn validate(raw: &str) -> Result<()> {
    let reject = |reason| {
        Err(StoreError::InvalidKey {
            key: raw.to_string(),
            reason,
        })
    };

    if raw.is_empty() {
        return reject("key is empty");
    }
    if raw.len() > MAX_KEY_LEN {
        return reject("key is too long");
    }
    if raw.starts_with('.') {
        return reject("key may not start with '.'");
    }
    if raw.ends_with(FILE_SUFFIX) {
        return reject("key may not end with '.json'");
    }
    if raw.chars().any(|c| c == '/' || c == '\\') {
        return reject("key may not contain path separators");
    }
    if raw.chars().any(char::is_control) {
        return reject("key may not contain control characters");
    }
    Ok(())
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StoreKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for StoreKey {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StoreKey> for String {
    fn from(key: StoreKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A key name bound to the document type stored under it.
pub struct DocKey<T> {
    name: &'static str,
    _doc: PhantomData<fn() -> T>,
}

impl<T> DocKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _doc: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Result<StoreKey> {
        StoreKey::new(self.name)
    }
}

impl<T> Clone for DocKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DocKey<T> {}

impl<T> fmt::Debug for DocKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DocKey").field(&self.name).finish()
    }
}
