use super::{Tier, TierKind};
use crate::error::{Result, StoreError};
use crate::key::StoreKey;
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

#[derive(Clone)]
struct Entry {
    raw: String,
    mtime: DateTime<Utc>,
}

/// In-memory tier. Serves as the fast tier in production and as either tier
/// in tests.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `Tier` trait on `&self` without paying for a lock.
pub struct MemTier {
    kind: TierKind,
    entries: RefCell<HashMap<StoreKey, Entry>>,
    available: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl Default for MemTier {
    fn default() -> Self {
        Self::new(TierKind::Fast)
    }
}

impl MemTier {
    pub fn new(kind: TierKind) -> Self {
        Self {
            kind,
            entries: RefCell::new(HashMap::new()),
            available: Cell::new(true),
            simulate_write_error: Cell::new(false),
        }
    }

    pub fn fast() -> Self {
        Self::new(TierKind::Fast)
    }

    /// A memory tier standing in for the durable tier (tests, dry runs).
    pub fn durable() -> Self {
        Self::new(TierKind::Durable)
    }

    /// Toggle availability. An unavailable tier fails every operation with
    /// `TierUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Test helper to store raw text as-is, bypassing serialization.
    pub fn insert_raw(&self, key: &StoreKey, raw: &str) {
        self.entries.borrow_mut().insert(
            key.clone(),
            Entry {
                raw: raw.to_string(),
                mtime: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.get() {
            Ok(())
        } else {
            Err(StoreError::TierUnavailable(self.kind))
        }
    }
}

impl Tier for MemTier {
    fn kind(&self) -> TierKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn read(&self, key: &StoreKey) -> Result<Option<String>> {
        self.ensure_available()?;
        Ok(self.entries.borrow().get(key).map(|e| e.raw.clone()))
    }

    fn write(&self, key: &StoreKey, raw: &str) -> Result<()> {
        self.ensure_available()?;
        if self.simulate_write_error.get() {
            return Err(StoreError::Write {
                key: key.to_string(),
                tier: self.kind,
                source: io::Error::other("simulated write error"),
            });
        }
        self.insert_raw(key, raw);
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> Result<()> {
        self.ensure_available()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<usize> {
        self.ensure_available()?;
        let mut entries = self.entries.borrow_mut();
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn keys(&self) -> Result<Vec<StoreKey>> {
        self.ensure_available()?;
        let mut keys: Vec<StoreKey> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn modified(&self, key: &StoreKey) -> Result<Option<DateTime<Utc>>> {
        self.ensure_available()?;
        Ok(self.entries.borrow().get(key).map(|e| e.mtime))
    }

    fn location(&self, key: &StoreKey) -> PathBuf {
        PathBuf::from(format!("memory://{}/{}", self.kind, key))
    }
}
