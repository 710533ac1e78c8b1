//! # Storage Layer
//!
//! Dashboard state lives in two tiers behind one facade:
//!
//! 1. **Fast tier**: an in-process key-value cache ([`mem_tier::MemTier`]).
//! 2. **Durable tier**: one JSON file per key on disk ([`fs_tier::FsTier`]).
//!
//! The [`Tier`] trait handles the "how" of raw storage (memory vs files),
//! while [`facade::TieredStore`] handles the "what": cache-aside reads,
//! write-through saves, clear/remove across both tiers.
//!
//! ## Read Path
//!
//! 1. Fast hit → parse and return.
//! 2. Fast miss + durable present → read `<key>.json`.
//! 3. Durable hit → copy into the fast tier (warm-up) and return.
//! 4. Both miss → caller's default. The default is never written back.
//!
//! ## Write Path
//!
//! The fast tier is always written first. When a durable tier is configured
//! the same text is written through to it. Durable writes are atomic
//! (temp file + rename), so readers never see half a document.
//!
//! ## Failure Surfaces
//!
//! Every operation comes in two flavors:
//! - `try_*` returns [`crate::error::Result`] with a typed error.
//! - the plain form logs the error and falls back to the default or a no-op,
//!   for UI callers that only want "best effort".
//!
//! ## Storage Layout
//!
//! ```text
//! <data-dir>/
//! ├── todos.json
//! ├── dashboard-data.json
//! └── youtube-links.json
//! ```

use crate::error::Result;
use crate::key::StoreKey;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub mod facade;
pub mod fs_tier;
pub mod mem_tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Fast,
    Durable,
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierKind::Fast => f.write_str("fast"),
            TierKind::Durable => f.write_str("durable"),
        }
    }
}

/// Abstract interface for one storage tier.
///
/// Tiers store raw serialized text; parsing happens in the facade so both
/// tiers report corruption the same way. All methods take `&self`:
/// implementations use interior mutability since the store is
/// single-threaded.
pub trait Tier {
    /// Which role this tier plays, used in logs and errors.
    fn kind(&self) -> TierKind;

    /// Whether the tier can currently serve requests.
    fn is_available(&self) -> bool;

    /// Read raw text for a key.
    /// Returns Ok(None) if the key does not exist.
    fn read(&self, key: &StoreKey) -> Result<Option<String>>;

    /// Replace the stored text for a key.
    fn write(&self, key: &StoreKey, raw: &str) -> Result<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &StoreKey) -> Result<()>;

    /// Delete every key. Returns how many were removed.
    fn clear(&self) -> Result<usize>;

    /// List all keys currently stored.
    fn keys(&self) -> Result<Vec<StoreKey>>;

    /// Last modification time of a key.
    fn modified(&self, key: &StoreKey) -> Result<Option<DateTime<Utc>>>;

    /// Where the key lives. For FsTier a real path, for MemTier a virtual one.
    fn location(&self, key: &StoreKey) -> PathBuf;
}
