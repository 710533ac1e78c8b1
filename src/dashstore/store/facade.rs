//! # Tiered Store Facade
//!
//! [`TieredStore`] is the only type callers need: it owns a fast tier and an
//! optional durable tier and reconciles them on every call.
//!
//! ## Policies
//!
//! - **Cache-aside reads**: fast tier first, durable tier on a miss, then the
//!   fast tier is warmed with whatever the durable tier returned.
//! - **Write-through saves**: fast tier unconditionally, durable tier when
//!   configured.
//! - **No seeding**: a miss returns the caller's default without writing it.
//! - **Clear and remove touch both tiers**, otherwise the next read would
//!   resurrect the data from the durable tier.
//! - **Corrupt cache entries are misses**: an unparseable fast-tier entry is
//!   skipped and the durable tier consulted. Corruption in the durable tier is
//!   reported as [`StoreError::Parse`].
//! - Empty stored text, and a `null` document in the durable tier, count as
//!   misses.
//!
//! A durable tier that was configured but has become unavailable is an error
//! ([`StoreError::TierUnavailable`]) on the `try_*` surface. A store built
//! without a durable tier simply runs fast-only.

use super::fs_tier::FsTier;
use super::mem_tier::MemTier;
use super::{Tier, TierKind};
use crate::error::{Result, StoreError};
use crate::key::{DocKey, StoreKey};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Which tiers a save reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    FastOnly,
    Both,
}

/// Keys removed by a clear-all, per tier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClearReport {
    pub fast: usize,
    pub durable: usize,
}

/// One key as seen across both tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: StoreKey,
    pub in_fast: bool,
    pub in_durable: bool,
    /// Durable modification time if present there, else the fast tier's.
    pub modified: Option<DateTime<Utc>>,
}

pub struct TieredStore<F: Tier = MemTier, D: Tier = FsTier> {
    fast: F,
    durable: Option<D>,
}

impl<F: Tier, D: Tier> TieredStore<F, D> {
    pub fn new(fast: F, durable: Option<D>) -> Self {
        Self { fast, durable }
    }

    pub fn with_durable(fast: F, durable: D) -> Self {
        Self::new(fast, Some(durable))
    }

    pub fn fast_only(fast: F) -> Self {
        Self::new(fast, None)
    }

    pub fn fast(&self) -> &F {
        &self.fast
    }

    pub fn durable(&self) -> Option<&D> {
        self.durable.as_ref()
    }

    /// True when a durable tier is configured and currently usable.
    pub fn has_durable(&self) -> bool {
        self.durable.as_ref().is_some_and(|d| d.is_available())
    }

    fn durable_tier(&self) -> Result<Option<&D>> {
        match &self.durable {
            None => Ok(None),
            Some(d) if d.is_available() => Ok(Some(d)),
            Some(_) => Err(StoreError::TierUnavailable(TierKind::Durable)),
        }
    }

    // --- Result surface ---

    /// Load the current document for `key`, or `None` if neither tier has it.
    pub fn try_load(&self, key: &StoreKey) -> Result<Option<Value>> {
        if let Some(raw) = self.fast.read(key)?.filter(|r| !is_vacant(TierKind::Fast, r)) {
            match parse(key, TierKind::Fast, &raw) {
                Ok(doc) => return Ok(Some(doc)),
                Err(e) => log::warn!("Ignoring cached copy: {}", e),
            }
        }

        let Some(durable) = self.durable_tier()? else {
            return Ok(None);
        };
        let Some(raw) = durable
            .read(key)?
            .filter(|r| !is_vacant(TierKind::Durable, r))
        else {
            return Ok(None);
        };
        let doc = parse(key, TierKind::Durable, &raw)?;

        // Warm-up is opportunistic; the document is returned either way
        match serde_json::to_string(&doc) {
            Ok(text) => match self.fast.write(key, &text) {
                Ok(()) => log::debug!("Warmed fast tier for {} from durable tier", key),
                Err(e) => log::warn!("Could not warm fast tier for {}: {}", key, e),
            },
            Err(e) => log::warn!("Could not warm fast tier for {}: {}", key, e),
        }
        Ok(Some(doc))
    }

    /// Replace the document for `key` in the fast tier, then write it through
    /// to the durable tier.
    pub fn try_save(&self, key: &StoreKey, doc: &Value) -> Result<Persisted> {
        let raw = serde_json::to_string(doc)?;
        self.fast.write(key, &raw)?;

        let Some(durable) = self.durable_tier()? else {
            return Ok(Persisted::FastOnly);
        };
        durable.write(key, &raw)?;
        log::debug!("Wrote {} through to durable tier", key);
        Ok(Persisted::Both)
    }

    /// Delete one key from both tiers.
    pub fn try_remove(&self, key: &StoreKey) -> Result<()> {
        self.fast.remove(key)?;
        if let Some(durable) = self.durable_tier()? {
            durable.remove(key)?;
        }
        Ok(())
    }

    /// Wipe every key in both tiers.
    pub fn try_clear_all(&self) -> Result<ClearReport> {
        let mut report = ClearReport {
            fast: self.fast.clear()?,
            durable: 0,
        };
        if let Some(durable) = self.durable_tier()? {
            report.durable = durable.clear()?;
        }
        log::info!(
            "Cleared {} cached and {} durable keys",
            report.fast,
            report.durable
        );
        Ok(report)
    }

    /// Whether either tier holds something other than a vacant entry.
    /// Corrupt text still counts as stored.
    pub fn contains(&self, key: &StoreKey) -> Result<bool> {
        let held = |kind: TierKind, raw: Option<String>| raw.is_some_and(|r| !is_vacant(kind, &r));
        if held(TierKind::Fast, self.fast.read(key)?) {
            return Ok(true);
        }
        match self.durable_tier()? {
            Some(durable) => Ok(held(TierKind::Durable, durable.read(key)?)),
            None => Ok(false),
        }
    }

    /// Every key known to either tier, sorted.
    pub fn entries(&self) -> Result<Vec<KeyEntry>> {
        let mut merged: BTreeMap<StoreKey, KeyEntry> = BTreeMap::new();

        for key in self.fast.keys()? {
            let modified = self.fast.modified(&key)?;
            merged.insert(
                key.clone(),
                KeyEntry {
                    key,
                    in_fast: true,
                    in_durable: false,
                    modified,
                },
            );
        }

        if let Some(durable) = self.durable_tier()? {
            for key in durable.keys()? {
                let modified = durable.modified(&key)?;
                let entry = merged.entry(key.clone()).or_insert_with(|| KeyEntry {
                    key,
                    in_fast: false,
                    in_durable: false,
                    modified: None,
                });
                entry.in_durable = true;
                if modified.is_some() {
                    entry.modified = modified;
                }
            }
        }

        Ok(merged.into_values().collect())
    }

    pub fn try_load_doc<T: DeserializeOwned>(&self, key: &DocKey<T>) -> Result<Option<T>> {
        let store_key = key.key()?;
        match self.try_load(&store_key)? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Schema {
                    key: store_key.to_string(),
                    source,
                }),
        }
    }

    pub fn try_save_doc<T: Serialize>(&self, key: &DocKey<T>, doc: &T) -> Result<Persisted> {
        let store_key = key.key()?;
        let value = serde_json::to_value(doc)?;
        self.try_save(&store_key, &value)
    }

    // --- Best-effort surface ---

    /// Load `key`, falling back to `default` on a miss or on any failure.
    /// The default is not persisted.
    pub fn load(&self, key: &str, default: Value) -> Value {
        match StoreKey::new(key).and_then(|k| self.try_load(&k)) {
            Ok(Some(doc)) => doc,
            Ok(None) => default,
            Err(e) => {
                log::error!("Error loading data for key {}: {}", key, e);
                default
            }
        }
    }

    /// Save `doc` under `key`. Failures are logged and dropped.
    pub fn save(&self, key: &str, doc: &Value) {
        if let Err(e) = StoreKey::new(key).and_then(|k| self.try_save(&k, doc)) {
            log::error!("Error saving data for key {}: {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = StoreKey::new(key).and_then(|k| self.try_remove(&k)) {
            log::error!("Error removing key {}: {}", key, e);
        }
    }

    pub fn clear_all(&self) {
        if let Err(e) = self.try_clear_all() {
            log::error!("Error clearing storage: {}", e);
        }
    }

    pub fn load_doc<T: DeserializeOwned>(&self, key: &DocKey<T>, default: T) -> T {
        match self.try_load_doc(key) {
            Ok(Some(doc)) => doc,
            Ok(None) => default,
            Err(e) => {
                log::error!("Error loading data for key {}: {}", key.name(), e);
                default
            }
        }
    }

    pub fn save_doc<T: Serialize>(&self, key: &DocKey<T>, doc: &T) {
        if let Err(e) = self.try_save_doc(key, doc) {
            log::error!("Error saving data for key {}: {}", key.name(), e);
        }
    }
}

/// Stored text that reads as a miss: blank in either tier, or a `null`
/// document in the durable tier. A cached `null` was written by a caller
/// and is a hit.
pub(crate) fn is_vacant(tier: TierKind, raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || (tier == TierKind::Durable && raw == "null")
}

fn parse(key: &StoreKey, tier: TierKind, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|source| StoreError::Parse {
        key: key.to_string(),
        tier,
        source,
    })
}
