//! Consistency check across both tiers.
//!
//! Looks for:
//! 1. **Corrupt entries**: stored text that is not JSON, in either tier.
//! 2. **Shape mismatches**: documents under a registered key that do not
//!    match the registered shape (see [`crate::schema`]).
//! 3. **Stale cache entries**: fast-tier copies that differ from the durable
//!    document.
//!
//! With `fix`, corrupt durable files are restored from a valid cached copy
//! when one exists and deleted otherwise; corrupt and stale cache entries
//! are dropped so the next read re-warms them. Shape mismatches are only
//! reported.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::key::StoreKey;
use crate::schema;
use crate::store::facade::{is_vacant, TieredStore};
use crate::store::{Tier, TierKind};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub corrupt: Vec<(StoreKey, TierKind)>,
    pub mismatched: Vec<StoreKey>,
    pub stale: Vec<StoreKey>,
    pub restored: usize,
    pub dropped: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.corrupt.is_empty() && self.mismatched.is_empty() && self.stale.is_empty()
    }
}

enum Parsed {
    Doc(Value, String),
    Corrupt,
}

fn scan<T: Tier>(tier: &T) -> Result<BTreeMap<StoreKey, Parsed>> {
    let mut out = BTreeMap::new();
    for key in tier.keys()? {
        let Some(raw) = tier.read(&key)?.filter(|r| !is_vacant(tier.kind(), r)) else {
            continue;
        };
        let parsed = match serde_json::from_str::<Value>(&raw) {
            Ok(doc) => Parsed::Doc(doc, raw),
            Err(e) => {
                log::warn!("{} tier holds corrupt document for {}: {}", tier.kind(), key, e);
                Parsed::Corrupt
            }
        };
        out.insert(key, parsed);
    }
    Ok(out)
}

pub fn inspect<F: Tier, D: Tier>(store: &TieredStore<F, D>, fix: bool) -> Result<CheckReport> {
    let fast = scan(store.fast())?;
    let durable_tier = store.durable().filter(|d| d.is_available());
    let durable = match durable_tier {
        Some(d) => scan(d)?,
        None => BTreeMap::new(),
    };

    let all_keys: BTreeSet<&StoreKey> = fast.keys().chain(durable.keys()).collect();
    let mut report = CheckReport {
        checked: all_keys.len(),
        ..Default::default()
    };

    for key in all_keys {
        let cached = fast.get(key);
        let stored = durable.get(key);

        if let Some(Parsed::Corrupt) = stored {
            report.corrupt.push((key.clone(), TierKind::Durable));
        }
        if let Some(Parsed::Corrupt) = cached {
            report.corrupt.push((key.clone(), TierKind::Fast));
        }

        // Validate the authoritative copy: durable if usable, else cached
        let authoritative = match (stored, cached) {
            (Some(Parsed::Doc(doc, _)), _) => Some(doc),
            (_, Some(Parsed::Doc(doc, _))) => Some(doc),
            _ => None,
        };
        if let Some(doc) = authoritative {
            if schema::validate(key.as_str(), doc).is_err() {
                report.mismatched.push(key.clone());
            }
        }

        if let (Some(Parsed::Doc(a, _)), Some(Parsed::Doc(b, _))) = (cached, stored) {
            if a != b {
                report.stale.push(key.clone());
            }
        }

        if !fix {
            continue;
        }

        if let (Some(Parsed::Corrupt), Some(tier)) = (stored, durable_tier) {
            match cached {
                Some(Parsed::Doc(_, raw)) => {
                    tier.write(key, raw)?;
                    report.restored += 1;
                }
                _ => {
                    tier.remove(key)?;
                    report.dropped += 1;
                }
            }
        }

        let stale = matches!(
            (cached, stored),
            (Some(Parsed::Doc(a, _)), Some(Parsed::Doc(b, _))) if a != b
        );
        if matches!(cached, Some(Parsed::Corrupt)) || stale {
            store.fast().remove(key)?;
            report.dropped += 1;
        }
    }

    Ok(report)
}

pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>, fix: bool) -> Result<CmdResult> {
    let report = inspect(store, fix)?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success(format!(
            "Checked {} key(s). No inconsistencies found.",
            report.checked
        )));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning(format!(
        "Checked {} key(s). Inconsistencies found:",
        report.checked
    )));
    for (key, tier) in &report.corrupt {
        result.add_message(CmdMessage::error(format!(
            "  - {}: corrupt document in {} tier",
            key, tier
        )));
    }
    for key in &report.mismatched {
        result.add_message(CmdMessage::warning(format!(
            "  - {}: document does not match its registered shape",
            key
        )));
    }
    for key in &report.stale {
        result.add_message(CmdMessage::info(format!(
            "  - {}: cached copy differs from durable copy",
            key
        )));
    }

    if fix {
        if report.restored > 0 {
            result.add_message(CmdMessage::success(format!(
                "Restored {} durable document(s) from cache.",
                report.restored
            )));
        }
        if report.dropped > 0 {
            result.add_message(CmdMessage::success(format!(
                "Dropped {} unusable entries.",
                report.dropped
            )));
        }
    } else if !report.corrupt.is_empty() || !report.stale.is_empty() {
        result.add_message(CmdMessage::info("Run with --fix to repair."));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{key, mem_store};
    use serde_json::json;

    #[test]
    fn clean_store_passes() {
        let store = mem_store();
        store.save("todos", &json!([]));
        store.save("scratch", &json!({"x": 1}));

        let report = inspect(&store, false).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.checked, 2);
    }

    #[test]
    fn finds_corrupt_durable_document() {
        let store = mem_store();
        store.durable().unwrap().write(&key("todos"), "[{").unwrap();

        let report = inspect(&store, false).unwrap();
        assert_eq!(report.corrupt, vec![(key("todos"), TierKind::Durable)]);
    }

    #[test]
    fn vacant_entries_are_not_corrupt() {
        let store = mem_store();
        store.fast().insert_raw(&key("todos"), "  ");
        store.durable().unwrap().write(&key("todos"), "").unwrap();
        store.durable().unwrap().write(&key("current-activity"), "null").unwrap();

        let report = inspect(&store, false).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.checked, 0);
    }

    #[test]
    fn finds_shape_mismatch() {
        let store = mem_store();
        store.save("daily-focus", &json!(["not", "an", "object"]));

        let report = inspect(&store, false).unwrap();
        assert_eq!(report.mismatched, vec![key("daily-focus")]);
    }

    #[test]
    fn finds_stale_cache() {
        let store = mem_store();
        store.save("todos", &json!([]));
        store.durable().unwrap().write(&key("todos"), "[1]").unwrap();

        let report = inspect(&store, false).unwrap();
        assert_eq!(report.stale, vec![key("todos")]);
    }

    #[test]
    fn fix_restores_durable_from_cache() {
        let store = mem_store();
        store.save("todos", &json!([]));
        store.durable().unwrap().insert_raw(&key("todos"), "garbage");

        let report = inspect(&store, true).unwrap();
        assert_eq!(report.restored, 1);
        assert_eq!(
            store.durable().unwrap().read(&key("todos")).unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn fix_drops_unrecoverable_and_stale_entries() {
        let store = mem_store();
        store.durable().unwrap().insert_raw(&key("broken"), "garbage");
        store.save("todos", &json!([]));
        store
            .durable()
            .unwrap()
            .write(&key("todos"), r#"[{"id":"1","text":"a"}]"#)
            .unwrap();

        let report = inspect(&store, true).unwrap();
        assert_eq!(report.dropped, 2);
        assert_eq!(store.durable().unwrap().read(&key("broken")).unwrap(), None);
        // Durable copy wins on next load
        assert_eq!(
            store.load("todos", json!(null)),
            json!([{"id": "1", "text": "a"}])
        );
        assert!(inspect(&store, false).unwrap().is_clean());
    }

    #[test]
    fn run_suggests_fix() {
        let store = mem_store();
        store.fast().insert_raw(&key("todos"), "{");
        let res = run(&store, false).unwrap();
        assert!(res.has_errors());
        assert!(res
            .messages
            .iter()
            .any(|m| m.content.contains("--fix")));
    }
}
