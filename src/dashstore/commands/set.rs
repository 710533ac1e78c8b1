use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::key::StoreKey;
use crate::schema;
use crate::store::facade::{Persisted, TieredStore};
use crate::store::Tier;
use serde_json::Value;

/// Replace the document under `key`. Documents for registered keys are
/// checked against their shape unless `force` is set.
pub fn run<F: Tier, D: Tier>(
    store: &TieredStore<F, D>,
    key: &StoreKey,
    doc: &Value,
    force: bool,
) -> Result<CmdResult> {
    if !force {
        schema::validate(key.as_str(), doc)?;
    }

    let persisted = store.try_save(key, doc)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(match persisted {
        Persisted::Both => format!("Saved {}", key),
        Persisted::FastOnly => format!("Saved {} (cache only, no durable tier)", key),
    }));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{key, mem_store};
    use crate::error::StoreError;
    use serde_json::json;

    #[test]
    fn replaces_document() {
        let store = mem_store();
        run(&store, &key("notes"), &json!({"a": 1}), false).unwrap();
        run(&store, &key("notes"), &json!({"b": 2}), false).unwrap();

        assert_eq!(store.load("notes", json!(null)), json!({"b": 2}));
    }

    #[test]
    fn rejects_shape_mismatch_for_registered_key() {
        let store = mem_store();
        let err = run(&store, &key("todos"), &json!({"oops": true}), false).unwrap_err();
        assert!(matches!(err, StoreError::Schema { .. }));
        assert!(!store.contains(&key("todos")).unwrap());
    }

    #[test]
    fn force_skips_validation() {
        let store = mem_store();
        run(&store, &key("todos"), &json!({"oops": true}), true).unwrap();
        assert_eq!(store.load("todos", json!([])), json!({"oops": true}));
    }
}
