use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::key::StoreKey;
use crate::store::facade::TieredStore;
use crate::store::Tier;

pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>, keys: &[StoreKey]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for key in keys {
        let stored = store.contains(key)?;
        // Vacant leftovers are deleted too
        store.try_remove(key)?;
        if stored {
            result.add_message(CmdMessage::success(format!("Removed {}", key)));
        } else {
            result.add_message(CmdMessage::info(format!("Not stored: {}", key)));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{key, mem_store};
    use crate::commands::MessageLevel;
    use serde_json::json;

    #[test]
    fn removes_from_both_tiers() {
        let store = mem_store();
        store.save("todos", &json!([]));

        let res = run(&store, &[key("todos")]).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Success);
        assert!(store.fast().is_empty());
        assert!(store.durable().unwrap().is_empty());
    }

    #[test]
    fn blank_leftover_is_reported_missing_but_deleted() {
        let store = mem_store();
        store.durable().unwrap().insert_raw(&key("todos"), "  ");

        let res = run(&store, &[key("todos")]).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Info);
        assert!(store.durable().unwrap().is_empty());
    }

    #[test]
    fn missing_key_is_informational() {
        let store = mem_store();
        let res = run(&store, &[key("todos")]).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Info);
    }
}
