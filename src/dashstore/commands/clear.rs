use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::facade::TieredStore;
use crate::store::Tier;

pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>) -> Result<CmdResult> {
    let report = store.try_clear_all()?;
    let mut result = CmdResult::default();

    if report.fast == 0 && report.durable == 0 {
        result.add_message(CmdMessage::info("Nothing to clear."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Cleared {} durable and {} cached document(s).",
            report.durable, report.fast
        )));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::mem_store;
    use serde_json::json;

    #[test]
    fn wipes_every_key() {
        let store = mem_store();
        store.save("todos", &json!([1]));
        store.save("reminders", &json!([2]));

        let res = run(&store).unwrap();
        assert!(res.messages[0].content.contains("Cleared 2 durable"));
        assert_eq!(store.load("todos", json!("d")), json!("d"));
        assert_eq!(store.load("reminders", json!("d")), json!("d"));
    }

    #[test]
    fn empty_store_reports_nothing_to_clear() {
        let store = mem_store();
        let res = run(&store).unwrap();
        assert_eq!(res.messages[0].content, "Nothing to clear.");
    }
}
