use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::facade::TieredStore;
use crate::store::Tier;

pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>) -> Result<CmdResult> {
    let entries = store.entries()?;
    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info("No documents stored."));
    }
    Ok(result.with_entries(entries))
}
