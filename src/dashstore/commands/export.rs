use crate::commands::{CmdMessage, CmdResult, KeyedDoc};
use crate::error::Result;
use crate::store::facade::TieredStore;
use crate::store::Tier;

/// Collect every stored document. Unreadable keys are skipped with a warning
/// so one corrupt file does not block a backup of the rest.
pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut documents = Vec::new();

    for entry in store.entries()? {
        match store.try_load(&entry.key) {
            Ok(Some(doc)) => documents.push(KeyedDoc {
                key: entry.key,
                doc,
            }),
            Ok(None) => {}
            Err(e) => result.add_message(CmdMessage::warning(format!("Skipped {}: {}", entry.key, e))),
        }
    }

    result.add_message(CmdMessage::info(format!(
        "Exported {} document(s).",
        documents.len()
    )));
    Ok(result.with_documents(documents))
}
