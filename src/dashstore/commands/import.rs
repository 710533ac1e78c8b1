use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::key::StoreKey;
use crate::schema;
use crate::store::facade::TieredStore;
use crate::store::Tier;
use serde_json::Value;

/// Save every `{key: document}` pair of an export bundle.
///
/// Entries with an invalid key or a document that does not match its
/// registered shape are skipped and reported; the rest are imported.
pub fn run<F: Tier, D: Tier>(
    store: &TieredStore<F, D>,
    bundle: &Value,
    force: bool,
) -> Result<CmdResult> {
    let Value::Object(entries) = bundle else {
        return Err(StoreError::Api(
            "Import bundle must be a JSON object of key -> document".to_string(),
        ));
    };

    let mut result = CmdResult::default();
    let mut imported = 0;

    for (raw_key, doc) in entries {
        let key = match StoreKey::new(raw_key.as_str()) {
            Ok(key) => key,
            Err(e) => {
                result.add_message(CmdMessage::warning(format!("Skipped: {}", e)));
                continue;
            }
        };
        if !force {
            if let Err(e) = schema::validate(key.as_str(), doc) {
                result.add_message(CmdMessage::warning(format!("Skipped: {}", e)));
                continue;
            }
        }
        store.try_save(&key, doc)?;
        imported += 1;
    }

    result.add_message(CmdMessage::success(format!(
        "Imported {} document(s).",
        imported
    )));
    Ok(result)
}
