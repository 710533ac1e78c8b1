use crate::commands::{CmdMessage, CmdResult, KeyedDoc};
use crate::error::Result;
use crate::key::StoreKey;
use crate::store::facade::TieredStore;
use crate::store::Tier;
use serde_json::Value;

pub fn run<F: Tier, D: Tier>(
    store: &TieredStore<F, D>,
    keys: &[StoreKey],
    default: Option<&Value>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for key in keys {
        match store.try_load(key)? {
            Some(doc) => result.documents.push(KeyedDoc {
                key: key.clone(),
                doc,
            }),
            None => match default {
                Some(doc) => result.documents.push(KeyedDoc {
                    key: key.clone(),
                    doc: doc.clone(),
                }),
                None => {
                    result.add_message(CmdMessage::warning(format!("No document stored for {}", key)))
                }
            },
        }
    }

    Ok(result)
}
