use crate::commands::{CmdResult, KeyPaths};
use crate::error::Result;
use crate::key::StoreKey;
use crate::store::facade::TieredStore;
use crate::store::Tier;

/// Tier locations for `keys`, or for every stored key when `keys` is empty.
pub fn run<F: Tier, D: Tier>(store: &TieredStore<F, D>, keys: &[StoreKey]) -> Result<CmdResult> {
    let keys: Vec<StoreKey> = if keys.is_empty() {
        store.entries()?.into_iter().map(|e| e.key).collect()
    } else {
        keys.to_vec()
    };

    let paths = keys
        .into_iter()
        .map(|key| KeyPaths {
            fast: store.fast().location(&key),
            durable: store.durable().map(|d| d.location(&key)),
            key,
        })
        .collect();

    Ok(CmdResult::default().with_paths(paths))
}
