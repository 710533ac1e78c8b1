//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients.
//!
//! The API:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs** (raw key strings → validated [`StoreKey`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no formatting; that belongs to the client.
//!
//! `DashApi<F, D>` is generic over both tiers:
//! - Production: `DashApi<MemTier, FsTier>`
//! - Testing: `DashApi<MemTier, MemTier>`
//!
//! Library callers that only need load/save can skip this layer and use
//! [`TieredStore`] directly via [`DashApi::store`].

use crate::commands;
use crate::config::DashConfig;
use crate::error::Result;
use crate::key::StoreKey;
use crate::store::facade::TieredStore;
use crate::store::fs_tier::FsTier;
use crate::store::mem_tier::MemTier;
use crate::store::Tier;
use serde_json::Value;

pub struct DashApi<F: Tier = MemTier, D: Tier = FsTier> {
    store: TieredStore<F, D>,
    config: DashConfig,
}

impl DashApi<MemTier, FsTier> {
    /// Build the production stack described by `config`.
    pub fn from_config(config: DashConfig) -> Result<Self> {
        let durable = if config.durable {
            Some(FsTier::new(config.data_dir()?).with_pretty(config.pretty))
        } else {
            None
        };
        Ok(Self::new(TieredStore::new(MemTier::fast(), durable), config))
    }
}

impl<F: Tier, D: Tier> DashApi<F, D> {
    pub fn new(store: TieredStore<F, D>, config: DashConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &TieredStore<F, D> {
        &self.store
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn get<K: AsRef<str>>(&self, keys: &[K], default: Option<&Value>) -> Result<commands::CmdResult> {
        let keys = parse_keys(keys)?;
        commands::get::run(&self.store, &keys, default)
    }

    pub fn set(&self, key: &str, doc: &Value, force: bool) -> Result<commands::CmdResult> {
        let key = StoreKey::new(key)?;
        commands::set::run(&self.store, &key, doc, force)
    }

    pub fn remove<K: AsRef<str>>(&self, keys: &[K]) -> Result<commands::CmdResult> {
        let keys = parse_keys(keys)?;
        commands::remove::run(&self.store, &keys)
    }

    pub fn clear(&self) -> Result<commands::CmdResult> {
        commands::clear::run(&self.store)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn check(&self, fix: bool) -> Result<commands::CmdResult> {
        commands::check::run(&self.store, fix)
    }

    pub fn export(&self) -> Result<commands::CmdResult> {
        commands::export::run(&self.store)
    }

    pub fn import(&self, bundle: &Value, force: bool) -> Result<commands::CmdResult> {
        commands::import::run(&self.store, bundle, force)
    }

    pub fn paths<K: AsRef<str>>(&self, keys: &[K]) -> Result<commands::CmdResult> {
        let keys = parse_keys(keys)?;
        commands::paths::run(&self.store, &keys)
    }

    pub fn show_config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config, action)
    }
}

fn parse_keys<K: AsRef<str>>(inputs: &[K]) -> Result<Vec<StoreKey>> {
    inputs.iter().map(|k| StoreKey::new(k.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, KeyPaths, KeyedDoc, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;

    fn api() -> DashApi<MemTier, MemTier> {
        DashApi::new(
            TieredStore::with_durable(MemTier::fast(), MemTier::durable()),
            DashConfig::default(),
        )
    }

    #[test]
    fn set_then_get_dispatches() {
        let api = api();
        api.set("todos", &json!([]), false).unwrap();
        let res = api.get(&["todos"], None).unwrap();
        assert_eq!(res.documents[0].doc, json!([]));
    }

    #[test]
    fn invalid_keys_fail_before_dispatch() {
        let api = api();
        assert!(matches!(
            api.get(&["ok", "a/b"], None),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(api.set("", &json!(1), false).is_err());
    }

    #[test]
    fn list_and_remove() {
        let api = api();
        api.set("a", &json!(1), false).unwrap();
        api.set("b", &json!(2), false).unwrap();
        api.remove(&["a"]).unwrap();

        let res = api.list().unwrap();
        assert_eq!(res.entries.len(), 1);
        assert_eq!(res.entries[0].key.as_str(), "b");
    }

    #[test]
    fn export_import_between_stores() {
        let source = api();
        source.set("todos", &json!([{"id": "1", "text": "a"}]), false).unwrap();
        source.set("notes", &json!("hi"), false).unwrap();
        let bundle = source.export().unwrap().bundle();

        let target = api();
        target.import(&bundle, false).unwrap();
        assert_eq!(target.export().unwrap().bundle(), bundle);
    }

    #[test]
    fn from_config_without_durable_runs_fast_only() {
        let config = DashConfig {
            durable: false,
            ..Default::default()
        };
        let api = DashApi::from_config(config).unwrap();
        assert!(api.store().durable().is_none());
    }
}
