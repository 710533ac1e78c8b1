//! Registry of document shapes for the well-known keys.
//!
//! Keys missing from the registry hold free-form JSON and always validate.

use crate::error::{Result, StoreError};
use crate::key::DocKey;
use crate::model::keys;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct KeySchema {
    pub key: &'static str,
    pub description: &'static str,
    check: fn(&Value) -> std::result::Result<(), serde_json::Error>,
}

impl KeySchema {
    fn of<T: DeserializeOwned>(key: DocKey<T>, description: &'static str) -> Self {
        Self {
            key: key.name(),
            description,
            check: |value| serde_json::from_value::<T>(value.clone()).map(|_| ()),
        }
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        (self.check)(value).map_err(|source| StoreError::Schema {
            key: self.key.to_string(),
            source,
        })
    }
}

static REGISTRY: Lazy<BTreeMap<&'static str, KeySchema>> = Lazy::new(|| {
    [
        KeySchema::of(keys::TODOS, "Todo list items"),
        KeySchema::of(keys::CALENDAR_EVENTS, "Calendar events"),
        KeySchema::of(keys::REMINDERS, "Dated reminders"),
        KeySchema::of(keys::SCHEDULER_EVENTS, "Scheduled time blocks"),
        KeySchema::of(keys::YOUTUBE_LINKS, "Saved YouTube videos"),
        KeySchema::of(keys::DAILY_FOCUS, "Today's focus tasks"),
        KeySchema::of(keys::APP_SETTINGS, "Application preferences"),
        KeySchema::of(keys::POMODORO_SETTINGS, "Pomodoro timer settings"),
        KeySchema::of(keys::POMODORO_HISTORY, "Completed pomodoros"),
        KeySchema::of(keys::DASHBOARD_DATA, "Daily worked-time summary"),
        KeySchema::of(keys::TIME_TRACKING_ACTIVITIES, "Tracked activities"),
        KeySchema::of(keys::CURRENT_ACTIVITY, "Activity being timed"),
    ]
    .into_iter()
    .map(|schema| (schema.key, schema))
    .collect()
});

pub fn lookup(key: &str) -> Option<&'static KeySchema> {
    REGISTRY.get(key)
}

/// Validate `value` against the shape registered for `key`, if any.
pub fn validate(key: &str, value: &Value) -> Result<()> {
    match lookup(key) {
        Some(schema) => schema.validate(value),
        None => Ok(()),
    }
}

pub fn registered() -> impl Iterator<Item = &'static KeySchema> {
    REGISTRY.values()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_model_key_is_registered() {
        assert_eq!(registered().count(), 12);
        assert!(lookup("todos").is_some());
        assert!(lookup("current-activity").is_some());
    }

    #[test]
    fn unknown_keys_always_validate() {
        assert!(validate("scratch", &json!({"anything": [1, "two"]})).is_ok());
    }

    #[test]
    fn accepts_matching_documents() {
        assert!(validate("todos", &json!([{"id": "1", "text": "a", "completed": false}])).is_ok());
        assert!(validate("todos", &json!([])).is_ok());
        assert!(validate("current-activity", &json!(null)).is_ok());
        assert!(validate("app-settings", &json!({})).is_ok());
    }

    #[test]
    fn rejects_divergent_documents() {
        let err = validate("todos", &json!({"todos": []})).unwrap_err();
        assert!(matches!(err, StoreError::Schema { ref key, .. } if key == "todos"));
        assert!(validate("daily-focus", &json!([1, 2])).is_err());
    }
}
