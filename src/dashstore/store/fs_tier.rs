use super::{Tier, TierKind};
use crate::error::{Result, StoreError};
use crate::key::StoreKey;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Durable tier: one `<key>.json` file per key under a root directory.
pub struct FsTier {
    root: PathBuf,
    pretty: bool,
}

impl FsTier {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
        }
    }

    /// Pretty-print documents on write. Compact output when false.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    fn key_path(&self, key: &StoreKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn ensure_root(&self) -> io::Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Reformat the document text according to the `pretty` setting.
    /// Text that does not parse is written verbatim.
    fn render(&self, raw: &str) -> String {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) else {
            return raw.to_string();
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_else(|_| raw.to_string())
    }

    fn read_error(&self, key: &StoreKey, source: io::Error) -> StoreError {
        StoreError::Read {
            key: key.to_string(),
            tier: TierKind::Durable,
            source,
        }
    }

    fn write_error(&self, key: &StoreKey, source: io::Error) -> StoreError {
        StoreError::Write {
            key: key.to_string(),
            tier: TierKind::Durable,
            source,
        }
    }
}

impl Tier for FsTier {
    fn kind(&self) -> TierKind {
        TierKind::Durable
    }

    /// The root is usable if it is a directory or can still be created.
    fn is_available(&self) -> bool {
        if self.root.exists() {
            return self.root.is_dir();
        }
        // Walk up to the nearest existing ancestor; it must be a directory.
        // A bare relative root ends at "", which is the working directory.
        self.root
            .ancestors()
            .skip(1)
            .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
            .find(|p| p.exists())
            .map(|p| p.is_dir())
            .unwrap_or(false)
    }

    fn read(&self, key: &StoreKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.read_error(key, e)),
        }
    }

    fn write(&self, key: &StoreKey, raw: &str) -> Result<()> {
        self.ensure_root().map_err(|e| self.write_error(key, e))?;

        let target = self.key_path(key);
        let content = self.render(raw);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(|e| self.write_error(key, e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_error(key, e));
        }
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(key, e)),
        }
    }

    fn clear(&self) -> Result<usize> {
        let keys = self.keys()?;
        for key in &keys {
            self.remove(key)?;
        }
        Ok(keys.len())
    }

    fn keys(&self) -> Result<Vec<StoreKey>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(key) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(StoreKey::from_file_name)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn modified(&self, key: &StoreKey) -> Result<Option<DateTime<Utc>>> {
        let path = self.key_path(key);
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.modified().ok().map(DateTime::<Utc>::from)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.read_error(key, e)),
        }
    }

    fn location(&self, key: &StoreKey) -> PathBuf {
        self.key_path(key)
    }
}
