//! Whole-collection persistence for pipelines, leads and settings.
//!
//! Storage is a flat key-value space holding one JSON document per
//! collection under `{prefix}pipelines`, `{prefix}leads` and
//! `{prefix}settings`. Every save replaces the full document; there are no
//! partial updates and no transactions.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::models::{Lead, Pipeline, Settings};
use super::seed;

pub const DEFAULT_KEY_PREFIX: &str = "kanban_";

const PIPELINES_KEY: &str = "pipelines";
const LEADS_KEY: &str = "leads";
const SETTINGS_KEY: &str = "settings";

pub trait KeyValueBackend {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local backend. Used by tests and throwaway boards.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read board file: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write board file: {}", path.display()))?;
        Ok(())
    }
}

/// Typed load/save over a [`KeyValueBackend`].
#[derive(Debug, Clone)]
pub struct BoardStorage<B> {
    backend: B,
    prefix: String,
}

impl<B: KeyValueBackend> BoardStorage<B> {
    pub fn new(backend: B, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let key = self.key(name);
        match self.backend.get(&key)? {
            Some(json) => {
                let value = serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse stored {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        let key = self.key(name);
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", key))?;
        self.backend.set(&key, &json)
    }

    fn is_present(&self, name: &str) -> Result<bool> {
        Ok(self.backend.get(&self.key(name))?.is_some())
    }

    /// Seed every collection that has never been written. Returns whether
    /// anything was seeded.
    pub fn initialize(&mut self) -> Result<bool> {
        let mut seeded = false;
        if !self.is_present(SETTINGS_KEY)? {
            self.save_settings(&seed::default_settings())?;
            seeded = true;
        }
        if !self.is_present(PIPELINES_KEY)? {
            self.save_pipelines(&seed::default_pipelines())?;
            seeded = true;
        }
        if !self.is_present(LEADS_KEY)? {
            self.save_leads(&seed::sample_leads())?;
            seeded = true;
        }
        Ok(seeded)
    }

    /// Overwrite all three collections with the demo data.
    pub fn reset(&mut self) -> Result<()> {
        self.save_settings(&seed::default_settings())?;
        self.save_pipelines(&seed::default_pipelines())?;
        self.save_leads(&seed::sample_leads())?;
        Ok(())
    }

    pub fn load_pipelines(&self) -> Result<Vec<Pipeline>> {
        Ok(self.load(PIPELINES_KEY)?.unwrap_or_default())
    }

    pub fn save_pipelines(&mut self, pipelines: &[Pipeline]) -> Result<()> {
        self.save(PIPELINES_KEY, pipelines)
    }

    pub fn load_leads(&self) -> Result<Vec<Lead>> {
        Ok(self.load(LEADS_KEY)?.unwrap_or_default())
    }

    pub fn save_leads(&mut self, leads: &[Lead]) -> Result<()> {
        self.save(LEADS_KEY, leads)
    }

    pub fn load_settings(&self) -> Result<Settings> {
        Ok(self.load(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_KEY, settings)
    }
}

impl BoardStorage<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), DEFAULT_KEY_PREFIX)
    }
}
