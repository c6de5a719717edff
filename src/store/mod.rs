// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Best-effort workspace persistence.
//!
//! The snapshot is five independently written string entries in a key-value
//! store. Writes are non-transactional; the loader defaults every
//! individually missing or malformed entry, so a partial snapshot or an
//! absent store degrades gracefully instead of failing the workspace.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{
    default_documents, AutoAliasPolicy, Distribution, Document, GeneratorSettings, OutputFormat,
};

pub const KEY_DOCUMENTS: &str = "___tabs";
pub const KEY_CUSTOM_OPTIONS: &str = "___adapterOptions";
pub const KEY_FORMAT: &str = "___currentAdapter";
pub const KEY_DISTRIBUTION: &str = "___defaultDistribution";
pub const KEY_AUTO_ALIASES: &str = "___autoAliases";

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Injected key-value persistence capability.
///
/// Implementations are single-client and advisory; callers treat every
/// operation as fallible and never surface failures to the user.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, mainly for tests and ephemeral embeddings.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Fallback for embeddings without any persistence: reads absent, writes
/// vanish.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// File-backed store: one file per key under a directory.
///
/// A missing directory or entry file reads as absent; the directory is
/// created on first write.
#[derive(Debug, Clone)]
pub struct FolderStore {
    dir: PathBuf,
}

impl FolderStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FolderStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        let path = self.entry_path(key);
        fs::write(&path, value).map_err(|source| StoreError::Io { path, source })
    }
}

/// Wire form of one document in the persisted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub title: String,
    pub value: String,
}

impl From<&Document> for PersistedDocument {
    fn from(document: &Document) -> Self {
        Self { title: document.title().to_owned(), value: document.text().to_owned() }
    }
}

impl From<PersistedDocument> for Document {
    fn from(persisted: PersistedDocument) -> Self {
        Document::new(persisted.title, persisted.value)
    }
}

/// Writes the full document list under [`KEY_DOCUMENTS`].
pub fn save_documents(
    store: &mut dyn KeyValueStore,
    documents: &[Document],
) -> Result<(), StoreError> {
    let persisted: Vec<PersistedDocument> =
        documents.iter().map(PersistedDocument::from).collect();
    let json = serde_json::to_string(&persisted).unwrap_or_default();
    store.set(KEY_DOCUMENTS, &json)
}

/// Writes the four settings entries, each independently.
///
/// Custom options persist as an empty string while not in use ("unset"); the
/// document list is deliberately not touched here.
pub fn save_settings(
    store: &mut dyn KeyValueStore,
    settings: &GeneratorSettings,
) -> Result<(), StoreError> {
    let options = match (settings.use_custom_options(), settings.custom_options()) {
        (true, Some(options)) => serde_json::to_string(options).unwrap_or_default(),
        _ => String::new(),
    };
    store.set(KEY_CUSTOM_OPTIONS, &options)?;
    store.set(KEY_DISTRIBUTION, settings.distribution().as_str())?;
    store.set(KEY_AUTO_ALIASES, settings.auto_aliases().as_str())?;
    store.set(KEY_FORMAT, settings.format().as_str())
}

/// Snapshot restored from the store, with defaults filled in per key.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkspace {
    pub documents: Vec<Document>,
    pub settings: GeneratorSettings,
}

impl Default for LoadedWorkspace {
    fn default() -> Self {
        Self { documents: default_documents(), settings: GeneratorSettings::default() }
    }
}

fn read_entry(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(entry) => entry,
        Err(err) => {
            tracing::warn!(key, error = %err, "persisted entry unavailable, using default");
            None
        }
    }
}

/// Restores the workspace snapshot.
///
/// Never fails: each entry that is missing, unreadable or malformed falls
/// back to its in-memory default independently of the others.
pub fn load_workspace(store: &dyn KeyValueStore) -> LoadedWorkspace {
    let mut loaded = LoadedWorkspace::default();

    if let Some(raw) = read_entry(store, KEY_DOCUMENTS) {
        match serde_json::from_str::<Vec<PersistedDocument>>(&raw) {
            Ok(persisted) if !persisted.is_empty() => {
                loaded.documents = persisted.into_iter().map(Document::from).collect();
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "malformed persisted document list, using default");
            }
        }
    }

    if let Some(raw) = read_entry(store, KEY_CUSTOM_OPTIONS) {
        if !raw.is_empty() {
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(options) => loaded.settings.restore_custom_options(options),
                Err(err) => {
                    tracing::warn!(error = %err, "malformed persisted custom options, ignoring");
                }
            }
        }
    }

    if let Some(raw) = read_entry(store, KEY_FORMAT) {
        if let Some(format) = OutputFormat::parse(&raw) {
            // The setter reseeds enabled custom options with format defaults;
            // a restored snapshot must keep the restored object instead.
            let options = loaded.settings.custom_options().cloned();
            loaded.settings.set_format(format);
            if let Some(options) = options {
                loaded.settings.set_custom_options(options);
            }
        }
    }

    if let Some(raw) = read_entry(store, KEY_DISTRIBUTION) {
        if let Some(distribution) = Distribution::parse(&raw) {
            loaded.settings.set_distribution(distribution);
        }
    }

    if let Some(raw) = read_entry(store, KEY_AUTO_ALIASES) {
        if let Some(policy) = AutoAliasPolicy::parse(&raw) {
            loaded.settings.set_auto_aliases(policy);
        }
    }

    loaded
}
