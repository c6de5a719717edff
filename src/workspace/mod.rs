// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Workspace orchestration.
//!
//! [`Workspace`] owns the document store, tab selection, validation state and
//! generator settings, and wires user/timer events to the debounce window,
//! the compile pipeline and persistence. Everything runs on one thread in
//! response to discrete events; the only suspension points are the debounce
//! window, the sequential adapter awaits and the export stagger.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::compile::{compile, AdapterRegistry, CompileConfig};
use crate::debounce::{DebouncePhase, DebounceWindow};
use crate::dsl::DslParser;
use crate::model::{
    AutoAliasPolicy, Distribution, Document, DocumentStore, GeneratorSettings, OutputFormat,
};
use crate::store::{self, KeyValueStore, NullStore};
use crate::validate::{validate, ValidationOutcome};

/// MIME type of both export artifacts.
pub const DATASET_MIME: &str = "text/json;charset=utf-8";

/// Default delay between the two export hand-offs, for sinks that cannot
/// initiate two downloads in the same tick.
pub const DOWNLOAD_STAGGER: Duration = Duration::from_millis(100);

/// Injected confirmation/notice capability.
pub trait UserDialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Headless fallback: confirmations deny, notices vanish.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessDialogs;

impl UserDialogs for HeadlessDialogs {
    fn confirm(&self, _message: &str) -> bool {
        false
    }

    fn alert(&self, _message: &str) {}
}

/// One named export blob handed to the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

/// Injected download capability.
pub trait ArtifactSink {
    fn deliver(&mut self, artifact: ExportArtifact);
}

/// Top-level workspace controller.
pub struct Workspace {
    documents: DocumentStore,
    active_index: usize,
    validation: ValidationOutcome,
    settings: GeneratorSettings,
    drawer_open: bool,
    preview: Option<Value>,
    debounce: DebounceWindow,
    parser: Box<dyn DslParser>,
    adapters: AdapterRegistry,
    persistence: Box<dyn KeyValueStore>,
    dialogs: Box<dyn UserDialogs>,
    download_stagger: Duration,
}

impl Workspace {
    /// Builds a workspace with the default document set, a no-op persistence
    /// store and headless dialogs. Use the `with_*` builders to inject real
    /// capabilities, then [`Workspace::restore`] to load a snapshot.
    pub fn new(parser: impl DslParser + 'static, adapters: AdapterRegistry) -> Self {
        Self {
            documents: DocumentStore::default(),
            active_index: 0,
            validation: ValidationOutcome::Clean,
            settings: GeneratorSettings::default(),
            drawer_open: false,
            preview: None,
            debounce: DebounceWindow::default(),
            parser: Box::new(parser),
            adapters,
            persistence: Box::new(NullStore),
            dialogs: Box::new(HeadlessDialogs),
            download_stagger: DOWNLOAD_STAGGER,
        }
    }

    pub fn with_persistence(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.persistence = Box::new(store);
        self
    }

    pub fn with_dialogs(mut self, dialogs: impl UserDialogs + 'static) -> Self {
        self.dialogs = Box::new(dialogs);
        self
    }

    pub fn with_download_stagger(mut self, stagger: Duration) -> Self {
        self.download_stagger = stagger;
        self
    }

    /* ---- state access ---- */

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.documents.get(self.active_index)
    }

    pub fn validation(&self) -> &ValidationOutcome {
        &self.validation
    }

    pub fn validation_pending(&self) -> bool {
        self.debounce.phase() == DebouncePhase::Pending
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    /// Training dataset shown in the drawer after a successful export.
    pub fn preview(&self) -> Option<&Value> {
        self.preview.as_ref()
    }

    /* ---- persistence ---- */

    /// Re-reads the persisted snapshot through the configured store. A
    /// missing or corrupt store leaves the built-in defaults in place.
    pub fn restore(&mut self) {
        let loaded = store::load_workspace(self.persistence.as_ref());
        self.documents = DocumentStore::new(loaded.documents);
        self.settings = loaded.settings;
        self.active_index = 0;
        self.validation = ValidationOutcome::Clean;
        self.preview = None;
        self.debounce.cancel();
    }

    fn persist_documents(&mut self) {
        if let Err(err) = store::save_documents(self.persistence.as_mut(), self.documents.documents())
        {
            tracing::warn!(error = %err, "cannot persist document list");
        }
    }

    fn persist_settings(&mut self) {
        if let Err(err) = store::save_settings(self.persistence.as_mut(), &self.settings) {
            tracing::warn!(error = %err, "cannot persist generator settings");
        }
    }

    /* ---- editing ---- */

    /// Text-change event from the editor surface for the active document.
    /// Arms (or re-arms) the validation debounce; the latest text wins.
    pub fn on_edit(&mut self, text: &str, now: Instant) {
        self.documents.update_text(self.active_index, text);
        self.preview = None;
        self.debounce.note_edit(now);
    }

    /// Drives the debounce window. Returns `true` when the window fired.
    ///
    /// The active document is re-read here, at fire time, so a fire scheduled
    /// before a tab switch validates the now-active document instead of a
    /// stale capture.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        if !self.debounce.fire_due(now) {
            return false;
        }
        let text = match self.documents.get(self.active_index) {
            Some(document) => document.text().to_owned(),
            None => String::new(),
        };
        if text.is_empty() {
            self.validation = ValidationOutcome::Clean;
            return true;
        }
        self.validation = validate(self.parser.as_ref(), &text);
        // Edited text is persisted here rather than on every keystroke; the
        // settings snapshot rides along so the last editing state survives.
        self.persist_documents();
        self.persist_settings();
        true
    }

    /* ---- tabs ---- */

    pub fn select_document(&mut self, index: usize) {
        self.active_index = index.min(self.documents.len().saturating_sub(1));
    }

    /// Appends a new empty document titled `<name>.chatito`, selects it and
    /// persists the document list. Unique names are the caller's obligation.
    pub fn add_document(&mut self, name: &str) -> usize {
        let index = self.documents.add(format!("{name}.chatito"), "");
        self.active_index = index;
        self.persist_documents();
        index
    }

    /// Removes the document at `index` after confirming when it has text.
    /// Returns `false` when the index is out of range or the user declined.
    pub fn remove_document(&mut self, index: usize) -> bool {
        let confirmed = match self.documents.get(index) {
            None => return false,
            Some(document) if document.text().is_empty() => true,
            Some(document) => self
                .dialogs
                .confirm(&format!("Do you really want to remove '{}'?", document.title())),
        };
        if !confirmed {
            return false;
        }

        if self.active_index == index && self.active_index > 0 {
            self.active_index -= 1;
        }
        self.documents.remove(index);
        self.active_index = self.active_index.min(self.documents.len() - 1);
        self.persist_documents();
        true
    }

    /* ---- generator settings ---- */

    pub fn set_format(&mut self, format: OutputFormat) {
        self.settings.set_format(format);
        self.preview = None;
        self.persist_settings();
    }

    pub fn set_use_custom_options(&mut self, enabled: bool) {
        self.settings.set_use_custom_options(enabled);
        self.preview = None;
        self.persist_settings();
    }

    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.settings.set_distribution(distribution);
        self.preview = None;
        self.persist_settings();
    }

    pub fn set_auto_aliases(&mut self, policy: AutoAliasPolicy) {
        self.settings.set_auto_aliases(policy);
        self.preview = None;
        self.persist_settings();
    }

    pub fn edit_custom_options(&mut self, options: Value) {
        self.settings.set_custom_options(options);
        self.persist_settings();
    }

    /* ---- export ---- */

    /// Pre-export gate: validates every non-empty document in store order.
    /// On the first error the offending document becomes active, its outcome
    /// is published, a blocking notice is raised and the drawer stays closed.
    pub fn open_generator(&mut self) -> bool {
        if self.drawer_open {
            return true;
        }
        for index in 0..self.documents.len() {
            let outcome = {
                let Some(document) = self.documents.get(index) else {
                    continue;
                };
                if document.text().is_empty() {
                    continue;
                }
                validate(self.parser.as_ref(), document.text())
            };
            if outcome.blocks_export() {
                self.active_index = index;
                self.validation = outcome;
                self.dialogs.alert("Please fix the errors found in the code.");
                return false;
            }
        }
        self.drawer_open = true;
        true
    }

    pub fn close_generator(&mut self) {
        self.drawer_open = false;
        self.preview = None;
    }

    /// Compiles all documents with the selected adapter and hands the two
    /// resulting artifacts to `sink`, the second one after a short stagger.
    ///
    /// On failure the drawer closes, the failing document becomes active and
    /// the adapter's message is surfaced; no partial output is retained.
    pub async fn export(&mut self, sink: &mut dyn ArtifactSink) {
        let Some(adapter) = self.adapters.get(self.settings.format()) else {
            tracing::warn!(
                format = %self.settings.format(),
                "no adapter registered for the selected format"
            );
            return;
        };
        let config = CompileConfig {
            distribution: self.settings.distribution(),
            auto_aliases: self.settings.auto_aliases(),
        };

        let result =
            compile(&self.documents, adapter, self.settings.effective_custom_options(), config)
                .await;

        match result {
            Ok(output) => {
                sink.deliver(ExportArtifact {
                    filename: format!("training_dataset_{}.json", unix_timestamp_seconds()),
                    mime: DATASET_MIME,
                    body: serde_json::to_string(&output.training).unwrap_or_default(),
                });
                tokio::time::sleep(self.download_stagger).await;
                sink.deliver(ExportArtifact {
                    filename: format!("testing_dataset_{}.json", unix_timestamp_seconds()),
                    mime: DATASET_MIME,
                    body: serde_json::to_string(&output.testing).unwrap_or_default(),
                });
                self.preview = Some(output.training);
            }
            Err(err) => {
                tracing::warn!(
                    document_index = err.document_index(),
                    error = %err,
                    "dataset compilation failed"
                );
                let message = err.message();
                self.preview = None;
                self.drawer_open = false;
                self.select_document(err.document_index());
                self.validation = ValidationOutcome::Error(message.clone());
                self.dialogs.alert(&format!("Please fix error: {message}"));
            }
        }
    }
}

fn unix_timestamp_seconds() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
