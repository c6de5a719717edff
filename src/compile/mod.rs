// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-document dataset compilation.
//!
//! Documents compile strictly in store order; each adapter call receives the
//! primary dataset accumulated so far, so there is a left-to-right data
//! dependency chain and documents are never compiled concurrently. The first
//! failure aborts the pipeline and any partial output is discarded.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::model::{AutoAliasPolicy, Distribution, DocumentStore, OutputFormat};

/// Generation policies threaded explicitly into every adapter call.
///
/// Deliberately a value argument rather than ambient parser configuration, so
/// compile runs cannot observe each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileConfig {
    pub distribution: Distribution,
    pub auto_aliases: AutoAliasPolicy,
}

/// Result of resolving a cross-document import.
///
/// `path` is always empty: no real filesystem backs the workspace, and
/// adapters must not depend on it being meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub path: String,
    pub source: String,
}

/// Import target has no matching document title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportNotFound {
    import_path: String,
}

impl ImportNotFound {
    pub fn new(import_path: impl Into<String>) -> Self {
        Self { import_path: import_path.into() }
    }

    pub fn import_path(&self) -> &str {
        &self.import_path
    }
}

impl fmt::Display for ImportNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Can't import {}. Not found.", self.import_path)
    }
}

impl std::error::Error for ImportNotFound {}

/// Resolves an import request raised by an adapter while compiling one
/// document.
pub trait ImportResolver {
    fn resolve(
        &self,
        requesting_title: &str,
        import_path: &str,
    ) -> Result<ResolvedImport, ImportNotFound>;
}

/// Import resolver backed by the document store: a leading `./` is stripped
/// and the remainder is matched against document titles.
#[derive(Debug, Clone, Copy)]
pub struct StoreImportResolver<'a> {
    store: &'a DocumentStore,
}

impl<'a> StoreImportResolver<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }
}

impl ImportResolver for StoreImportResolver<'_> {
    fn resolve(
        &self,
        _requesting_title: &str,
        import_path: &str,
    ) -> Result<ResolvedImport, ImportNotFound> {
        let title = import_path.strip_prefix("./").unwrap_or(import_path);
        let Some(document) = self.store.find_by_title(title) else {
            return Err(ImportNotFound::new(import_path));
        };
        Ok(ResolvedImport { path: String::new(), source: document.text().to_owned() })
    }
}

/// One adapter invocation: a document's source text plus the accumulated
/// pipeline state.
pub struct AdapterRequest<'a> {
    /// Title of the document being compiled (the resolver's requesting
    /// document).
    pub title: &'a str,
    /// Source text of the document being compiled.
    pub source: &'a str,
    /// Primary dataset accumulated from earlier documents (custom options for
    /// the first document when enabled, `None` otherwise).
    pub seed: Option<Value>,
    /// Resolver for `import` statements in the source.
    pub resolver: &'a dyn ImportResolver,
    /// Base path for imports; always empty in this workspace.
    pub base_path: &'a str,
    pub config: CompileConfig,
}

/// Adapter output for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterOutput {
    pub training: Value,
    pub testing: Value,
}

/// Failure raised by an adapter for one document.
#[derive(Debug)]
pub enum AdapterError {
    ImportNotFound(ImportNotFound),
    Failed { message: String },
}

impl AdapterError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into() }
    }
}

impl From<ImportNotFound> for AdapterError {
    fn from(source: ImportNotFound) -> Self {
        Self::ImportNotFound(source)
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImportNotFound(source) => source.fmt(f),
            Self::Failed { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImportNotFound(source) => Some(source),
            Self::Failed { .. } => None,
        }
    }
}

pub type AdapterFuture<'a> = Pin<Box<dyn Future<Output = Result<AdapterOutput, AdapterError>> + 'a>>;

/// External output-format adapter.
///
/// Invocations are awaited one at a time; an adapter only ever sees the fully
/// accumulated state of the documents before it.
pub trait DatasetAdapter {
    fn generate<'a>(&'a self, request: AdapterRequest<'a>) -> AdapterFuture<'a>;
}

/// Format → adapter map assembled by the embedding.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: BTreeMap<OutputFormat, Box<dyn DatasetAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, format: OutputFormat, adapter: impl DatasetAdapter + 'static) {
        self.adapters.insert(format, Box::new(adapter));
    }

    pub fn get(&self, format: OutputFormat) -> Option<&dyn DatasetAdapter> {
        self.adapters.get(&format).map(Box::as_ref)
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("formats", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Deep-merges `incoming` into `target`.
///
/// Object keys merge recursively; any non-object leaf (scalars and arrays)
/// overwrites, so on key collisions the later value wins.
pub fn merge_deep(target: &mut Value, incoming: &Value) {
    match (target, incoming) {
        (Value::Object(target_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                let merged = match target_map.get_mut(key) {
                    Some(slot) if slot.is_object() && value.is_object() => {
                        merge_deep(slot, value);
                        true
                    }
                    _ => false,
                };
                if !merged {
                    target_map.insert(key.clone(), value.clone());
                }
            }
        }
        (target, incoming) => *target = incoming.clone(),
    }
}

/// Final pipeline output: the primary (training) dataset and the deep-merged
/// secondary (testing) dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
    pub training: Value,
    pub testing: Value,
}

/// Pipeline abort: the adapter failed for the document at `document_index`.
#[derive(Debug)]
pub struct CompileError {
    document_index: usize,
    document_title: String,
    source: AdapterError,
}

impl CompileError {
    pub fn document_index(&self) -> usize {
        self.document_index
    }

    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    /// The adapter's own message, suitable for surfacing to the user.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot compile document '{}' (index {}): {}",
            self.document_title, self.document_index, self.source
        )
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Compiles every document in store order.
///
/// The first document's call is seeded with a deep copy of `custom_options`
/// when present, so user-supplied base options survive into the adapter chain
/// but are injected only once. Each adapter's `training` fully replaces the
/// primary dataset; `testing` deep-merges into the secondary dataset. The
/// pipeline introduces no randomness: re-running it on an unchanged store and
/// settings yields identical output.
pub async fn compile(
    store: &DocumentStore,
    adapter: &dyn DatasetAdapter,
    custom_options: Option<&Value>,
    config: CompileConfig,
) -> Result<CompileOutput, CompileError> {
    let resolver = StoreImportResolver::new(store);
    let mut primary: Option<Value> = None;
    let mut secondary = Value::Object(Map::new());

    for (index, document) in store.iter().enumerate() {
        if primary.is_none() {
            if let Some(options) = custom_options {
                primary = Some(options.clone());
            }
        }

        let request = AdapterRequest {
            title: document.title(),
            source: document.text(),
            seed: primary.take(),
            resolver: &resolver,
            base_path: "",
            config,
        };

        let output = adapter.generate(request).await.map_err(|source| CompileError {
            document_index: index,
            document_title: document.title().to_owned(),
            source,
        })?;

        primary = Some(output.training);
        merge_deep(&mut secondary, &output.testing);
    }

    Ok(CompileOutput { training: primary.unwrap_or(Value::Null), testing: secondary })
}
