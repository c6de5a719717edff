// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Title given to the document that replaces the last remaining tab.
pub const DEFAULT_DOCUMENT_TITLE: &str = "newFile.chatito";

/// One DSL source document ("tab").
///
/// The title doubles as the import key for cross-document imports, so callers
/// adding documents are expected to keep titles unique within the workspace;
/// lookups are first-match on duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    text: String,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Ordered collection of documents. Never empty: removing the sole remaining
/// document replaces it with an empty default instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self { documents: default_documents() }
    }
}

impl DocumentStore {
    /// Builds a store from an explicit document list. An empty list falls
    /// back to the built-in default set.
    pub fn new(documents: Vec<Document>) -> Self {
        if documents.is_empty() {
            return Self::default();
        }
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    /// Appends a document and returns its index. Title uniqueness is the
    /// caller's obligation.
    pub fn add(&mut self, title: impl Into<String>, text: impl Into<String>) -> usize {
        self.documents.push(Document::new(title, text));
        self.documents.len() - 1
    }

    /// Replaces the text of the document at `index`. Returns `false` when the
    /// index is out of range.
    pub fn update_text(&mut self, index: usize, text: impl Into<String>) -> bool {
        let Some(document) = self.documents.get_mut(index) else {
            return false;
        };
        document.set_text(text);
        true
    }

    /// Removes the document at `index`. Removing the last remaining document
    /// reinserts an empty default so the store never drains. Returns `false`
    /// when the index is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.documents.len() {
            return false;
        }
        self.documents.remove(index);
        if self.documents.is_empty() {
            self.documents.push(Document::new(DEFAULT_DOCUMENT_TITLE, ""));
        }
        true
    }

    /// First document whose trimmed title equals `title`.
    pub fn find_by_title(&self, title: &str) -> Option<&Document> {
        self.documents.iter().find(|document| document.title.trim() == title)
    }
}

/// Built-in document set used when no persisted snapshot exists.
pub fn default_documents() -> Vec<Document> {
    let sample = "\
%[greet]('training': '50')
    ~[hi] @[name?] ~[whatsUp?]

~[hi]
    hi
    hey
    hello

~[whatsUp]
    whats up
    how is it going

@[name]
    Janis
    Bob
";
    vec![Document::new("examples.chatito", sample)]
}
