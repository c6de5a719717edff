// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary to the external DSL parser.
//!
//! Triton never implements the grammar itself. An embedding supplies a
//! [`DslParser`] that turns one document's source text into a sequence of
//! [`AstEntity`] values or fails with a [`ParseFailure`].

use std::collections::BTreeMap;
use std::fmt;

pub mod fixtures;

/// One-based source position carried by located parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

/// Top-level entity produced by the parser.
///
/// Triton only inspects `IntentDefinition` entities (a `None` argument list
/// means the intent has no explicit generation count); the remaining variants
/// exist so adapters and embeddings can share the same AST boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstEntity {
    IntentDefinition {
        key: String,
        args: Option<BTreeMap<String, String>>,
    },
    SlotDefinition {
        key: String,
        args: Option<BTreeMap<String, String>>,
    },
    AliasDefinition {
        key: String,
    },
    ImportFile {
        path: String,
    },
    Comment {
        text: String,
    },
}

/// Structured parser failure.
///
/// `Display` renders either `"<Name>: <description>"` or, when a location is
/// present, `"<Name>: <description> Line: <L>, Column: <C>"` — the exact form
/// surfaced inline in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    name: String,
    message: String,
    location: Option<SourceLocation>,
}

impl ParseFailure {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), message: message.into(), location: None }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(SourceLocation { line, column }) => {
                write!(f, "{}: {} Line: {line}, Column: {column}", self.name, self.message)
            }
            None => write!(f, "{}: {}", self.name, self.message),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// External parser collaborator.
pub trait DslParser {
    fn parse(&self, source: &str) -> Result<Vec<AstEntity>, ParseFailure>;
}

#[cfg(test)]
mod tests {
    use super::{ParseFailure, SourceLocation};

    #[test]
    fn display_without_location() {
        let failure = ParseFailure::new("Error", "something broke");
        assert_eq!(failure.to_string(), "Error: something broke");
    }

    #[test]
    fn display_with_location() {
        let failure = ParseFailure::new("SyntaxError", "Expected sentence")
            .with_location(SourceLocation { line: 3, column: 5 });
        assert_eq!(failure.to_string(), "SyntaxError: Expected sentence Line: 3, Column: 5");
    }
}
