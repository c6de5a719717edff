// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scriptable parser stub for tests and headless embedding demos.

use std::collections::BTreeMap;

use super::{AstEntity, DslParser, ParseFailure};

/// Parser keyed by exact source text.
///
/// Unmapped sources parse to an empty entity sequence (a clean document), so
/// only the interesting inputs need scripting.
#[derive(Debug, Clone, Default)]
pub struct MappedParser {
    outcomes: BTreeMap<String, Result<Vec<AstEntity>, ParseFailure>>,
}

impl MappedParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, source: impl Into<String>, entities: Vec<AstEntity>) -> Self {
        self.outcomes.insert(source.into(), Ok(entities));
        self
    }

    pub fn err(mut self, source: impl Into<String>, failure: ParseFailure) -> Self {
        self.outcomes.insert(source.into(), Err(failure));
        self
    }

    /// Convenience for the common case: one intent definition, optionally
    /// without an explicit generation-count argument.
    pub fn intent(self, source: impl Into<String>, key: &str, counted: bool) -> Self {
        let args = counted.then(|| {
            let mut args = BTreeMap::new();
            args.insert("training".to_owned(), "100".to_owned());
            args
        });
        self.ok(source, vec![AstEntity::IntentDefinition { key: key.to_owned(), args }])
    }
}

impl DslParser for MappedParser {
    fn parse(&self, source: &str) -> Result<Vec<AstEntity>, ParseFailure> {
        match self.outcomes.get(source) {
            Some(outcome) => outcome.clone(),
            None => Ok(Vec::new()),
        }
    }
}
