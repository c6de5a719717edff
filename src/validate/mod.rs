// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-document validation against the external parser.

use crate::dsl::{AstEntity, DslParser};

/// Result of validating one document's text.
///
/// A warning and an error are mutually exclusive; the absence of both is
/// clean. Outcomes are derived for the latest edit only, never stored per
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationOutcome {
    #[default]
    Clean,
    Warning(String),
    Error(String),
}

impl ValidationOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Clean => None,
            Self::Warning(message) | Self::Error(message) => Some(message),
        }
    }

    /// Only errors block the export gate; warnings surface inline but do not.
    pub fn blocks_export(&self) -> bool {
        self.is_error()
    }
}

/// Validates `source` with the given parser.
///
/// Empty text is defined as clean without running the parser. A successful
/// parse still warns when a top-level intent definition carries no explicit
/// generation-count argument; the warning names the first such intent and
/// shows the fix syntax.
pub fn validate(parser: &dyn DslParser, source: &str) -> ValidationOutcome {
    if source.is_empty() {
        return ValidationOutcome::Clean;
    }
    match parser.parse(source) {
        Ok(entities) => {
            let uncounted = entities.iter().find_map(|entity| match entity {
                AstEntity::IntentDefinition { key, args: None } => Some(key.as_str()),
                _ => None,
            });
            match uncounted {
                Some(key) => ValidationOutcome::Warning(format!(
                    "Warning: Limit the number of generated examples for intents. \
                     E.g.: %[{key}]('training': '100')"
                )),
                None => ValidationOutcome::Clean,
            }
        }
        Err(failure) => ValidationOutcome::Error(failure.to_string()),
    }
}

#[cfg(test)]
mod tests;
