// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Workspaces contain an ordered set of documents ("tabs") plus the dataset
//! generator settings (output format, custom options, distribution policy).

pub mod document;
pub mod settings;

pub use document::{default_documents, Document, DocumentStore, DEFAULT_DOCUMENT_TITLE};
pub use settings::{AutoAliasPolicy, Distribution, GeneratorSettings, OutputFormat};
