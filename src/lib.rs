// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Triton — headless workspace core for Chatito-style DSL authoring.
//!
//! The crate owns the multi-document model, debounced validation, the dataset
//! compilation pipeline and snapshot persistence. Parser, output adapters,
//! editor surface and download mechanism are injected at trait boundaries.

pub mod compile;
pub mod debounce;
pub mod dsl;
pub mod model;
pub mod store;
pub mod validate;
pub mod workspace;
