// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trailing-edge debounce for validation scheduling.
//!
//! The window is an explicit deadline the caller polls with its own notion of
//! "now"; it never captures workspace state, so whoever fires it re-reads the
//! current active document and stale fires are harmless.

use std::time::{Duration, Instant};

/// Default window between the last edit and validation.
pub const VALIDATION_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    /// No edit seen since construction or the last cancel.
    Idle,
    /// An edit armed the deadline; a later edit supersedes it.
    Pending,
    /// The deadline fired and validation ran.
    Validated,
}

/// Trailing-edge debounce window.
#[derive(Debug, Clone)]
pub struct DebounceWindow {
    window: Duration,
    deadline: Option<Instant>,
    phase: DebouncePhase,
}

impl Default for DebounceWindow {
    fn default() -> Self {
        Self::new(VALIDATION_DEBOUNCE)
    }
}

impl DebounceWindow {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None, phase: DebouncePhase::Idle }
    }

    pub fn phase(&self) -> DebouncePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms (or re-arms) the deadline at `now + window`. The latest edit
    /// always wins.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
        self.phase = DebouncePhase::Pending;
    }

    /// Consumes the deadline if it is due. Returns `true` exactly once per
    /// armed window.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.phase = DebouncePhase::Validated;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.phase = DebouncePhase::Idle;
    }
}
