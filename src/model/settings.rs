// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dataset generator settings (adapter selection state).

use std::fmt;

use serde_json::{json, Value};

/// Output adapter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutputFormat {
    Default,
    Rasa,
    Snips,
    Luis,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] =
        [OutputFormat::Default, OutputFormat::Rasa, OutputFormat::Snips, OutputFormat::Luis];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Rasa => "rasa",
            Self::Snips => "snips",
            Self::Luis => "luis",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == value)
    }

    /// Documented default custom-option object for this format. Only rasa and
    /// snips define non-empty defaults.
    pub fn default_custom_options(&self) -> Value {
        match self {
            Self::Rasa => json!({
                "rasa_nlu_data": {
                    "regex_features": [],
                    "entity_synonyms": []
                }
            }),
            Self::Snips => json!({ "language": "en" }),
            Self::Default | Self::Luis => json!({}),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frequency distribution applied when sentences carry no explicit weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Distribution {
    #[default]
    Regular,
    Even,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Even => "even",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "regular" => Some(Self::Regular),
            "even" => Some(Self::Even),
            _ => None,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the generator treats aliases that were never declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoAliasPolicy {
    #[default]
    Allow,
    Warn,
    Restrict,
}

impl AutoAliasPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Warn => "warn",
            Self::Restrict => "restrict",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "allow" => Some(Self::Allow),
            "warn" => Some(Self::Warn),
            "restrict" => Some(Self::Restrict),
            _ => None,
        }
    }
}

impl fmt::Display for AutoAliasPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter selection state for dataset generation.
///
/// `custom_options` is only meaningful while `use_custom_options` is true;
/// switching format or enabling custom options reseeds it with the selected
/// format's documented defaults, discarding prior edits.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    format: OutputFormat,
    use_custom_options: bool,
    custom_options: Option<Value>,
    distribution: Distribution,
    auto_aliases: AutoAliasPolicy,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Default,
            use_custom_options: false,
            custom_options: None,
            distribution: Distribution::Regular,
            auto_aliases: AutoAliasPolicy::Allow,
        }
    }
}

impl GeneratorSettings {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn use_custom_options(&self) -> bool {
        self.use_custom_options
    }

    pub fn custom_options(&self) -> Option<&Value> {
        self.custom_options.as_ref()
    }

    /// Custom options as seen by the compile pipeline: present only while
    /// custom options are enabled.
    pub fn effective_custom_options(&self) -> Option<&Value> {
        if !self.use_custom_options {
            return None;
        }
        self.custom_options.as_ref()
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn auto_aliases(&self) -> AutoAliasPolicy {
        self.auto_aliases
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
        if self.use_custom_options {
            self.custom_options = Some(format.default_custom_options());
        }
    }

    pub fn set_use_custom_options(&mut self, enabled: bool) {
        self.use_custom_options = enabled;
        if enabled {
            self.custom_options = Some(self.format.default_custom_options());
        }
    }

    /// Replaces the edited custom-option object. Has no visible effect on
    /// compilation unless custom options are enabled.
    pub fn set_custom_options(&mut self, options: Value) {
        self.custom_options = Some(options);
    }

    /// Restores a custom-option object from a persisted snapshot; a restored
    /// object implies the checkbox was on.
    pub fn restore_custom_options(&mut self, options: Value) {
        self.custom_options = Some(options);
        self.use_custom_options = true;
    }

    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.distribution = distribution;
    }

    pub fn set_auto_aliases(&mut self, policy: AutoAliasPolicy) {
        self.auto_aliases = policy;
    }
}
