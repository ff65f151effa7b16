//! Provider-level defaults
//!
//! A `DialogDefaults` is handed to each provider at construction. It is the
//! configuration a closed dialog holds, and the base every `open` builds on.
//! Defaults can be loaded from TOML; missing keys keep their built-in value.
//!
//! ```toml
//! title = "Confirm"
//! content_text = "Are you sure?"
//! cancel_label = "Back"
//! submit_label = "OK"
//! max_width = "md"
//! exit_duration_ms = 150
//! reopen_policy = "merge"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DialogError, DialogResult};
use crate::types::MaxWidth;

/// Default exit-animation length in milliseconds
pub const DEFAULT_EXIT_DURATION_MS: u64 = 195;

/// How `open` treats a dialog that is already open (or still closing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReopenPolicy {
    /// Start from the defaults: omitted options never leak from the previous open
    #[default]
    Replace,
    /// Layer the new options over the current configuration
    Merge,
}

/// Defaults a provider falls back to for anything `open` omits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogDefaults {
    pub title: String,
    /// `None` hides the content-text region by default
    pub content_text: Option<String>,
    pub cancel_label: String,
    pub submit_label: String,
    pub full_width: bool,
    pub max_width: MaxWidth,
    pub dismissible: bool,
    pub exit_duration_ms: u64,
    pub reopen_policy: ReopenPolicy,
}

impl Default for DialogDefaults {
    fn default() -> Self {
        Self {
            title: "Dialog Title".to_string(),
            content_text: Some("Dialog content text".to_string()),
            cancel_label: "Cancel".to_string(),
            submit_label: "Submit".to_string(),
            full_width: true,
            max_width: MaxWidth::Sm,
            dismissible: false,
            exit_duration_ms: DEFAULT_EXIT_DURATION_MS,
            reopen_policy: ReopenPolicy::Replace,
        }
    }
}

impl DialogDefaults {
    /// Parse defaults from a TOML document
    pub fn from_toml_str(source: &str) -> DialogResult<Self> {
        let defaults: Self = toml::from_str(source)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Load defaults from a TOML file
    pub fn load(path: impl AsRef<Path>) -> DialogResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| DialogError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let defaults = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded dialog defaults from {}", path.display());
        Ok(defaults)
    }

    /// Reject values that would leave the generated dialog unusable
    pub fn validate(&self) -> DialogResult<()> {
        if self.cancel_label.trim().is_empty() {
            return Err(DialogError::invalid_config("cancel_label must not be empty"));
        }
        if self.submit_label.trim().is_empty() {
            return Err(DialogError::invalid_config("submit_label must not be empty"));
        }
        if self.exit_duration_ms > 10_000 {
            return Err(DialogError::invalid_config(format!(
                "exit_duration_ms must be at most 10000, got {}",
                self.exit_duration_ms
            )));
        }
        Ok(())
    }

    pub fn with_reopen_policy(mut self, policy: ReopenPolicy) -> Self {
        self.reopen_policy = policy;
        self
    }

    pub fn with_exit_duration_ms(mut self, ms: u64) -> Self {
        self.exit_duration_ms = ms;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
