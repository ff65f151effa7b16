//! # Dialog UI
//!
//! Dioxus components for Dialog Forge.
//!
//! Wrap a subtree in [`DialogProvider`]; anything below it can call
//! [`use_dialog`] and open a dialog described entirely as data.
//!
//! ## Features
//!
//! - One modal per provider, independent providers side by side
//! - Generated forms with per-field validation and async submit
//! - Custom content, custom fields and custom action buttons
//! - Exit animation before the dialog resets to its defaults
//!

// ============================================================================
// Modules
// ============================================================================

pub mod actions;
pub mod form;
pub mod inputs;
pub mod provider;
pub mod shell;
pub mod view;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export the core crate for convenience
pub use dialog_core;

pub use actions::DialogActions;
pub use form::{DialogForm, FormContext, GeneratedField, use_dialog_form};
pub use inputs::{Checkbox, NumberInput, Select, TextArea, TextInput};
pub use provider::{DialogHandle, DialogProvider, use_dialog};
pub use shell::DialogShell;
pub use view::{
    ActionButton, Content, DialogConfig, DialogOptions, FieldSpec, View, ViewHost,
    render_content,
};

// ============================================================================
// Constants
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stylesheet for the dialog chrome and the component kit
const STYLES: &str = include_str!("../../../assets/styles/dialog.css");

/// `<head>` fragment embedding the dialog stylesheet
pub fn custom_head() -> String {
    format!(r#"<style type="text/css">{}</style>"#, STYLES)
}

/// Get the embedded CSS styles
pub fn get_styles() -> &'static str {
    STYLES
}

// ============================================================================
// Tests
// ============================================================================
