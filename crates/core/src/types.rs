//! Core types for Dialog Forge
//!
//! Shared vocabulary between the state store, the form session and the
//! rendering layer: form values, renderable content, and the pass-through
//! style props each dialog region accepts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Form Values
// ============================================================================

/// Current values of a form, keyed by field name in render order
pub type FormValues = IndexMap<String, Value>;

/// Per-field error messages, keyed by field name
pub type FieldErrors = IndexMap<String, String>;

/// Check whether a value counts as "not provided"
///
/// `null` and the empty string are absent; `false` and `0` are values.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render a value as the text an input element should show
pub fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Interpret a value as a checkbox state
pub fn value_as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "true" | "on" | "1"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

// ============================================================================
// Renderable Content
// ============================================================================

/// Content that is either plain text or an opaque renderable `V`
#[derive(Debug, Clone, PartialEq)]
pub enum Content<V> {
    /// Plain text
    Text(String),
    /// Caller-supplied renderable, shown verbatim
    View(V),
}

impl<V> Content<V> {
    /// Create text content
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    /// Get the text, if this is text content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::View(_) => None,
        }
    }

    /// Check if this is empty text (renders nothing)
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Text(text) if text.is_empty())
    }
}

impl<V> From<&str> for Content<V> {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl<V> From<String> for Content<V> {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

// ============================================================================
// Dialog Props
// ============================================================================

/// Maximum width breakpoint of the dialog container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaxWidth {
    Xs,
    #[default]
    Sm,
    Md,
    Lg,
    Xl,
}

impl MaxWidth {
    /// CSS class suffix for this breakpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            MaxWidth::Xs => "xs",
            MaxWidth::Sm => "sm",
            MaxWidth::Md => "md",
            MaxWidth::Lg => "lg",
            MaxWidth::Xl => "xl",
        }
    }
}

/// Overrides for the outer modal container
#[derive(Debug, Clone, PartialEq)]
pub struct DialogProps {
    /// Stretch to the max width
    pub full_width: bool,
    /// Maximum width breakpoint
    pub max_width: MaxWidth,
    /// Extra CSS classes
    pub class: Option<String>,
    /// Whether clicking the backdrop closes the dialog
    pub dismissible: bool,
}

impl Default for DialogProps {
    fn default() -> Self {
        Self {
            full_width: true,
            max_width: MaxWidth::Sm,
            class: None,
            dismissible: false,
        }
    }
}

/// Pass-through styling for one dialog region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotProps {
    pub class: Option<String>,
    pub style: Option<String>,
}

impl SlotProps {
    /// Create slot props with a CSS class
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            style: None,
        }
    }

    /// Add an inline style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Pass-through props for each region of the dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubcomponentProps {
    pub title: SlotProps,
    pub content: SlotProps,
    pub content_text: SlotProps,
    pub actions: SlotProps,
}

/// When the form session runs its validator
///
/// Both flags default to `false`: errors surface only after a submit attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub validate_on_change: bool,
    pub validate_on_blur: bool,
}

// ============================================================================
// Button Props
// ============================================================================

/// Button color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonColor {
    #[default]
    Primary,
    Secondary,
    Error,
    Inherit,
}

impl ButtonColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonColor::Primary => "primary",
            ButtonColor::Secondary => "secondary",
            ButtonColor::Error => "error",
            ButtonColor::Inherit => "inherit",
        }
    }
}

/// Button visual variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Text,
    Outlined,
    Contained,
}

impl ButtonVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Text => "text",
            ButtonVariant::Outlined => "outlined",
            ButtonVariant::Contained => "contained",
        }
    }
}

/// Caller overrides for a generated action button
///
/// Unset props fall back to the generated defaults (`color = primary`,
/// disabled while submitting).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonProps {
    pub color: Option<ButtonColor>,
    pub variant: Option<ButtonVariant>,
    pub class: Option<String>,
    pub disabled: Option<bool>,
}

impl ButtonProps {
    pub fn color(mut self, color: ButtonColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
