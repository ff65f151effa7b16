//! Action Resolution
//!
//! Decides what the cancel and submit slots render: nothing, the caller's
//! component verbatim, or a generated button whose props are layered over
//! the defaults.

use crate::dialog::ActionButton;
use crate::types::{ButtonColor, ButtonVariant, Content};

/// Which action slot is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSlot {
    Cancel,
    Submit,
}

/// What a generated button does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonBehavior {
    /// Close the dialog
    Close,
    /// Trigger form submission
    Submit,
}

/// Fully resolved generated button
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView<'a, V> {
    pub label: &'a Content<V>,
    pub color: ButtonColor,
    pub variant: ButtonVariant,
    pub class: Option<&'a str>,
    pub disabled: bool,
    pub behavior: ButtonBehavior,
}

/// Rendering decision for one action slot
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedAction<'a, V> {
    Hidden,
    Custom(&'a V),
    Button(ButtonView<'a, V>),
}

impl<V> ResolvedAction<'_, V> {
    pub fn is_hidden(&self) -> bool {
        matches!(self, ResolvedAction::Hidden)
    }
}

/// Resolve an action slot against the current submitting flag
///
/// Custom components are returned untouched: the layer does not wire
/// them to `close`/`submit`.
pub fn resolve_action<V>(
    slot: ActionSlot,
    button: &ActionButton<V>,
    is_submitting: bool,
) -> ResolvedAction<'_, V> {
    match button {
        ActionButton::Hidden => ResolvedAction::Hidden,
        ActionButton::Custom(component) => ResolvedAction::Custom(component),
        ActionButton::Generated { label, props } => ResolvedAction::Button(ButtonView {
            label,
            color: props.color.unwrap_or(ButtonColor::Primary),
            variant: props.variant.unwrap_or_default(),
            class: props.class.as_deref(),
            disabled: props.disabled.unwrap_or(is_submitting),
            behavior: match slot {
                ActionSlot::Cancel => ButtonBehavior::Close,
                ActionSlot::Submit => ButtonBehavior::Submit,
            },
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
