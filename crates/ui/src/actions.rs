//! # Dialog Actions
//!
//! Renders the cancel and submit slots from their resolved form. Generated
//! buttons are wired here; custom components are mounted as-is and own
//! their click handling.

use dialog_core::{ActionSlot, ButtonBehavior, ButtonView, ResolvedAction, SlotProps, resolve_action};
use dioxus::prelude::*;

use crate::view::{ActionButton, View, ViewHost, render_content};

#[derive(Props, Clone, PartialEq)]
pub struct DialogActionsProps {
    /// Cancel slot configuration
    pub cancel: ActionButton,

    /// Submit slot configuration
    pub submit: ActionButton,

    /// Disables generated buttons unless their props say otherwise
    #[props(default = false)]
    pub is_submitting: bool,

    /// Pass-through props for the actions region
    #[props(default)]
    pub slot: SlotProps,

    /// Generated cancel button clicked
    #[props(default)]
    pub on_close: EventHandler<()>,

    /// Generated submit button clicked
    #[props(default)]
    pub on_submit: EventHandler<()>,
}

/// Cancel and submit controls of a dialog
#[component]
pub fn DialogActions(props: DialogActionsProps) -> Element {
    let cancel = resolve_action(ActionSlot::Cancel, &props.cancel, props.is_submitting);
    let submit = resolve_action(ActionSlot::Submit, &props.submit, props.is_submitting);

    if cancel.is_hidden() && submit.is_hidden() {
        return rsx! {};
    }

    let on_close = props.on_close;
    let on_submit = props.on_submit;
    let slot_class = props.slot.class.clone().unwrap_or_default();

    rsx! {
        div {
            class: "dialog-actions {slot_class}",
            style: props.slot.style.clone(),

            {render_action(cancel, on_close, on_submit)}
            {render_action(submit, on_close, on_submit)}
        }
    }
}

fn render_action(
    action: ResolvedAction<'_, View>,
    on_close: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    match action {
        ResolvedAction::Hidden => rsx! {},
        ResolvedAction::Custom(view) => rsx! {
            ViewHost { view: view.clone() }
        },
        ResolvedAction::Button(button) => {
            let class = build_button_class(&button);
            let behavior = button.behavior;
            rsx! {
                button {
                    class: "{class}",
                    r#type: "button",
                    disabled: button.disabled,
                    onclick: move |_| match behavior {
                        ButtonBehavior::Close => on_close.call(()),
                        ButtonBehavior::Submit => on_submit.call(()),
                    },
                    {render_content(button.label)}
                }
            }
        }
    }
}

/// Build button class string
fn build_button_class<V>(button: &ButtonView<'_, V>) -> String {
    let mut class = format!(
        "btn btn-{} btn-{}",
        button.variant.as_str(),
        button.color.as_str()
    );
    if let Some(extra) = button.class {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_core::{ButtonColor, ButtonProps, ButtonVariant};

    #[test]
    fn test_default_button_class() {
        let button = ActionButton::label("OK");
        let ResolvedAction::Button(view) = resolve_action(ActionSlot::Submit, &button, false)
        else {
            panic!("expected generated button");
        };
        assert_eq!(build_button_class(&view), "btn btn-text btn-primary");
    }

    #[test]
    fn test_button_class_with_overrides() {
        let button = ActionButton::with_props(
            "Delete",
            ButtonProps::default()
                .color(ButtonColor::Error)
                .variant(ButtonVariant::Contained)
                .class("ml-auto"),
        );
        let ResolvedAction::Button(view) = resolve_action(ActionSlot::Submit, &button, false)
        else {
            panic!("expected generated button");
        };
        assert_eq!(build_button_class(&view), "btn btn-contained btn-error ml-auto");
    }
}
