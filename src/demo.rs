//! # Demo Page
//!
//! A handful of dialogs opened through the public hook only: a notification,
//! a destructive confirmation, a sign-up form, an order form whose submit
//! can fail, and a fully custom dialog body.

use std::time::Duration;

use dialog_core::{
    ButtonColor, ButtonProps, ButtonVariant, DialogDefaults, DialogProps, FieldRule, FormValues,
    InputKind, MaxWidth, SelectOption,
};
use dialog_ui::{
    ActionButton, DialogOptions, DialogProvider, FieldSpec, View, use_dialog, use_dialog_form,
};
use dioxus::prelude::*;
use serde_json::{Value, json};

const PAGE_STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: rgb(15 23 42); color: rgb(241 245 249); }
.demo-page { max-width: 720px; margin: 0 auto; padding: 2rem; }
.demo-buttons { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 1.5rem 0; }
.demo-log { font-family: monospace; font-size: 0.8rem; color: rgb(148 163 184); }
.demo-rating { display: flex; gap: 0.25rem; }
"#;

/// `<head>` fragment for the demo window
pub fn custom_head() -> String {
    format!(
        r#"{}<style type="text/css">{}</style>"#,
        dialog_ui::custom_head(),
        PAGE_STYLES
    )
}

// ============================================================================
// Root Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    let defaults = try_use_context::<DialogDefaults>().unwrap_or_default();

    rsx! {
        DialogProvider {
            defaults,
            DemoPage {}
        }
    }
}

#[component]
fn DemoPage() -> Element {
    let dialog = use_dialog();
    let log = use_signal(Vec::<String>::new);
    let phase = dialog.phase().display_name();
    let entries = log.read().clone();

    rsx! {
        div {
            class: "demo-page",

            h1 { "Dialog Forge" }
            p { "Dialog is currently {phase}." }

            div {
                class: "demo-buttons",

                button {
                    class: "btn btn-outlined btn-primary",
                    onclick: move |_| dialog.open_dialog(notification()),
                    "Notification"
                }
                button {
                    class: "btn btn-outlined btn-error",
                    onclick: move |_| dialog.open_dialog(delete_confirmation(log)),
                    "Delete item"
                }
                button {
                    class: "btn btn-outlined btn-primary",
                    onclick: move |_| dialog.open_dialog(sign_up(log)),
                    "Sign up"
                }
                button {
                    class: "btn btn-outlined btn-primary",
                    onclick: move |_| dialog.open_dialog(order(log)),
                    "Order"
                }
                button {
                    class: "btn btn-outlined btn-secondary",
                    onclick: move |_| dialog.open_dialog(about()),
                    "About"
                }
            }

            h3 { "Submitted" }
            ul {
                class: "demo-log",
                for (i, entry) in entries.iter().enumerate() {
                    li { key: "{i}", "{entry}" }
                }
            }
        }
    }
}

// ============================================================================
// Dialogs
// ============================================================================

fn notification() -> DialogOptions {
    DialogOptions::new()
        .title("Saved")
        .content_text("Your changes have been saved.")
        .cancel_button(ActionButton::Hidden)
        .submit_button(ActionButton::label("OK"))
}

fn delete_confirmation(log: Signal<Vec<String>>) -> DialogOptions {
    DialogOptions::new()
        .title("Delete item?")
        .content_text("This cannot be undone.")
        .cancel_button(ActionButton::Custom(View::new(keep_button)))
        .submit_button(ActionButton::with_props(
            "Delete",
            ButtonProps::default()
                .color(ButtonColor::Error)
                .variant(ButtonVariant::Contained),
        ))
        .on_submit(move |_| {
            let mut log = log;
            async move {
                tokio::time::sleep(Duration::from_millis(600)).await;
                log.write().push("item deleted".to_string());
                Ok(())
            }
        })
}

fn sign_up(log: Signal<Vec<String>>) -> DialogOptions {
    DialogOptions::new()
        .title("Create account")
        .without_content_text()
        .field(
            "displayName",
            FieldSpec::text("").rule(FieldRule::new().required().max_length(32)),
        )
        .field(
            "email",
            FieldSpec::email("")
                .autofocus()
                .rule(FieldRule::new().required().email()),
        )
        .field(
            "password",
            FieldSpec::password()
                .helper_text("At least 8 characters")
                .rule(FieldRule::new().required().min_length(8)),
        )
        .field(
            "confirmPassword",
            FieldSpec::password()
                .label("Confirm password")
                .rule(FieldRule::new().required().equals("password")),
        )
        .field(
            "plan",
            FieldSpec::select(
                "free",
                vec![
                    SelectOption::new("free", "Free"),
                    SelectOption::new("pro", "Pro"),
                ],
            ),
        )
        .field(
            "rating",
            FieldSpec::custom(Value::Null, View::new(|| rsx! { RatingField {} })).rule(
                FieldRule::new()
                    .required()
                    .with_message("Tell us how excited you are"),
            ),
        )
        .field("terms", FieldSpec::checkbox(false).label("I accept the terms").rule(
            FieldRule::new()
                .custom(|value, _| value == &json!(true))
                .with_message("You must accept the terms"),
        ))
        .submit_button(ActionButton::label("Sign up"))
        .dialog_props(DialogProps {
            max_width: MaxWidth::Md,
            dismissible: true,
            ..DialogProps::default()
        })
        .on_submit(move |values| {
            let mut log = log;
            async move {
                log.write().push(format!("signed up: {}", summarize(&values)));
                Ok(())
            }
        })
}

fn order(log: Signal<Vec<String>>) -> DialogOptions {
    DialogOptions::new()
        .title("Order")
        .content_text("How many would you like?")
        .field(
            "qty",
            FieldSpec::number(1).rule(FieldRule::new().required().min(1.0).max(99.0)),
        )
        .field(
            "note",
            FieldSpec::text("")
                .input(InputKind::Multiline { rows: 3 })
                .placeholder("Delivery instructions"),
        )
        .field(
            "fail",
            FieldSpec::checkbox(false).label("Simulate a server error"),
        )
        .submit_button(ActionButton::label("Place order"))
        .on_submit(move |values| {
            let mut log = log;
            async move {
                tokio::time::sleep(Duration::from_millis(800)).await;
                if values.get("fail") == Some(&json!(true)) {
                    anyhow::bail!("The server rejected the order");
                }
                log.write().push(format!("ordered: {}", summarize(&values)));
                Ok(())
            }
        })
}

fn about() -> DialogOptions {
    DialogOptions::new().custom_content(View::new(|| rsx! { AboutContent {} }))
}

fn summarize(values: &FormValues) -> String {
    values
        .iter()
        .filter(|(name, _)| !name.to_lowercase().contains("password"))
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Custom Components
// ============================================================================

fn keep_button() -> Element {
    rsx! { KeepButton {} }
}

/// Custom cancel control; custom actions close the dialog themselves
#[component]
fn KeepButton() -> Element {
    let dialog = use_dialog();
    rsx! {
        button {
            class: "btn btn-text btn-inherit",
            r#type: "button",
            onclick: move |_| dialog.close_dialog(),
            "Keep it"
        }
    }
}

/// Custom field bound through the form context
#[component]
fn RatingField() -> Element {
    let Some(form) = use_dialog_form() else {
        return rsx! {};
    };

    let rating = form.value("rating").and_then(|v| v.as_u64()).unwrap_or(0);
    let error = form.error("rating");
    let disabled = form.is_submitting();

    rsx! {
        div {
            class: "input-group",

            span { class: "input-label", "Excitement" }
            div {
                class: "demo-rating",
                for star in 1..=5u64 {
                    button {
                        key: "{star}",
                        r#type: "button",
                        class: if star <= rating { "btn btn-contained btn-primary" } else { "btn btn-outlined btn-primary" },
                        disabled,
                        onclick: {
                            let form = form.clone();
                            move |_| form.set_value("rating", json!(star))
                        },
                        "{star}"
                    }
                }
            }
            if let Some(error) = error {
                p { class: "input-error", "{error}" }
            }
        }
    }
}

/// Fully custom dialog body
#[component]
fn AboutContent() -> Element {
    let dialog = use_dialog();
    rsx! {
        h2 { class: "dialog-title", "About Dialog Forge" }
        div {
            class: "dialog-content",
            p {
                class: "dialog-content-text",
                "Every dialog on this page is described as data and opened with use_dialog()."
            }
        }
        div {
            class: "dialog-actions",
            button {
                class: "btn btn-contained btn-primary",
                r#type: "button",
                onclick: move |_| dialog.close_dialog(),
                "Close"
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_core::{ActionSlot, DialogConfig, ResolvedAction, resolve_action};

    #[test]
    fn test_summarize_hides_passwords() {
        let mut values = FormValues::new();
        values.insert("email".into(), json!("a@b.c"));
        values.insert("confirmPassword".into(), json!("secret"));
        assert_eq!(summarize(&values), r#"email="a@b.c""#);
    }

    #[test]
    fn test_notification_has_no_cancel() {
        let config = notification().apply_to(DialogConfig::default());
        assert!(resolve_action(ActionSlot::Cancel, &config.cancel_button, false).is_hidden());
        assert!(matches!(
            resolve_action(ActionSlot::Submit, &config.submit_button, false),
            ResolvedAction::Button(_)
        ));
    }

    #[test]
    fn test_about_bypasses_form() {
        let config = about().apply_to(DialogConfig::default());
        assert!(config.custom_content.is_some());
        assert!(!config.has_fields());
    }
}
