//! # Input Components
//!
//! The component kit generated dialog fields render with.
//!
//! - **TextInput**: single-line text, email and password input
//! - **TextArea**: multi-line text input
//! - **NumberInput**: numeric input
//! - **Select**: dropdown selection
//! - **Checkbox**: boolean checkbox
//!
//! Each input shows its label (with a required marker), then either the
//! error message or the helper text below it.

use dialog_core::SelectOption;
use dioxus::prelude::*;

// ============================================================================
// Text Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub name: String,
    pub value: String,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub help_text: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub autofocus: bool,
    /// Input type (text, email, password)
    #[props(default = "text".to_string())]
    pub input_type: String,
    #[props(default)]
    pub class: Option<String>,
    #[props(default)]
    pub on_change: EventHandler<String>,
    #[props(default)]
    pub on_blur: EventHandler<()>,
}

/// Single-line text, email or password input
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            InputLabel { name: props.name.clone(), label: props.label.clone(), required: props.required }

            input {
                class: "{input_class}",
                id: "{props.name}",
                name: "{props.name}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                autofocus: props.autofocus,
                oninput: move |e| props.on_change.call(e.value()),
                onblur: move |_| props.on_blur.call(()),
            }

            InputFooter { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub name: String,
    pub value: String,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub help_text: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    /// Number of visible rows
    #[props(default = 3)]
    pub rows: usize,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub autofocus: bool,
    #[props(default)]
    pub class: Option<String>,
    #[props(default)]
    pub on_change: EventHandler<String>,
    #[props(default)]
    pub on_blur: EventHandler<()>,
}

/// Multi-line text input component
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let textarea_class = build_textarea_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            InputLabel { name: props.name.clone(), label: props.label.clone(), required: props.required }

            textarea {
                class: "{textarea_class}",
                id: "{props.name}",
                name: "{props.name}",
                rows: "{props.rows}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                autofocus: props.autofocus,
                value: "{props.value}",
                oninput: move |e| props.on_change.call(e.value()),
                onblur: move |_| props.on_blur.call(()),
            }

            InputFooter { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Number Input Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct NumberInputProps {
    pub name: String,
    /// Raw input text; kept as text so partial entries like `1.` survive
    pub value: String,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub help_text: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = false)]
    pub autofocus: bool,
    #[props(default)]
    pub class: Option<String>,
    #[props(default)]
    pub on_change: EventHandler<String>,
    #[props(default)]
    pub on_blur: EventHandler<()>,
}

/// Numeric input component
#[component]
pub fn NumberInput(props: NumberInputProps) -> Element {
    let input_class = build_input_class(props.error.is_some(), props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            InputLabel { name: props.name.clone(), label: props.label.clone(), required: props.required }

            input {
                class: "{input_class}",
                id: "{props.name}",
                name: "{props.name}",
                r#type: "number",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                autofocus: props.autofocus,
                oninput: move |e| props.on_change.call(e.value()),
                onblur: move |_| props.on_blur.call(()),
            }

            InputFooter { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    pub name: String,
    pub value: String,
    pub options: Vec<SelectOption>,
    #[props(default)]
    pub label: Option<String>,
    /// Placeholder (shown when no selection)
    #[props(default)]
    pub placeholder: Option<String>,
    #[props(default)]
    pub help_text: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default)]
    pub class: Option<String>,
    #[props(default)]
    pub on_change: EventHandler<String>,
    #[props(default)]
    pub on_blur: EventHandler<()>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let mut select_class = build_input_class(props.error.is_some(), props.disabled, &props.class);
    select_class.push_str(" input-select");

    rsx! {
        div {
            class: "input-group",

            InputLabel { name: props.name.clone(), label: props.label.clone(), required: props.required }

            select {
                class: "{select_class}",
                id: "{props.name}",
                name: "{props.name}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),
                onblur: move |_| props.on_blur.call(()),

                // Placeholder option
                if let Some(placeholder) = &props.placeholder {
                    option {
                        value: "",
                        disabled: true,
                        selected: props.value.is_empty(),
                        "{placeholder}"
                    }
                }

                for option in &props.options {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }

            InputFooter { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Checkbox Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct CheckboxProps {
    pub name: String,
    pub checked: bool,
    #[props(default)]
    pub label: Option<String>,
    #[props(default)]
    pub help_text: Option<String>,
    #[props(default)]
    pub error: Option<String>,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default)]
    pub class: Option<String>,
    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Checkbox input component
#[component]
pub fn Checkbox(props: CheckboxProps) -> Element {
    let checkbox_class = build_checkbox_class(props.disabled, &props.class);

    rsx! {
        div {
            class: "input-group",

            label {
                class: "{checkbox_class}",

                input {
                    r#type: "checkbox",
                    name: "{props.name}",
                    checked: props.checked,
                    disabled: props.disabled,
                    onchange: move |_| {
                        if !props.disabled {
                            props.on_change.call(!props.checked);
                        }
                    },
                }

                if let Some(label) = &props.label {
                    span { class: "checkbox-label", "{label}" }
                }
            }

            InputFooter { error: props.error.clone(), help_text: props.help_text.clone() }
        }
    }
}

// ============================================================================
// Shared Pieces
// ============================================================================

#[component]
fn InputLabel(name: String, label: Option<String>, required: bool) -> Element {
    let Some(label) = label else {
        return rsx! {};
    };

    rsx! {
        label {
            class: "input-label",
            r#for: "{name}",
            "{label}"
            if required {
                span { class: "input-required", "*" }
            }
        }
    }
}

#[component]
fn InputFooter(error: Option<String>, help_text: Option<String>) -> Element {
    rsx! {
        if let Some(error) = error {
            p { class: "input-error", "{error}" }
        } else if let Some(help) = help_text {
            p { class: "input-help", "{help}" }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build input class string
fn build_input_class(has_error: bool, disabled: bool, extra: &Option<String>) -> String {
    let mut classes = vec!["input"];

    if has_error {
        classes.push("input-invalid");
    }

    if disabled {
        classes.push("input-disabled");
    }

    let mut result = classes.join(" ");
    if let Some(extra) = extra {
        result.push(' ');
        result.push_str(extra);
    }

    result
}

/// Build textarea class string
fn build_textarea_class(has_error: bool, disabled: bool, extra: &Option<String>) -> String {
    let mut class = build_input_class(has_error, disabled, extra);
    class.push_str(" input-multiline");
    class
}

/// Build checkbox wrapper class string
fn build_checkbox_class(disabled: bool, extra: &Option<String>) -> String {
    let mut class = String::from("checkbox");
    if disabled {
        class.push_str(" input-disabled");
    }
    if let Some(extra) = extra {
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

    #[test]
    fn test_build_input_class() {
        let class = build_input_class(false, false, &None);
        assert_eq!(class, "input");
    }

    #[test]
    fn test_build_input_class_error() {
        let class = build_input_class(true, false, &None);
        assert!(class.contains("input-invalid"));
    }

    #[test]
    fn test_build_input_class_disabled() {
        let class = build_input_class(false, true, &Some("wide".into()));
        assert_eq!(class, "input input-disabled wide");
    }

    #[test]
    fn test_build_textarea_class() {
        let class = build_textarea_class(false, false, &None);
        assert!(class.ends_with("input-multiline"));
    }

    #[test]
    fn test_build_checkbox_class() {
        assert_eq!(build_checkbox_class(false, &None), "checkbox");
        assert_eq!(build_checkbox_class(true, &None), "checkbox input-disabled");
    }
}
