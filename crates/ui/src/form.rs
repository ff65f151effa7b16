//! # Dialog Form
//!
//! Mounts a [`FormSession`] for one dialog session and renders the title,
//! body text, fields and actions from it. The session lives in this
//! component's scope: the shell keys the form by session generation, so a
//! new `open_dialog` or a reset drops the session together with any submit
//! still in flight.
//!
//! ## Features
//!
//! - Generated inputs bound to the session, custom fields mounted verbatim
//! - Validation on submit (or on change/blur when the form options ask)
//! - Rejected submits re-enable the controls and show the error
//! - [`use_dialog_form`] for custom fields and buttons
//!

use dialog_core::{
    FieldErrors, FieldProps, FieldView, FormSession, FormValues, InputKind, InputView,
    SlotProps, SubmitHandler, plan_fields, types::value_as_bool,
};
use dioxus::prelude::*;
use serde_json::Value;

use crate::actions::DialogActions;
use crate::inputs::{Checkbox, NumberInput, Select, TextArea, TextInput};
use crate::provider::DialogHandle;
use crate::view::{DialogConfig, ViewHost, render_content};

// ============================================================================
// Form Context
// ============================================================================

/// Access to the current dialog's form session
///
/// Provided to everything rendered inside a generated dialog form, which is
/// how custom fields and custom action buttons bind themselves.
#[derive(Clone, PartialEq)]
pub struct FormContext {
    session: Signal<FormSession>,
    handle: DialogHandle,
    generation: u64,
    on_submit: SubmitHandler,
}

impl FormContext {
    pub fn values(&self) -> FormValues {
        self.session.read().values().clone()
    }

    pub fn value(&self, name: &str) -> Option<Value> {
        self.session.read().value(name).cloned()
    }

    pub fn errors(&self) -> FieldErrors {
        self.session.read().errors().clone()
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.session.read().error(name).map(str::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.session.read().is_submitting()
    }

    pub fn submit_error(&self) -> Option<String> {
        self.session.read().submit_error().map(str::to_string)
    }

    pub fn set_value(&self, name: &str, value: Value) {
        let mut session = self.session;
        session.write().set_value(name, value);
    }

    /// Update a field from its input's raw text
    pub fn set_input(&self, name: &str, kind: &InputKind, raw: String) {
        let mut session = self.session;
        session.write().set_input(name, kind, raw);
    }

    pub fn blur(&self, name: &str) {
        let mut session = self.session;
        session.write().blur(name);
    }

    /// Close the dialog this form belongs to
    pub fn close(&self) {
        self.handle.close_session(self.generation);
    }

    /// The form's session is on screen and accepting input
    pub fn is_active(&self) -> bool {
        self.handle.is_open_session(self.generation)
    }

    /// Validate and, if valid, run the submit handler
    ///
    /// Ignored once the dialog has started closing. The handler runs as a
    /// task of the calling scope, which always lives inside this form. A
    /// fulfilled submit closes the dialog if it is still showing the same
    /// session.
    pub fn submit(&self) {
        if !self.is_active() {
            tracing::debug!("Submit ignored; session {} is not open", self.generation);
            return;
        }

        let mut session = self.session;
        let values = match session.write().begin_submit() {
            Ok(values) => values,
            Err(e) => {
                tracing::debug!("Submit not started: {}", e);
                return;
            }
        };

        let handler = self.on_submit.clone();
        let handle = self.handle;
        let generation = self.generation;
        handle.set_submitting(generation, true);

        spawn(async move {
            let outcome = handler.call(values).await;
            session.write().finish_submit(&outcome);
            if outcome.is_ok() {
                tracing::info!("Dialog session {} submitted", generation);
                handle.close_session(generation);
            } else {
                handle.set_submitting(generation, false);
            }
        });
    }
}

/// Get the enclosing dialog form, if rendered inside one
pub fn use_dialog_form() -> Option<FormContext> {
    try_use_context::<FormContext>()
}

// ============================================================================
// Form Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct DialogFormProps {
    /// Configuration of the session being shown
    pub config: DialogConfig,

    /// Session generation the form belongs to
    pub generation: u64,

    /// Handle into the owning provider
    pub handle: DialogHandle,
}

/// Generated dialog body: title, content text, fields and actions
#[component]
pub fn DialogForm(props: DialogFormProps) -> Element {
    let session = use_signal(|| FormSession::from_config(&props.config));
    let form = use_context_provider(|| FormContext {
        session,
        handle: props.handle,
        generation: props.generation,
        on_submit: props.config.on_submit.clone(),
    });

    let config = &props.config;
    let regions = &config.subcomponent_props;
    let current = session.read();
    let plan = plan_fields(&config.fields, &current);
    let locked = current.is_submitting() || !form.is_active();
    let submit_error = current.submit_error().map(str::to_string);

    let on_form_submit = {
        let form = form.clone();
        move |e: FormEvent| {
            e.prevent_default();
            form.submit();
        }
    };
    let on_submit_click = {
        let form = form.clone();
        move |_| form.submit()
    };
    let on_close = move |_| form.close();

    rsx! {
        form {
            class: "dialog-form",
            onsubmit: on_form_submit,

            // Title
            if !config.title.is_empty() {
                h2 {
                    class: slot_class("dialog-title", &regions.title),
                    style: regions.title.style.clone(),
                    {render_content(&config.title)}
                }
            }

            // Content
            div {
                class: slot_class("dialog-content", &regions.content),
                style: regions.content.style.clone(),

                if let Some(text) = &config.content_text {
                    if !text.is_empty() {
                        p {
                            class: slot_class("dialog-content-text", &regions.content_text),
                            style: regions.content_text.style.clone(),
                            {render_content(text)}
                        }
                    }
                }

                for field in plan {
                    {render_field(field)}
                }

                if let Some(message) = submit_error {
                    div {
                        class: "dialog-submit-error",
                        role: "alert",
                        "{message}"
                    }
                }
            }

            DialogActions {
                cancel: config.cancel_button.clone(),
                submit: config.submit_button.clone(),
                is_submitting: locked,
                slot: regions.actions.clone(),
                on_close,
                on_submit: on_submit_click,
            }
        }
    }
}

fn render_field(field: FieldView<'_, crate::View>) -> Element {
    match field {
        FieldView::Custom { name, component } => rsx! {
            ViewHost { key: "{name}", view: component.clone() }
        },
        FieldView::Input(input) => {
            let InputView {
                name,
                label,
                props,
                value,
                text,
                error,
                required,
                disabled,
            } = input;
            rsx! {
                GeneratedField {
                    key: "{name}",
                    name: name.to_string(),
                    label,
                    props: props.clone(),
                    value,
                    text,
                    error: error.map(str::to_string),
                    required,
                    disabled,
                }
            }
        }
    }
}

// ============================================================================
// Generated Field
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct GeneratedFieldProps {
    pub name: String,
    pub label: String,
    pub props: FieldProps,
    pub value: Value,
    /// What text-like inputs display
    pub text: String,
    #[props(default)]
    pub error: Option<String>,
    #[props(default = false)]
    pub required: bool,
    #[props(default = false)]
    pub disabled: bool,
}

/// Component-kit input bound to one field of the enclosing form
#[component]
pub fn GeneratedField(props: GeneratedFieldProps) -> Element {
    let Some(form) = use_dialog_form() else {
        tracing::warn!("Field '{}' rendered outside of a dialog form", props.name);
        return rsx! {};
    };

    let name = props.name.clone();
    let kind = props.props.input.clone();
    let on_change = {
        let form = form.clone();
        let name = name.clone();
        move |raw: String| form.set_input(&name, &kind, raw)
    };
    let on_blur = {
        let form = form.clone();
        let name = name.clone();
        move |_| form.blur(&name)
    };

    let text = props.text.clone();
    let field = &props.props;

    match &field.input {
        InputKind::Text | InputKind::Email | InputKind::Password => rsx! {
            TextInput {
                name,
                value: text,
                label: props.label.clone(),
                placeholder: field.placeholder.clone(),
                help_text: field.helper_text.clone(),
                error: props.error.clone(),
                required: props.required,
                disabled: props.disabled,
                autofocus: field.autofocus,
                input_type: field.input.html_type().to_string(),
                class: field.class.clone(),
                on_change,
                on_blur,
            }
        },
        InputKind::Number => rsx! {
            NumberInput {
                name,
                value: text,
                label: props.label.clone(),
                placeholder: field.placeholder.clone(),
                help_text: field.helper_text.clone(),
                error: props.error.clone(),
                required: props.required,
                disabled: props.disabled,
                autofocus: field.autofocus,
                class: field.class.clone(),
                on_change,
                on_blur,
            }
        },
        InputKind::Multiline { rows } => rsx! {
            TextArea {
                name,
                value: text,
                rows: *rows,
                label: props.label.clone(),
                placeholder: field.placeholder.clone(),
                help_text: field.helper_text.clone(),
                error: props.error.clone(),
                required: props.required,
                disabled: props.disabled,
                autofocus: field.autofocus,
                class: field.class.clone(),
                on_change,
                on_blur,
            }
        },
        InputKind::Select(options) => rsx! {
            Select {
                name,
                value: text,
                options: options.clone(),
                label: props.label.clone(),
                placeholder: field.placeholder.clone(),
                help_text: field.helper_text.clone(),
                error: props.error.clone(),
                required: props.required,
                disabled: props.disabled,
                class: field.class.clone(),
                on_change,
                on_blur,
            }
        },
        InputKind::Checkbox => {
            let checked = value_as_bool(&props.value);
            rsx! {
                Checkbox {
                    name: name.clone(),
                    checked,
                    label: props.label.clone(),
                    help_text: field.helper_text.clone(),
                    error: props.error.clone(),
                    disabled: props.disabled,
                    class: field.class.clone(),
                    on_change: move |checked: bool| form.set_value(&name, Value::Bool(checked)),
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Join a region's base class with its pass-through class
fn slot_class(base: &str, slot: &SlotProps) -> String {
    match &slot.class {
        Some(extra) => format!("{} {}", base, extra),
        None => base.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
