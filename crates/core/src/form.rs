//! Form Orchestrator
//!
//! A [`FormSession`] is the managed state behind one dialog form: current
//! values, per-field errors, touched fields and the submit lifecycle. It is
//! seeded from the field schema compiler and discarded when the dialog
//! resets.
//!
//! Submission is a two-step protocol so the awaited part can live wherever
//! the caller's executor is:
//!
//! 1. [`FormSession::begin_submit`] validates synchronously and, if valid,
//!    marks the session submitting and hands back the values.
//! 2. The caller awaits the submit handler, then reports the outcome with
//!    [`FormSession::finish_submit`].
//!
//! [`submit`] chains both steps for callers that can hold the session
//! across the await.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::dialog::{DialogConfig, SubmitHandler};
use crate::error::{DialogError, DialogResult};
use crate::field::{
    FieldKind, FieldProps, Fields, InputKind, compile_initial_values, compile_validation_schema,
    default_label,
};
use crate::types::{FieldErrors, FormOptions, FormValues, value_as_text};
use crate::validation::ObjectSchema;

// ============================================================================
// Form Session
// ============================================================================

/// Managed state of one dialog form
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    initial_values: FormValues,
    values: FormValues,
    /// Text typed into inputs whose value is coerced (numbers)
    drafts: IndexMap<String, String>,
    errors: FieldErrors,
    touched: IndexSet<String>,
    schema: ObjectSchema,
    options: FormOptions,
    is_submitting: bool,
    submit_count: u32,
    submit_error: Option<String>,
}

impl FormSession {
    pub fn new(initial_values: FormValues, schema: ObjectSchema, options: FormOptions) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            drafts: IndexMap::new(),
            errors: FieldErrors::new(),
            touched: IndexSet::new(),
            schema,
            options,
            is_submitting: false,
            submit_count: 0,
            submit_error: None,
        }
    }

    /// Seed a session from a field map, an optional dialog-level schema and options
    pub fn from_fields<V>(
        fields: &Fields<V>,
        extra_schema: Option<&ObjectSchema>,
        options: FormOptions,
    ) -> Self {
        let mut schema = compile_validation_schema(fields);
        if let Some(extra) = extra_schema {
            schema = schema.merge(extra);
        }
        Self::new(compile_initial_values(fields), schema, options)
    }

    /// Seed a session for a dialog configuration
    pub fn from_config<V>(config: &DialogConfig<V>) -> Self {
        Self::from_fields(
            &config.fields,
            config.validation_schema.as_ref(),
            config.form_options,
        )
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn initial_values(&self) -> &FormValues {
        &self.initial_values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// What a text-like input should display for `name`
    ///
    /// Prefers the raw text last typed, so coerced values like `1.50` or a
    /// trailing `2.` are shown as entered.
    pub fn text(&self, name: &str) -> String {
        match self.drafts.get(name) {
            Some(raw) => raw.clone(),
            None => self.values.get(name).map(value_as_text).unwrap_or_default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Message of the last rejected submit, if any
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// No errors are currently surfaced
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial_values
    }

    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Update a field value
    ///
    /// Surfaced errors are only recomputed when `validate_on_change` is set.
    pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.drafts.shift_remove(&name);
        self.store_value(name, value);
    }

    /// Update a field from the raw text of its input
    ///
    /// The value is coerced to the input's type; for numbers the raw text
    /// is kept for display.
    pub fn set_input(&mut self, name: impl Into<String>, kind: &InputKind, raw: String) {
        let name = name.into();
        let value = kind.coerce(raw.clone());
        if matches!(kind, InputKind::Number) {
            self.drafts.insert(name.clone(), raw);
        } else {
            self.drafts.shift_remove(&name);
        }
        self.store_value(name, value);
    }

    fn store_value(&mut self, name: String, value: Value) {
        self.values.insert(name.clone(), value);
        if self.options.validate_on_change {
            self.revalidate_field(&name);
        }
    }

    /// Mark a field as touched (input lost focus)
    pub fn blur(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        if self.options.validate_on_blur {
            self.revalidate_field(name);
        }
    }

    fn revalidate_field(&mut self, name: &str) {
        match self.schema.validate_field(name, &self.values) {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.shift_remove(name);
            }
        }
    }

    /// Run the composed validator over all values
    pub fn validate(&mut self) -> &FieldErrors {
        self.errors = self.schema.validate(&self.values);
        &self.errors
    }

    /// Restore the initial values and clear all state
    pub fn reset(&mut self) {
        *self = Self::new(
            self.initial_values.clone(),
            self.schema.clone(),
            self.options,
        );
    }

    // ------------------------------------------------------------------------
    // Submit Protocol
    // ------------------------------------------------------------------------

    /// Validate and, if every field passes, enter the submitting state
    ///
    /// Returns the values to hand to the submit handler. A second call while
    /// a submit is pending is rejected.
    pub fn begin_submit(&mut self) -> DialogResult<FormValues> {
        if self.is_submitting {
            return Err(DialogError::submit_failed("a submit is already in progress"));
        }

        self.submit_count += 1;
        self.submit_error = None;
        self.touched.extend(self.values.keys().cloned());

        let errors = self.validate().clone();
        if !errors.is_empty() {
            tracing::debug!("Submit blocked by {} invalid field(s)", errors.len());
            return Err(DialogError::validation(errors));
        }

        self.is_submitting = true;
        Ok(self.values.clone())
    }

    /// Record the submit handler's outcome
    ///
    /// On success the session stays submitting until the dialog resets, so
    /// the controls remain disabled while it animates out. On failure the
    /// controls are re-enabled and the message is kept for display.
    pub fn finish_submit(&mut self, outcome: &anyhow::Result<()>) {
        match outcome {
            Ok(()) => {}
            Err(e) => {
                tracing::warn!("Submit handler failed: {:#}", e);
                self.is_submitting = false;
                self.submit_error = Some(format!("{:#}", e));
            }
        }
    }
}

// ============================================================================
// Submit
// ============================================================================

/// Result of a full submit attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not invoked
    Invalid(FieldErrors),
    /// The handler resolved; the dialog should close
    Submitted,
    /// The handler rejected
    Failed(DialogError),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Validate, await the handler, and record its outcome
pub async fn submit(session: &mut FormSession, handler: &SubmitHandler) -> SubmitOutcome {
    let values = match session.begin_submit() {
        Ok(values) => values,
        Err(DialogError::Validation { errors }) => return SubmitOutcome::Invalid(errors),
        Err(e) => return SubmitOutcome::Failed(e),
    };

    let outcome = handler.call(values).await;
    session.finish_submit(&outcome);
    match outcome {
        Ok(()) => SubmitOutcome::Submitted,
        Err(e) => SubmitOutcome::Failed(DialogError::submit_failed(format!("{:#}", e))),
    }
}

// ============================================================================
// Field Rendering Plan
// ============================================================================

/// Everything a generated input needs to render
#[derive(Debug, Clone, PartialEq)]
pub struct InputView<'a> {
    pub name: &'a str,
    pub label: String,
    pub props: &'a FieldProps,
    pub value: Value,
    /// Display text for text-like inputs
    pub text: String,
    pub error: Option<&'a str>,
    pub required: bool,
    pub disabled: bool,
}

/// Rendering decision for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldView<'a, V> {
    /// Caller's component, rendered verbatim
    Custom { name: &'a str, component: &'a V },
    /// Generated input bound to the session
    Input(InputView<'a>),
}

/// Decide how each field renders, in insertion order
pub fn plan_fields<'a, V>(
    fields: &'a Fields<V>,
    session: &'a FormSession,
) -> Vec<FieldView<'a, V>> {
    fields
        .iter()
        .map(|(name, spec)| match &spec.kind {
            FieldKind::Custom(component) => FieldView::Custom {
                name: name.as_str(),
                component,
            },
            FieldKind::Generated(props) => FieldView::Input(InputView {
                name: name.as_str(),
                label: props.label.clone().unwrap_or_else(|| default_label(name)),
                props,
                value: session.value(name).cloned().unwrap_or(Value::Null),
                text: session.text(name),
                error: session.error(name),
                required: session.schema().rule(name).is_some_and(|r| r.is_required()),
                disabled: props.disabled || session.is_submitting(),
            }),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogOptions;
    use crate::field::FieldSpec;
    use crate::validation::FieldRule;
    use pretty_assertions::assert_eq;
    use regex::Regex;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio_test::block_on;

    type Options = DialogOptions<&'static str>;

    fn email_session() -> FormSession {
        let config = Options::new()
            .field(
                "email",
                FieldSpec::email("bad").rule(
                    FieldRule::new()
                        .matches(Regex::new("@").unwrap())
                        .with_message("must contain @"),
                ),
            )
            .apply_to(DialogConfig::default());
        FormSession::from_config(&config)
    }

    #[test]
    fn test_session_seeded_from_fields() {
        let config = Options::new()
            .field("qty", FieldSpec::number(1))
            .field("note", FieldSpec::text(""))
            .apply_to(DialogConfig::default());
        let session = FormSession::from_config(&config);

        assert_eq!(session.value("qty"), Some(&json!(1)));
        assert_eq!(session.value("note"), Some(&json!("")));
        assert!(session.is_valid());
        assert!(!session.is_submitting());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_no_validation_while_typing() {
        let mut session = email_session();
        session.set_value("email", json!("still bad"));
        session.blur("email");
        assert!(session.is_valid());
        assert!(session.is_touched("email"));
        assert!(session.is_dirty());
    }

    #[test]
    fn test_validate_on_change_option() {
        let config = Options::new()
            .field("name", FieldSpec::text("").rule(FieldRule::new().required()))
            .form_options(FormOptions {
                validate_on_change: true,
                validate_on_blur: false,
            })
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);

        session.set_value("name", json!(""));
        assert_eq!(session.error("name"), Some("This field is required"));
        session.set_value("name", json!("Ann"));
        assert_eq!(session.error("name"), None);
    }

    #[test]
    fn test_failing_rule_blocks_submit() {
        let mut session = email_session();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let handler = SubmitHandler::new(move |_| {
            *counter.borrow_mut() += 1;
            async { Ok(()) }
        });

        let outcome = block_on(submit(&mut session, &handler));
        match outcome {
            SubmitOutcome::Invalid(errors) => assert_eq!(errors["email"], "must contain @"),
            other => panic!("expected invalid outcome, got {:?}", other),
        }
        assert_eq!(*calls.borrow(), 0);
        assert!(!session.is_submitting());
        assert_eq!(session.error("email"), Some("must contain @"));
    }

    #[test]
    fn test_valid_submit_invokes_handler_once_with_values() {
        let config = Options::new()
            .field("qty", FieldSpec::number(1))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let handler = SubmitHandler::new(move |values| {
            sink.borrow_mut().push(values);
            async { Ok(()) }
        });

        let outcome = block_on(submit(&mut session, &handler));
        assert!(outcome.is_submitted());

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        let mut expected = FormValues::new();
        expected.insert("qty".into(), json!(1));
        assert_eq!(received[0], expected);
        assert!(session.is_submitting());
    }

    #[test]
    fn test_rejected_submit_reenables_controls() {
        let config = Options::new()
            .field("name", FieldSpec::text("Ann"))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);
        let handler = SubmitHandler::new(|_| async { Err(anyhow::anyhow!("server said no")) });

        let outcome = block_on(submit(&mut session, &handler));
        assert!(matches!(outcome, SubmitOutcome::Failed(DialogError::SubmitFailed(_))));
        assert!(!session.is_submitting());
        assert_eq!(session.submit_error(), Some("server said no"));

        // A retry is allowed and clears the previous failure
        let ok = SubmitHandler::noop();
        assert!(block_on(submit(&mut session, &ok)).is_submitted());
        assert_eq!(session.submit_error(), None);
        assert_eq!(session.submit_count(), 2);
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut session =
            FormSession::new(FormValues::new(), ObjectSchema::new(), FormOptions::default());
        assert!(session.begin_submit().is_ok());
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, DialogError::SubmitFailed(_)));
    }

    #[test]
    fn test_dialog_schema_overrides_field_rule() {
        let config = Options::new()
            .field("code", FieldSpec::text("").rule(FieldRule::new().required()))
            .validation_schema(ObjectSchema::new().field("code", FieldRule::new().max_length(3)))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);
        assert!(session.begin_submit().is_ok());
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut session = email_session();
        session.set_value("email", json!("a@b.c"));
        let _ = session.begin_submit();
        session.reset();
        assert_eq!(session.value("email"), Some(&json!("bad")));
        assert!(!session.is_submitting());
        assert_eq!(session.submit_count(), 0);
    }

    #[test]
    fn test_plan_fields() {
        let config = Options::new()
            .field(
                "firstName",
                FieldSpec::text("Ann").rule(FieldRule::new().required()),
            )
            .field("avatar", FieldSpec::custom(json!(null), "AvatarPicker"))
            .field("email", FieldSpec::email("").label("Work email"))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);
        session.set_value("email", json!("x@y.z"));

        let plan = plan_fields(&config.fields, &session);
        assert_eq!(plan.len(), 3);

        match &plan[0] {
            FieldView::Input(input) => {
                assert_eq!(input.name, "firstName");
                assert_eq!(input.label, "First Name");
                assert_eq!(input.value, json!("Ann"));
                assert!(input.required);
                assert!(!input.disabled);
            }
            other => panic!("expected input, got {:?}", other),
        }
        assert_eq!(
            plan[1],
            FieldView::Custom {
                name: "avatar",
                component: &"AvatarPicker"
            }
        );
        match &plan[2] {
            FieldView::Input(input) => {
                assert_eq!(input.label, "Work email");
                assert_eq!(input.value, json!("x@y.z"));
                assert!(!input.required);
            }
            other => panic!("expected input, got {:?}", other),
        }
    }

    #[test]
    fn test_number_input_keeps_typed_text() {
        let config = Options::new()
            .field("qty", FieldSpec::number(1).rule(FieldRule::new().min(1.0)))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);
        assert_eq!(session.text("qty"), "1");

        for raw in ["1.50", "2.", "007", "2.05"] {
            session.set_input("qty", &InputKind::Number, raw.to_string());
            assert_eq!(session.text("qty"), raw);
        }
        assert_eq!(session.value("qty"), Some(&json!(2.05)));

        session.set_input("qty", &InputKind::Number, "1.50".into());
        assert_eq!(session.value("qty"), Some(&json!(1.5)));
        let values = session.begin_submit().unwrap();
        assert_eq!(values["qty"], json!(1.5));

        let plan = plan_fields(&config.fields, &session);
        assert!(matches!(&plan[0], FieldView::Input(input) if input.text == "1.50"));
    }

    #[test]
    fn test_set_value_drops_typed_text() {
        let mut session = FormSession::new(
            FormValues::new(),
            ObjectSchema::new(),
            FormOptions::default(),
        );
        session.set_input("qty", &InputKind::Number, "3.0".into());
        assert_eq!(session.text("qty"), "3.0");
        session.set_value("qty", json!(4));
        assert_eq!(session.text("qty"), "4");
    }

    #[test]
    fn test_text_input_is_not_coerced() {
        let mut session = FormSession::new(
            FormValues::new(),
            ObjectSchema::new(),
            FormOptions::default(),
        );
        session.set_input("code", &InputKind::Text, "007".into());
        assert_eq!(session.value("code"), Some(&json!("007")));
        assert_eq!(session.text("code"), "007");
    }

    #[test]
    fn test_plan_disables_inputs_while_submitting() {
        let config = Options::new()
            .field("name", FieldSpec::text("Ann"))
            .apply_to(DialogConfig::default());
        let mut session = FormSession::from_config(&config);
        session.begin_submit().unwrap();

        let plan = plan_fields(&config.fields, &session);
        assert!(matches!(&plan[0], FieldView::Input(input) if input.disabled));
    }
}
