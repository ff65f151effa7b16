//! # Dialog Core
//!
//! UI-independent core of Dialog Forge.
//!
//! Callers describe a modal dialog as data (title, body, form fields with
//! validation, action buttons); this crate owns everything about it that is
//! not pixels:
//!
//! - **Store**: the `Closed -> Open -> Closing -> Closed` state machine
//! - **Field**: the field schema compiler (initial values + composed validator)
//! - **Validation**: composable per-field rules and object schemas
//! - **Form**: the form session and its submit protocol
//! - **Actions**: cancel/submit slot resolution
//! - **Config**: provider defaults, loadable from TOML
//!
//! Every type that carries caller-rendered content is generic over `V`,
//! the renderable of whichever UI layer sits on top.

pub mod actions;
pub mod config;
pub mod dialog;
pub mod error;
pub mod field;
pub mod form;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use actions::{ActionSlot, ButtonBehavior, ButtonView, ResolvedAction, resolve_action};
pub use config::{DialogDefaults, ReopenPolicy};
pub use dialog::{ActionButton, DialogConfig, DialogOptions, SubmitFuture, SubmitHandler};
pub use error::{DialogError, DialogResult};
pub use field::{
    FieldKind, FieldProps, FieldSpec, Fields, InputKind, SelectOption, compile_initial_values,
    compile_validation_schema, default_label,
};
pub use form::{FieldView, FormSession, InputView, SubmitOutcome, plan_fields, submit};
pub use store::{DialogAction, DialogState, DialogStore, Phase, Transition};
pub use types::{
    ButtonColor, ButtonProps, ButtonVariant, Content, DialogProps, FieldErrors, FormOptions,
    FormValues, MaxWidth, SlotProps, SubcomponentProps,
};
pub use validation::{Check, FieldRule, ObjectSchema};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio_test::block_on;

    type Store = DialogStore<&'static str>;
    type Options = DialogOptions<&'static str>;

    /// Submit the store's current form and close on success, the way the
    /// UI layer wires it
    fn submit_and_close(store: &mut Store, session: &mut FormSession) -> SubmitOutcome {
        let generation = store.generation();
        let handler = store.config().on_submit.clone();
        let outcome = block_on(submit(session, &handler));
        if outcome.is_submitted() {
            store.close_session(generation);
        }
        outcome
    }

    #[test]
    fn test_crate_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "dialog_core");
    }

    #[test]
    fn test_submit_without_editing_passes_initial_values() {
        let received = Rc::new(RefCell::new(None));
        let sink = received.clone();

        let mut store = Store::new(DialogDefaults::default());
        store.open(
            Options::new()
                .field("qty", FieldSpec::number(1))
                .on_submit(move |values| {
                    *sink.borrow_mut() = Some(values);
                    async { Ok(()) }
                }),
        );

        let mut session = FormSession::from_config(store.config());
        let outcome = submit_and_close(&mut store, &mut session);

        assert!(outcome.is_submitted());
        let mut expected = FormValues::new();
        expected.insert("qty".into(), json!(1));
        assert_eq!(received.borrow().as_ref(), Some(&expected));
        assert_eq!(store.phase(), Phase::Closing);
    }

    #[test]
    fn test_invalid_submit_keeps_dialog_open() {
        let called = Rc::new(RefCell::new(false));
        let flag = called.clone();

        let mut store = Store::new(DialogDefaults::default());
        store.open(
            Options::new()
                .field(
                    "email",
                    FieldSpec::text("bad").rule(
                        FieldRule::new()
                            .matches(regex::Regex::new("@").unwrap())
                            .with_message("must contain @"),
                    ),
                )
                .on_submit(move |_| {
                    *flag.borrow_mut() = true;
                    async { Ok(()) }
                }),
        );

        let mut session = FormSession::from_config(store.config());
        let outcome = submit_and_close(&mut store, &mut session);

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(store.is_open());
        assert_eq!(session.error("email"), Some("must contain @"));
        assert!(!*called.borrow());
    }

    #[test]
    fn test_notification_dialog_actions() {
        let mut store = Store::new(DialogDefaults::default());
        store.open(
            Options::new()
                .title("T")
                .cancel_button(ActionButton::Hidden)
                .submit_button(ActionButton::label("OK")),
        );

        let config = store.config();
        assert!(resolve_action(ActionSlot::Cancel, &config.cancel_button, false).is_hidden());
        match resolve_action(ActionSlot::Submit, &config.submit_button, false) {
            ResolvedAction::Button(view) => assert_eq!(view.label, &Content::text("OK")),
            other => panic!("expected generated submit button, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_cancel_replaces_generated_button() {
        let mut store = Store::new(DialogDefaults::default());
        store.open(Options::new().cancel_button(ActionButton::Custom("KeepEditing")));

        assert_eq!(
            resolve_action(ActionSlot::Cancel, &store.config().cancel_button, false),
            ResolvedAction::Custom(&"KeepEditing")
        );
    }

    #[test]
    fn test_no_stale_fields_after_full_cycle() {
        let mut store = Store::new(DialogDefaults::default());
        store.open(Options::new().field("secret", FieldSpec::text("s3cr3t")));
        store.close();
        store.exit_complete(store.generation());

        store.open(Options::new().title("Next"));
        let session = FormSession::from_config(store.config());
        assert!(session.values().is_empty());
        assert!(compile_initial_values(&store.config().fields).is_empty());
    }
}
