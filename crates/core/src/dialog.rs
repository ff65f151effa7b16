//! Dialog configuration
//!
//! [`DialogConfig`] is the complete description of one dialog invocation.
//! Callers never build it directly: they describe what they care about in a
//! [`DialogOptions`] and the store layers it over the provider's defaults.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::config::DialogDefaults;
use crate::field::{FieldSpec, Fields};
use crate::types::{
    ButtonProps, Content, DialogProps, FormOptions, FormValues, SubcomponentProps,
};
use crate::validation::ObjectSchema;

// ============================================================================
// Submit Handler
// ============================================================================

/// Future returned by a submit handler
pub type SubmitFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

/// Caller-supplied asynchronous submit callback
///
/// The default handler resolves immediately.
#[derive(Clone, Default)]
pub struct SubmitHandler(Option<Rc<dyn Fn(FormValues) -> SubmitFuture>>);

impl SubmitHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FormValues) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        Self(Some(Rc::new(move |values| Box::pin(f(values)))))
    }

    /// Handler that resolves immediately
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Invoke the handler with the submitted values
    pub fn call(&self, values: FormValues) -> SubmitFuture {
        match &self.0 {
            Some(f) => f(values),
            None => Box::pin(async { Ok(()) }),
        }
    }
}

impl PartialEq for SubmitHandler {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SubmitHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("SubmitHandler(noop)")
        } else {
            f.write_str("SubmitHandler(..)")
        }
    }
}

// ============================================================================
// Action Buttons
// ============================================================================

/// Configuration of the cancel or submit action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionButton<V> {
    /// Not rendered
    Hidden,
    /// Generated button with a label and prop overrides
    Generated {
        label: Content<V>,
        props: ButtonProps,
    },
    /// Caller-supplied component; the caller owns its click wiring
    Custom(V),
}

impl<V> ActionButton<V> {
    /// Generated button with default props
    pub fn label(label: impl Into<Content<V>>) -> Self {
        ActionButton::Generated {
            label: label.into(),
            props: ButtonProps::default(),
        }
    }

    /// Generated button with prop overrides
    pub fn with_props(label: impl Into<Content<V>>, props: ButtonProps) -> Self {
        ActionButton::Generated {
            label: label.into(),
            props,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, ActionButton::Hidden)
    }
}

// ============================================================================
// Dialog Config
// ============================================================================

/// Complete configuration of a dialog invocation
#[derive(Debug, Clone, PartialEq)]
pub struct DialogConfig<V> {
    pub title: Content<V>,
    /// `None` hides the content-text region
    pub content_text: Option<Content<V>>,
    pub fields: Fields<V>,
    /// Dialog-level rules, layered over the per-field rules
    pub validation_schema: Option<ObjectSchema>,
    pub cancel_button: ActionButton<V>,
    pub submit_button: ActionButton<V>,
    pub on_submit: SubmitHandler,
    pub dialog_props: DialogProps,
    pub subcomponent_props: SubcomponentProps,
    pub form_options: FormOptions,
    /// Fully custom body that bypasses the generated form
    pub custom_content: Option<V>,
}

impl<V> DialogConfig<V> {
    /// The configuration a closed dialog holds
    pub fn from_defaults(defaults: &DialogDefaults) -> Self {
        Self {
            title: Content::Text(defaults.title.clone()),
            content_text: defaults.content_text.clone().map(Content::Text),
            fields: Fields::new(),
            validation_schema: None,
            cancel_button: ActionButton::label(defaults.cancel_label.as_str()),
            submit_button: ActionButton::label(defaults.submit_label.as_str()),
            on_submit: SubmitHandler::noop(),
            dialog_props: DialogProps {
                full_width: defaults.full_width,
                max_width: defaults.max_width,
                class: None,
                dismissible: defaults.dismissible,
            },
            subcomponent_props: SubcomponentProps::default(),
            form_options: FormOptions::default(),
            custom_content: None,
        }
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

impl<V> Default for DialogConfig<V> {
    fn default() -> Self {
        Self::from_defaults(&DialogDefaults::default())
    }
}

// ============================================================================
// Dialog Options
// ============================================================================

/// Partial configuration passed to `open`
///
/// Anything left unset keeps the value of the configuration it is applied to.
#[derive(Debug, Clone)]
pub struct DialogOptions<V> {
    title: Option<Content<V>>,
    content_text: Option<Option<Content<V>>>,
    fields: Option<Fields<V>>,
    validation_schema: Option<ObjectSchema>,
    cancel_button: Option<ActionButton<V>>,
    submit_button: Option<ActionButton<V>>,
    on_submit: Option<SubmitHandler>,
    dialog_props: Option<DialogProps>,
    subcomponent_props: Option<SubcomponentProps>,
    form_options: Option<FormOptions>,
    custom_content: Option<V>,
}

impl<V> Default for DialogOptions<V> {
    fn default() -> Self {
        Self {
            title: None,
            content_text: None,
            fields: None,
            validation_schema: None,
            cancel_button: None,
            submit_button: None,
            on_submit: None,
            dialog_props: None,
            subcomponent_props: None,
            form_options: None,
            custom_content: None,
        }
    }
}

impl<V> DialogOptions<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<Content<V>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content_text(mut self, text: impl Into<Content<V>>) -> Self {
        self.content_text = Some(Some(text.into()));
        self
    }

    /// Hide the content-text region
    pub fn without_content_text(mut self) -> Self {
        self.content_text = Some(None);
        self
    }

    /// Append a field; fields render in the order they are added
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec<V>) -> Self {
        self.fields
            .get_or_insert_with(Fields::new)
            .insert(name.into(), spec);
        self
    }

    /// Replace the whole field map
    pub fn fields(mut self, fields: Fields<V>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn validation_schema(mut self, schema: ObjectSchema) -> Self {
        self.validation_schema = Some(schema);
        self
    }

    pub fn cancel_button(mut self, button: ActionButton<V>) -> Self {
        self.cancel_button = Some(button);
        self
    }

    pub fn submit_button(mut self, button: ActionButton<V>) -> Self {
        self.submit_button = Some(button);
        self
    }

    pub fn on_submit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(FormValues) -> Fut + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + 'static,
    {
        self.on_submit = Some(SubmitHandler::new(f));
        self
    }

    pub fn submit_handler(mut self, handler: SubmitHandler) -> Self {
        self.on_submit = Some(handler);
        self
    }

    pub fn dialog_props(mut self, props: DialogProps) -> Self {
        self.dialog_props = Some(props);
        self
    }

    pub fn subcomponent_props(mut self, props: SubcomponentProps) -> Self {
        self.subcomponent_props = Some(props);
        self
    }

    pub fn form_options(mut self, options: FormOptions) -> Self {
        self.form_options = Some(options);
        self
    }

    pub fn custom_content(mut self, content: V) -> Self {
        self.custom_content = Some(content);
        self
    }

    /// Layer these options over `base`
    pub fn apply_to(self, mut base: DialogConfig<V>) -> DialogConfig<V> {
        if let Some(title) = self.title {
            base.title = title;
        }
        if let Some(content_text) = self.content_text {
            base.content_text = content_text;
        }
        if let Some(fields) = self.fields {
            base.fields = fields;
        }
        if let Some(schema) = self.validation_schema {
            base.validation_schema = Some(schema);
        }
        if let Some(button) = self.cancel_button {
            base.cancel_button = button;
        }
        if let Some(button) = self.submit_button {
            base.submit_button = button;
        }
        if let Some(handler) = self.on_submit {
            base.on_submit = handler;
        }
        if let Some(props) = self.dialog_props {
            base.dialog_props = props;
        }
        if let Some(props) = self.subcomponent_props {
            base.subcomponent_props = props;
        }
        if let Some(options) = self.form_options {
            base.form_options = options;
        }
        if let Some(content) = self.custom_content {
            base.custom_content = Some(content);
        }
        base
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    type Config = DialogConfig<&'static str>;
    type Options = DialogOptions<&'static str>;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.title, Content::text("Dialog Title"));
        assert_eq!(config.content_text, Some(Content::text("Dialog content text")));
        assert_eq!(config.cancel_button, ActionButton::label("Cancel"));
        assert_eq!(config.submit_button, ActionButton::label("Submit"));
        assert!(config.fields.is_empty());
        assert!(config.on_submit.is_noop());
        assert!(config.custom_content.is_none());
    }

    #[test]
    fn test_apply_keeps_unset_values() {
        let config = Options::new()
            .title("T")
            .cancel_button(ActionButton::Hidden)
            .submit_button(ActionButton::label("OK"))
            .apply_to(Config::default());

        assert_eq!(config.title, Content::text("T"));
        assert!(config.cancel_button.is_hidden());
        assert_eq!(config.submit_button, ActionButton::label("OK"));
        assert_eq!(config.content_text, Some(Content::text("Dialog content text")));
    }

    #[test]
    fn test_without_content_text() {
        let config = Options::new()
            .without_content_text()
            .apply_to(Config::default());
        assert!(config.content_text.is_none());
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let config = Options::new()
            .field("b", FieldSpec::text(""))
            .field("a", FieldSpec::text(""))
            .apply_to(Config::default());
        assert_eq!(config.fields.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_noop_handler_resolves() {
        let handler = SubmitHandler::noop();
        let result = tokio_test::block_on(handler.call(FormValues::new()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_handler_receives_values() {
        let handler = SubmitHandler::new(|values: FormValues| async move {
            anyhow::ensure!(values["qty"] == json!(1), "unexpected qty");
            Ok(())
        });
        let mut values = FormValues::new();
        values.insert("qty".into(), json!(1));
        assert!(tokio_test::block_on(handler.call(values)).is_ok());
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = SubmitHandler::new(|_| async { Ok(()) });
        let b = SubmitHandler::new(|_| async { Ok(()) });
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(SubmitHandler::noop(), SubmitHandler::default());
    }
}
