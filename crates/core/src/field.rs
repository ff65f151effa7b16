//! Field definitions and the field schema compiler
//!
//! A dialog's fields are an ordered map of name to [`FieldSpec`]; insertion
//! order is render order. From that map the compiler derives the two things
//! a form session is seeded with:
//!
//! - [`compile_initial_values`]: name -> initial value
//! - [`compile_validation_schema`]: one [`ObjectSchema`] combining every
//!   field's rule (fields without a rule impose no constraint)

use heck::ToTitleCase;
use indexmap::IndexMap;
use serde_json::Value;

use crate::types::FormValues;
use crate::validation::{FieldRule, ObjectSchema};

/// Ordered mapping of field name to spec
pub type Fields<V> = IndexMap<String, FieldSpec<V>>;

// ============================================================================
// Input Kinds
// ============================================================================

/// Option for select inputs
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Which component-kit input a generated field renders as
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Number,
    Multiline {
        rows: usize,
    },
    Checkbox,
    Select(Vec<SelectOption>),
}

impl InputKind {
    /// HTML `type` attribute for single-line inputs
    pub fn html_type(&self) -> &'static str {
        match self {
            InputKind::Email => "email",
            InputKind::Password => "password",
            InputKind::Number => "number",
            InputKind::Checkbox => "checkbox",
            _ => "text",
        }
    }

    /// Convert raw input text into the field's value type
    pub fn coerce(&self, raw: String) -> Value {
        match self {
            InputKind::Number => {
                let trimmed = raw.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    Value::from(n)
                } else if let Some(n) = trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                {
                    Value::Number(n)
                } else {
                    Value::String(raw)
                }
            }
            InputKind::Checkbox => Value::Bool(matches!(raw.as_str(), "true" | "on" | "1")),
            _ => Value::String(raw),
        }
    }
}

// ============================================================================
// Field Props
// ============================================================================

/// Display hints for a generated field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProps {
    /// Explicit label; defaults to the title-cased field name
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub input: InputKind,
    pub disabled: bool,
    pub autofocus: bool,
    pub class: Option<String>,
}

/// How a field is rendered
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind<V> {
    /// Generated labeled input bound to the form session
    Generated(FieldProps),
    /// Caller-supplied component, rendered verbatim and self-managed
    Custom(V),
}

// ============================================================================
// Field Spec
// ============================================================================

/// One field of a dialog form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec<V> {
    pub initial_value: Value,
    pub rule: Option<FieldRule>,
    pub kind: FieldKind<V>,
}

impl<V> FieldSpec<V> {
    /// Create a generated text field with an initial value
    pub fn new(initial_value: impl Into<Value>) -> Self {
        Self {
            initial_value: initial_value.into(),
            rule: None,
            kind: FieldKind::Generated(FieldProps::default()),
        }
    }

    pub fn text(initial: impl Into<String>) -> Self {
        Self::new(Value::String(initial.into()))
    }

    pub fn email(initial: impl Into<String>) -> Self {
        Self::text(initial).input(InputKind::Email)
    }

    pub fn password() -> Self {
        Self::text("").input(InputKind::Password)
    }

    pub fn number(initial: impl Into<Value>) -> Self {
        Self::new(initial).input(InputKind::Number)
    }

    pub fn checkbox(checked: bool) -> Self {
        Self::new(Value::Bool(checked)).input(InputKind::Checkbox)
    }

    pub fn select(initial: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::text(initial).input(InputKind::Select(options))
    }

    /// Create a field rendered by a caller-supplied component
    pub fn custom(initial_value: impl Into<Value>, component: V) -> Self {
        Self {
            initial_value: initial_value.into(),
            rule: None,
            kind: FieldKind::Custom(component),
        }
    }

    /// Attach a validation rule
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Replace the display props (turns a custom field back into a generated one)
    pub fn props(mut self, props: FieldProps) -> Self {
        self.kind = FieldKind::Generated(props);
        self
    }

    // Display-hint setters are no-ops on custom fields.

    pub fn label(self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.with_props(|p| p.label = Some(label))
    }

    pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        self.with_props(|p| p.placeholder = Some(placeholder))
    }

    pub fn helper_text(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_props(|p| p.helper_text = Some(text))
    }

    pub fn input(self, input: InputKind) -> Self {
        self.with_props(|p| p.input = input)
    }

    pub fn disabled(self, disabled: bool) -> Self {
        self.with_props(|p| p.disabled = disabled)
    }

    pub fn autofocus(self) -> Self {
        self.with_props(|p| p.autofocus = true)
    }

    fn with_props(mut self, f: impl FnOnce(&mut FieldProps)) -> Self {
        if let FieldKind::Generated(props) = &mut self.kind {
            f(props);
        }
        self
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.kind, FieldKind::Custom(_))
    }
}

/// Human-readable label for a field name (`firstName` -> `First Name`)
pub fn default_label(name: &str) -> String {
    name.to_title_case()
}

// ============================================================================
// Schema Compiler
// ============================================================================

/// Derive the initial-values record from a field map
pub fn compile_initial_values<V>(fields: &Fields<V>) -> FormValues {
    fields
        .iter()
        .map(|(name, spec)| (name.clone(), spec.initial_value.clone()))
        .collect()
}

/// Combine every field's rule into one object-level validator
pub fn compile_validation_schema<V>(fields: &Fields<V>) -> ObjectSchema {
    fields
        .iter()
        .filter_map(|(name, spec)| spec.rule.as_ref().map(|rule| (name, rule)))
        .fold(ObjectSchema::new(), |schema, (name, rule)| {
            schema.field(name.clone(), rule.clone())
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    type TestFields = Fields<&'static str>;

    #[test]
    fn test_empty_fields_compile_to_empty_record() {
        let fields = TestFields::new();
        assert!(compile_initial_values(&fields).is_empty());
        assert!(compile_validation_schema(&fields).is_empty());
    }

    #[test]
    fn test_initial_values_keep_keys_and_order() {
        let mut fields = TestFields::new();
        fields.insert("qty".into(), FieldSpec::number(1));
        fields.insert("name".into(), FieldSpec::text("Ann"));
        fields.insert("agree".into(), FieldSpec::checkbox(false));
        fields.insert("avatar".into(), FieldSpec::custom(Value::Null, "AvatarPicker"));

        let values = compile_initial_values(&fields);
        assert_eq!(
            values.keys().collect::<Vec<_>>(),
            vec!["qty", "name", "agree", "avatar"]
        );
        assert_eq!(values["qty"], json!(1));
        assert_eq!(values["name"], json!("Ann"));
        assert_eq!(values["agree"], json!(false));
        assert_eq!(values["avatar"], Value::Null);
    }

    #[test]
    fn test_schema_only_includes_fields_with_rules() {
        let mut fields = TestFields::new();
        fields.insert(
            "email".into(),
            FieldSpec::email("").rule(FieldRule::new().required().email()),
        );
        fields.insert("nickname".into(), FieldSpec::text(""));

        let schema = compile_validation_schema(&fields);
        assert_eq!(schema.len(), 1);
        assert!(schema.contains("email"));
        assert!(!schema.contains("nickname"));
    }

    #[test]
    fn test_default_label() {
        assert_eq!(default_label("firstName"), "First Name");
        assert_eq!(default_label("confirm_password"), "Confirm Password");
        assert_eq!(default_label("qty"), "Qty");
    }

    #[test]
    fn test_display_setters_ignore_custom_fields() {
        let spec: FieldSpec<&str> = FieldSpec::custom("", "Picker").label("Ignored");
        assert!(spec.is_custom());

        let spec: FieldSpec<&str> = FieldSpec::text("").label("Full name").autofocus();
        match spec.kind {
            FieldKind::Generated(props) => {
                assert_eq!(props.label.as_deref(), Some("Full name"));
                assert!(props.autofocus);
            }
            FieldKind::Custom(_) => panic!("expected generated field"),
        }
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(InputKind::Number.coerce("42".into()), json!(42));
        assert_eq!(InputKind::Number.coerce(" 2.5 ".into()), json!(2.5));
        assert_eq!(InputKind::Number.coerce("abc".into()), json!("abc"));
    }

    #[test]
    fn test_coerce_checkbox_and_text() {
        assert_eq!(InputKind::Checkbox.coerce("true".into()), json!(true));
        assert_eq!(InputKind::Checkbox.coerce("false".into()), json!(false));
        assert_eq!(InputKind::Text.coerce("hi".into()), json!("hi"));
        assert_eq!(InputKind::Email.html_type(), "email");
        assert_eq!(InputKind::Multiline { rows: 3 }.html_type(), "text");
    }
}
