//! Validation engine for dialog forms
//!
//! A [`FieldRule`] is an ordered chain of checks for one field, built the
//! way schema builders usually read:
//!
//! ```rust
//! use dialog_core::validation::FieldRule;
//!
//! let rule = FieldRule::new()
//!     .required()
//!     .with_message("Email is required")
//!     .email();
//! ```
//!
//! An [`ObjectSchema`] maps field names to rules and validates a whole
//! [`FormValues`] record at once, yielding the first failing message per field.

use heck::ToTitleCase;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use crate::types::{FieldErrors, FormValues, is_absent, value_as_text};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

// ============================================================================
// Predicate
// ============================================================================

/// Caller-supplied check over a field value and the whole record
#[derive(Clone)]
pub struct Predicate(Rc<dyn Fn(&Value, &FormValues) -> bool>);

impl Predicate {
    pub fn new(f: impl Fn(&Value, &FormValues) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn test(&self, value: &Value, values: &FormValues) -> bool {
        (self.0)(value, values)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

// ============================================================================
// Check
// ============================================================================

/// A single validation check
#[derive(Debug, Clone)]
pub enum Check {
    /// Field must have a value
    Required,
    /// Minimum length (characters, or items for arrays)
    MinLength(usize),
    /// Maximum length
    MaxLength(usize),
    /// Minimum numeric value
    Min(f64),
    /// Maximum numeric value
    Max(f64),
    /// Text must match the pattern
    Matches(Regex),
    /// Valid email address
    Email,
    /// Must equal the value of another field
    Equals(String),
    /// Must be one of the listed values
    OneOf(Vec<Value>),
    /// Caller-supplied predicate
    Custom(Predicate),
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Check::Required, Check::Required) | (Check::Email, Check::Email) => true,
            (Check::MinLength(a), Check::MinLength(b)) | (Check::MaxLength(a), Check::MaxLength(b)) => {
                a == b
            }
            (Check::Min(a), Check::Min(b)) | (Check::Max(a), Check::Max(b)) => a == b,
            (Check::Matches(a), Check::Matches(b)) => a.as_str() == b.as_str(),
            (Check::Equals(a), Check::Equals(b)) => a == b,
            (Check::OneOf(a), Check::OneOf(b)) => a == b,
            (Check::Custom(a), Check::Custom(b)) => a == b,
            _ => false,
        }
    }
}

impl Check {
    /// Get a user-friendly error message
    pub fn default_message(&self) -> String {
        match self {
            Check::Required => "This field is required".to_string(),
            Check::MinLength(n) => format!("Minimum length is {} characters", n),
            Check::MaxLength(n) => format!("Maximum length is {} characters", n),
            Check::Min(n) => format!("Minimum value is {}", n),
            Check::Max(n) => format!("Maximum value is {}", n),
            Check::Matches(re) => format!("Must match the pattern {}", re.as_str()),
            Check::Email => "Must be a valid email address".to_string(),
            Check::Equals(other) => format!("Must match {}", other.to_title_case()),
            Check::OneOf(values) => format!(
                "Must be one of: {}",
                values.iter().map(value_as_text).collect::<Vec<_>>().join(", ")
            ),
            Check::Custom(_) => "Invalid value".to_string(),
        }
    }

    /// Whether the value passes this check
    ///
    /// Everything except `Required` lets absent values through.
    pub fn passes(&self, value: &Value, values: &FormValues) -> bool {
        if is_absent(value) {
            return !matches!(self, Check::Required);
        }

        match self {
            Check::Required => true,
            Check::MinLength(n) => length_of(value) >= *n,
            Check::MaxLength(n) => length_of(value) <= *n,
            Check::Min(n) => number_of(value).is_some_and(|v| v >= *n),
            Check::Max(n) => number_of(value).is_some_and(|v| v <= *n),
            Check::Matches(re) => re.is_match(&value_as_text(value)),
            Check::Email => EMAIL_REGEX.is_match(&value_as_text(value)),
            Check::Equals(other) => values.get(other).unwrap_or(&Value::Null) == value,
            Check::OneOf(allowed) => allowed.contains(value),
            Check::Custom(predicate) => predicate.test(value, values),
        }
    }
}

fn length_of(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.len(),
        other => value_as_text(other).chars().count(),
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// FieldRule
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct RuleStep {
    check: Check,
    message: Option<String>,
}

/// Ordered chain of checks for a single field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRule {
    steps: Vec<RuleStep>,
}

impl FieldRule {
    /// Create an empty rule (imposes no constraint)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a check
    pub fn check(mut self, check: Check) -> Self {
        self.steps.push(RuleStep {
            check,
            message: None,
        });
        self
    }

    /// Replace the message of the most recently added check
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(step) = self.steps.last_mut() {
            step.message = Some(message.into());
        }
        self
    }

    pub fn required(self) -> Self {
        self.check(Check::Required)
    }

    pub fn email(self) -> Self {
        self.check(Check::Email)
    }

    pub fn min_length(self, n: usize) -> Self {
        self.check(Check::MinLength(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.check(Check::MaxLength(n))
    }

    pub fn min(self, n: f64) -> Self {
        self.check(Check::Min(n))
    }

    pub fn max(self, n: f64) -> Self {
        self.check(Check::Max(n))
    }

    pub fn matches(self, pattern: Regex) -> Self {
        self.check(Check::Matches(pattern))
    }

    /// Must equal the value of `other_field`
    pub fn equals(self, other_field: impl Into<String>) -> Self {
        self.check(Check::Equals(other_field.into()))
    }

    pub fn one_of(self, values: impl IntoIterator<Item = Value>) -> Self {
        self.check(Check::OneOf(values.into_iter().collect()))
    }

    pub fn custom(self, f: impl Fn(&Value, &FormValues) -> bool + 'static) -> Self {
        self.check(Check::Custom(Predicate::new(f)))
    }

    /// Check if the rule contains a `Required` check
    pub fn is_required(&self) -> bool {
        self.steps.iter().any(|s| s.check == Check::Required)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Validate a value, returning the first failing message
    pub fn validate(&self, value: &Value, values: &FormValues) -> Option<String> {
        self.steps
            .iter()
            .find(|step| !step.check.passes(value, values))
            .map(|step| {
                step.message
                    .clone()
                    .unwrap_or_else(|| step.check.default_message())
            })
    }
}

// ============================================================================
// ObjectSchema
// ============================================================================

/// Object-level validator composed of per-field rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    rules: IndexMap<String, FieldRule>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for a field
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        self.rules.insert(name.into(), rule);
    }

    /// Layer `other` over this schema; `other` wins for shared field names
    pub fn merge(mut self, other: &ObjectSchema) -> Self {
        for (name, rule) in &other.rules {
            self.rules.insert(name.clone(), rule.clone());
        }
        self
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate one field against the whole record
    pub fn validate_field(&self, name: &str, values: &FormValues) -> Option<String> {
        let rule = self.rules.get(name)?;
        rule.validate(values.get(name).unwrap_or(&Value::Null), values)
    }

    /// Validate the whole record; empty result means valid
    pub fn validate(&self, values: &FormValues) -> FieldErrors {
        self.rules
            .keys()
            .filter_map(|name| {
                self.validate_field(name, values)
                    .map(|message| (name.clone(), message))
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
