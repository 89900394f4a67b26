//! Contact form validation.
//!
//! Values are trimmed before validation and each field reports only its
//! first failing rule, so the form shows at most one message per field.
//!
//! Library-only: the browser widget does not mount a contact form, so pages
//! that have one call [`ContactForm`] from their own bindings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation result for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation passed.
    Valid,
    /// Validation failed with an error message.
    Invalid(String),
}

impl ValidationResult {
    /// Check if validation passed.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get the error message if invalid.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) => Some(msg),
            Self::Valid => None,
        }
    }
}

/// A validator that can validate a trimmed string value.
pub trait Validator: Send + Sync {
    /// Validate the given value.
    fn validate(&self, value: &str) -> ValidationResult;

    /// Get the name of this validator.
    fn name(&self) -> &'static str;
}

/// Required field validator.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Default for Required {
    fn default() -> Self {
        Self {
            message: "This field is required.".to_string(),
        }
    }
}

impl Validator for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

/// Minimum length validator, counted in UTF-16 code units.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    /// Create with custom message.
    pub fn with_message(min: usize, message: &str) -> Self {
        Self {
            min,
            message: message.to_string(),
        }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.encode_utf16().count() < self.min {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }

    fn name(&self) -> &'static str {
        "minLength"
    }
}

/// Email address validator: `local@domain.tld`, no whitespace, one `@`.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Default for Email {
    fn default() -> Self {
        Self {
            message: "Please enter a valid email address.".to_string(),
        }
    }
}

impl Email {
    /// Whether `value` looks like an email address.
    pub fn matches(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        // a dot with at least one character on each side
        let inner: Vec<char> = domain.chars().collect();
        inner.len() >= 3 && inner[1..inner.len() - 1].contains(&'.')
    }
}

impl Validator for Email {
    fn validate(&self, value: &str) -> ValidationResult {
        if Self::matches(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.message.clone())
        }
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

/// Validators for one field, run in order until the first failure.
#[derive(Default)]
pub struct FieldRules {
    validators: Vec<Box<dyn Validator>>,
}

impl std::fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.validators.iter().map(|v| v.name()).collect();
        f.debug_struct("FieldRules").field("validators", &names).finish()
    }
}

impl FieldRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator.
    pub fn add_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Add required validator.
    pub fn required(self) -> Self {
        self.add_validator(Required::default())
    }

    /// Add min length validator.
    pub fn min_length(self, min: usize, message: &str) -> Self {
        self.add_validator(MinLength::with_message(min, message))
    }

    /// Add email validator.
    pub fn email(self) -> Self {
        self.add_validator(Email::default())
    }

    /// Run validators until one fails.
    pub fn validate(&self, value: &str) -> ValidationResult {
        self.validators
            .iter()
            .map(|v| v.validate(value))
            .find(|r| !r.is_valid())
            .unwrap_or(ValidationResult::Valid)
    }
}

/// Fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    /// Sender name
    Name,
    /// Reply address
    Email,
    /// Optional subject line
    Subject,
    /// Message body
    Message,
}

impl ContactField {
    /// All fields, in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// `name` attribute of the input element.
    pub const fn input_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Look a field up by its `name` attribute.
    pub fn from_input_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.input_name() == name)
    }

    fn rules(self) -> FieldRules {
        match self {
            Self::Name => FieldRules::new()
                .required()
                .min_length(2, "Name must be at least 2 characters long."),
            Self::Email => FieldRules::new().required().email(),
            Self::Subject => FieldRules::new(),
            Self::Message => FieldRules::new()
                .required()
                .min_length(10, "Message must be at least 10 characters long."),
        }
    }
}

/// Trimmed, validated form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Sender name
    pub name: String,
    /// Reply address
    pub email: String,
    /// Subject line, possibly empty
    pub subject: String,
    /// Message body
    pub message: String,
}

/// State of the contact form.
#[derive(Debug, Default)]
pub struct ContactForm {
    values: BTreeMap<ContactField, String>,
    errors: BTreeMap<ContactField, String>,
}

impl ContactForm {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raw value of a field.
    pub fn set_value(&mut self, field: ContactField, value: &str) {
        self.values.insert(field, value.to_string());
    }

    /// Trimmed value of a field.
    pub fn value(&self, field: ContactField) -> &str {
        self.values.get(&field).map_or("", |v| v.trim())
    }

    /// Validate one field (on blur) and record its error.
    pub fn validate_field(&mut self, field: ContactField) -> ValidationResult {
        let result = field.rules().validate(self.value(field));
        match result.error() {
            Some(msg) => {
                self.errors.insert(field, msg.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
        result
    }

    /// Validate every field; true when all pass.
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in ContactField::ALL {
            if !self.validate_field(field).is_valid() {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Current error for a field.
    pub fn error(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether any field currently has an error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validate and, if everything passes, return the trimmed contents.
    pub fn submission(&mut self) -> Option<ContactSubmission> {
        if !self.validate_all() {
            tracing::debug!(errors = self.errors.len(), "contact form rejected");
            return None;
        }
        Some(ContactSubmission {
            name: self.value(ContactField::Name).to_string(),
            email: self.value(ContactField::Email).to_string(),
            subject: self.value(ContactField::Subject).to_string(),
            message: self.value(ContactField::Message).to_string(),
        })
    }

    /// Clear values and errors.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}
