//! Field validation rules
//!
//! This module provides the standard validators that plug into the form
//! field validation pipeline. Each validator checks one bound value and
//! reports a single failure message; fields collect the messages of every
//! failed rule in rule-declaration order.

use crate::field::{FieldError, FieldResult};
use regex::Regex;

/// A single validation rule attached to a form field.
///
/// Implementations must be cheap to call and free of side effects: a bound
/// form may run the same rule set on every submission.
pub trait Validator: Send + Sync + std::fmt::Debug {
	/// Checks a bound value, returning the failure message on rejection.
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()>;
}

/// Validates that a value is present and non-empty.
///
/// Rejects `null`, the empty string, and empty arrays; every other value
/// passes.
///
/// # Examples
///
/// ```
/// use formgate::validators::{RequiredValidator, Validator};
/// use serde_json::json;
///
/// let validator = RequiredValidator::new();
/// assert!(validator.validate(&json!("bear")).is_ok());
/// assert!(validator.validate(&json!("")).is_err());
/// assert!(validator.validate(&serde_json::Value::Null).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RequiredValidator {
	/// Optional custom error message shown on validation failure
	message: Option<String>,
}

impl RequiredValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for RequiredValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let missing = match value {
			serde_json::Value::Null => true,
			serde_json::Value::String(s) => s.is_empty(),
			serde_json::Value::Array(items) => items.is_empty(),
			_ => false,
		};
		if missing {
			let msg = self.message.as_deref().unwrap_or("This field is required.");
			return Err(FieldError::Validation(msg.to_string()));
		}
		Ok(())
	}
}

impl Default for RequiredValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates that a string value consists of alphabetic characters only.
///
/// A missing, empty, or non-string value fails the rule.
///
/// # Examples
///
/// ```
/// use formgate::validators::{AlphabeticValidator, Validator};
/// use serde_json::json;
///
/// let validator = AlphabeticValidator::new();
/// assert!(validator.validate(&json!("BEAR")).is_ok());
/// assert!(validator.validate(&json!("BEAR1")).is_err());
/// assert!(validator.validate(&serde_json::Value::Null).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AlphabeticValidator {
	message: Option<String>,
}

impl AlphabeticValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	/// Sets a custom error message returned on validation failure.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::validators::{AlphabeticValidator, Validator};
	/// use serde_json::json;
	///
	/// let validator = AlphabeticValidator::new().with_message("Name must be alphabetic only.");
	/// let error = validator.validate(&json!("123")).unwrap_err();
	/// assert_eq!(error.to_string(), "Name must be alphabetic only.");
	/// ```
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for AlphabeticValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let ok = value
			.as_str()
			.is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_alphabetic()));
		if ok {
			Ok(())
		} else {
			let msg = self.message.as_deref().unwrap_or("Enter letters only.");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

impl Default for AlphabeticValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates that a string value consists of letters and digits only.
#[derive(Debug, Clone)]
pub struct AlphanumericValidator {
	message: Option<String>,
}

impl AlphanumericValidator {
	pub fn new() -> Self {
		Self { message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for AlphanumericValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let ok = value
			.as_str()
			.is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric()));
		if ok {
			Ok(())
		} else {
			let msg = self
				.message
				.as_deref()
				.unwrap_or("Enter letters and numbers only.");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

impl Default for AlphanumericValidator {
	fn default() -> Self {
		Self::new()
	}
}

/// Validates a string value against an arbitrary regular expression.
///
/// # Examples
///
/// ```
/// use formgate::validators::{PatternValidator, Validator};
/// use serde_json::json;
///
/// let validator = PatternValidator::new(r"^[a-z]+-\d+$").unwrap();
/// assert!(validator.validate(&json!("task-42")).is_ok());
/// assert!(validator.validate(&json!("TASK")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternValidator {
	pattern: Regex,
	message: Option<String>,
}

impl PatternValidator {
	/// Compiles `pattern` into a validator.
	///
	/// # Errors
	///
	/// Returns the underlying [`regex::Error`] when the pattern is invalid.
	pub fn new(pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			pattern: Regex::new(pattern)?,
			message: None,
		})
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for PatternValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let ok = value.as_str().is_some_and(|s| self.pattern.is_match(s));
		if ok {
			Ok(())
		} else {
			let msg = self
				.message
				.as_deref()
				.unwrap_or("This value does not match the required pattern.");
			Err(FieldError::Validation(msg.to_string()))
		}
	}
}

/// Validates that a string value has at least `min` characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
	min: usize,
	message: Option<String>,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min, message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for MinLengthValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let length = value.as_str().map_or(0, |s| s.chars().count());
		if length >= self.min {
			Ok(())
		} else {
			let msg = match &self.message {
				Some(m) => m.clone(),
				None => format!("Ensure this value has at least {} characters.", self.min),
			};
			Err(FieldError::Validation(msg))
		}
	}
}

/// Validates that a string value has at most `max` characters.
///
/// # Examples
///
/// ```
/// use formgate::validators::{MaxLengthValidator, Validator};
/// use serde_json::json;
///
/// let validator = MaxLengthValidator::new(4);
/// assert!(validator.validate(&json!("BEAR")).is_ok());
/// assert!(validator.validate(&json!("BEARS")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
	max: usize,
	message: Option<String>,
}

impl MaxLengthValidator {
	pub fn new(max: usize) -> Self {
		Self { max, message: None }
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for MaxLengthValidator {
	fn validate(&self, value: &serde_json::Value) -> FieldResult<()> {
		let length = value.as_str().map_or(0, |s| s.chars().count());
		if length <= self.max {
			Ok(())
		} else {
			let msg = match &self.message {
				Some(m) => m.clone(),
				None => format!("Ensure this value has at most {} characters.", self.max),
			};
			Err(FieldError::Validation(msg))
		}
	}
}
