//! Form field schema and field-level errors

use crate::validators::Validator;

/// Error produced by a single validation rule.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
	#[error("{0}")]
	Validation(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A single declared field on a [`Form`](crate::Form).
///
/// Fields are evaluated in declaration order; each field runs its rules in
/// the order they were attached.
///
/// # Examples
///
/// ```
/// use formgate::FormField;
/// use formgate::validators::RequiredValidator;
///
/// let field = FormField::new("name").with_validator(RequiredValidator::new());
/// assert_eq!(field.name(), "name");
/// ```
#[derive(Debug)]
pub struct FormField {
	name: String,
	label: Option<String>,
	default: serde_json::Value,
	validators: Vec<Box<dyn Validator>>,
}

impl FormField {
	/// Create a new field with the given name.
	///
	/// The field starts with no rules and a `null` default value.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			default: serde_json::Value::Null,
			validators: vec![],
		}
	}

	/// Set the human-readable label for the field.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::FormField;
	///
	/// let field = FormField::new("name").with_label("Task name");
	/// assert_eq!(field.label(), Some("Task name"));
	/// ```
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the value used when the submitted input has no entry for this field.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::FormField;
	/// use serde_json::json;
	///
	/// let field = FormField::new("priority").with_default(json!("normal"));
	/// assert_eq!(field.default_value(), &json!("normal"));
	/// ```
	pub fn with_default(mut self, value: serde_json::Value) -> Self {
		self.default = value;
		self
	}

	/// Attach a validation rule. Rules run in the order they were attached.
	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Box::new(validator));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn default_value(&self) -> &serde_json::Value {
		&self.default
	}

	/// Run every rule against `value`, collecting the message of each failed
	/// rule in rule-declaration order. An empty result means the field passed.
	pub fn check(&self, value: &serde_json::Value) -> Vec<String> {
		self.validators
			.iter()
			.filter_map(|validator| validator.validate(value).err())
			.map(|error| error.to_string())
			.collect()
	}
}
