//! Form schema binding and validation state

use crate::field::FormField;
use std::collections::HashMap;

/// Constant-time byte comparison to prevent timing attacks on CSRF tokens.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	let mut result = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		result |= x ^ y;
	}
	result == 0
}

/// Submitted-input key carrying the anti-CSRF token.
pub const CSRF_TOKEN_FIELD: &str = "_csrf_token";

/// Key under which form-level (non-field-specific) failure messages are
/// reported.
pub const ALL_FIELDS_KEY: &str = "_all";

/// Binding state of a form.
///
/// A form is either not yet bound, bound and valid, or bound and invalid,
/// never valid while carrying failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
	Unbound,
	Valid,
	Invalid,
}

/// A mutable schema instance with named, ordered fields.
///
/// A form is created fresh per call by the controller, carries the raw
/// submitted input from construction, is bound exactly once by the
/// interceptor, and is discarded when the call completes.
///
/// # Examples
///
/// ```
/// use formgate::{Form, FormField};
/// use formgate::validators::AlphabeticValidator;
/// use std::collections::HashMap;
/// use serde_json::json;
///
/// let mut form = Form::new()
/// 	.with_field(FormField::new("name").with_validator(AlphabeticValidator::new()));
///
/// let mut data = HashMap::new();
/// data.insert("name".to_string(), json!("BEAR"));
/// form.bind(data);
///
/// assert!(form.is_valid());
/// assert!(form.failure_messages().is_empty());
/// ```
#[derive(Debug)]
pub struct Form {
	fields: Vec<FormField>,
	submitted: HashMap<String, serde_json::Value>,
	data: HashMap<String, serde_json::Value>,
	errors: Vec<(String, Vec<String>)>,
	state: BindState,
	/// Expected anti-CSRF token; `None` disables the check
	csrf_token: Option<String>,
}

impl Form {
	/// Create a new empty form.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			fields: vec![],
			submitted: HashMap::new(),
			data: HashMap::new(),
			errors: vec![],
			state: BindState::Unbound,
			csrf_token: None,
		}
	}

	/// Add a field to the form. Fields validate in the order they were added.
	pub fn add_field(&mut self, field: FormField) {
		self.fields.push(field);
	}

	/// Builder form of [`add_field`](Self::add_field).
	pub fn with_field(mut self, field: FormField) -> Self {
		self.fields.push(field);
		self
	}

	/// Set the raw submitted input the form carries until binding.
	pub fn set_submitted(&mut self, data: HashMap<String, serde_json::Value>) {
		self.submitted = data;
	}

	/// Builder form of [`set_submitted`](Self::set_submitted).
	///
	/// # Examples
	///
	/// ```
	/// use formgate::Form;
	/// use std::collections::HashMap;
	/// use serde_json::json;
	///
	/// let mut submitted = HashMap::new();
	/// submitted.insert("name".to_string(), json!("BEAR"));
	///
	/// let form = Form::new().with_submitted(submitted);
	/// assert_eq!(form.submitted().get("name"), Some(&json!("BEAR")));
	/// ```
	pub fn with_submitted(mut self, data: HashMap<String, serde_json::Value>) -> Self {
		self.submitted = data;
		self
	}

	/// The raw submitted input carried since construction.
	pub fn submitted(&self) -> &HashMap<String, serde_json::Value> {
		&self.submitted
	}

	/// Arm the anti-CSRF check: binding fails unless the submitted input
	/// carries a matching token under [`CSRF_TOKEN_FIELD`].
	pub fn set_csrf_token(&mut self, token: String) {
		self.csrf_token = Some(token);
	}

	pub fn csrf_token(&self) -> Option<&str> {
		self.csrf_token.as_deref()
	}

	/// Bind and validate submitted data.
	///
	/// Populates each declared field from `data` by field name (a missing key
	/// leaves the field at its default value, not an error), then runs each
	/// field's rules in field-declaration order. The form ends up
	/// [`BindState::Valid`] iff no field failed; otherwise the per-field
	/// failure messages are available from
	/// [`failure_messages`](Self::failure_messages).
	///
	/// When an anti-CSRF token is armed, the token check runs first and
	/// short-circuits to [`BindState::Invalid`] on mismatch.
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.errors.clear();
		self.data = data;

		if !self.check_csrf() {
			self.errors.push((
				ALL_FIELDS_KEY.to_string(),
				vec!["CSRF token missing or incorrect.".to_string()],
			));
			self.state = BindState::Invalid;
			return;
		}

		for field in &self.fields {
			let value = match self.data.get(field.name()) {
				Some(v) => v.clone(),
				None => field.default_value().clone(),
			};
			let messages = field.check(&value);
			self.data.insert(field.name().to_string(), value);
			if !messages.is_empty() {
				self.errors.push((field.name().to_string(), messages));
			}
		}

		self.state = if self.errors.is_empty() {
			BindState::Valid
		} else {
			BindState::Invalid
		};
	}

	/// Validate the armed CSRF token against the bound data.
	///
	/// Returns `true` when no token is armed or the submitted token matches.
	fn check_csrf(&self) -> bool {
		let expected = match &self.csrf_token {
			Some(t) => t,
			None => return true,
		};
		match self.data.get(CSRF_TOKEN_FIELD).and_then(|v| v.as_str()) {
			Some(token) => constant_time_eq(token.as_bytes(), expected.as_bytes()),
			None => false,
		}
	}

	pub fn state(&self) -> BindState {
		self.state
	}

	pub fn is_bound(&self) -> bool {
		self.state != BindState::Unbound
	}

	/// `true` iff the form has been bound and every field passed its rules.
	pub fn is_valid(&self) -> bool {
		self.state == BindState::Valid
	}

	/// Per-field failure messages, fields in declaration order, messages in
	/// rule order. Empty when the form is valid or unbound.
	pub fn failure_messages(&self) -> &[(String, Vec<String>)] {
		&self.errors
	}

	/// The bound value for `name`, once the form has been bound.
	pub fn value(&self, name: &str) -> Option<&serde_json::Value> {
		self.data.get(name)
	}

	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}
