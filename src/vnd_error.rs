//! Structured error body for client-facing validation failures
//!
//! The body follows the `application/vnd.error+json` convention: a fixed
//! `message` / `path` / `validation_messages` payload with an optional
//! `logref`, serialized with a canonical key order so the same error always
//! produces byte-identical output.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Immutable structured payload carried by a validation failure.
///
/// Serializes deterministically with keys in the order `message`, `path`,
/// `validation_messages`, then `logref` when present. Field names appear in
/// form declaration order, messages in rule order.
///
/// # Examples
///
/// ```
/// use formgate::VndError;
///
/// let error = VndError::new(
/// 	"Validation failed",
/// 	"",
/// 	vec![("name".to_string(), vec!["Name must be alphabetic only.".to_string()])],
/// );
/// assert_eq!(error.message(), "Validation failed");
/// assert!(error.to_json().starts_with("{\n    \"message\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VndError {
	message: String,
	path: String,
	validation_messages: Vec<(String, Vec<String>)>,
	logref: Option<String>,
}

impl VndError {
	pub fn new(
		message: impl Into<String>,
		path: impl Into<String>,
		validation_messages: Vec<(String, Vec<String>)>,
	) -> Self {
		Self {
			message: message.into(),
			path: path.into(),
			validation_messages,
			logref: None,
		}
	}

	/// Attach a `logref` correlation token; it serializes as the last key.
	pub fn with_logref(mut self, logref: impl Into<String>) -> Self {
		self.logref = Some(logref.into());
		self
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn logref(&self) -> Option<&str> {
		self.logref.as_deref()
	}

	pub fn validation_messages(&self) -> &[(String, Vec<String>)] {
		&self.validation_messages
	}

	/// Canonical wire form: pretty-printed JSON with 4-space indentation.
	///
	/// Serializing the same error twice yields byte-identical output.
	pub fn to_json(&self) -> String {
		let mut buf = Vec::new();
		let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
		let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
		self.serialize(&mut serializer)
			.expect("vnd.error body is a string map; serialization cannot fail");
		String::from_utf8(buf).expect("serde_json emits valid utf-8")
	}
}

impl Serialize for VndError {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let len = 3 + usize::from(self.logref.is_some());
		let mut map = serializer.serialize_map(Some(len))?;
		map.serialize_entry("message", &self.message)?;
		map.serialize_entry("path", &self.path)?;
		map.serialize_entry(
			"validation_messages",
			&FieldMessages(&self.validation_messages),
		)?;
		if let Some(logref) = &self.logref {
			map.serialize_entry("logref", logref)?;
		}
		map.end()
	}
}

/// Serializes the ordered field/messages pairs as a JSON object without
/// re-sorting the keys.
struct FieldMessages<'a>(&'a [(String, Vec<String>)]);

impl Serialize for FieldMessages<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (field, messages) in self.0 {
			map.serialize_entry(field, messages)?;
		}
		map.end()
	}
}

impl fmt::Display for VndError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_json())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn canonical_key_order() {
		let error = VndError::new(
			"Validation failed",
			"/tasks",
			vec![("name".to_string(), vec!["bad".to_string()])],
		)
		.with_logref("abc123");

		let json = error.to_json();
		let message_at = json.find("\"message\"").unwrap();
		let path_at = json.find("\"path\"").unwrap();
		let messages_at = json.find("\"validation_messages\"").unwrap();
		let logref_at = json.find("\"logref\"").unwrap();
		assert!(message_at < path_at);
		assert!(path_at < messages_at);
		assert!(messages_at < logref_at);
	}

	#[test]
	fn empty_messages_serialize_as_empty_object() {
		let error = VndError::new("Validation failed", "", vec![]);
		assert_eq!(
			error.to_json(),
			"{\n    \"message\": \"Validation failed\",\n    \"path\": \"\",\n    \"validation_messages\": {}\n}"
		);
	}

	#[test]
	fn display_matches_to_json() {
		let error = VndError::new("Validation failed", "", vec![]);
		assert_eq!(error.to_string(), error.to_json());
	}

	#[test]
	fn absent_logref_is_omitted() {
		let error = VndError::new("Validation failed", "", vec![]);
		assert!(!error.to_json().contains("logref"));
	}
}
