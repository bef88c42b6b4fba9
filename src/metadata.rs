//! Failure-handling metadata and its process-wide registry
//!
//! Call targets declare once, at startup, how their validation failures are
//! handled; the interceptor resolves that declaration per call through the
//! [`MetadataLookup`] capability. Declared metadata is immutable for the
//! process lifetime, so the registry is a read-mostly cache.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Alternate action invoked when a call declares no failure metadata.
pub const DEFAULT_ON_FAILURE_METHOD: &str = "on_failure";

/// Declarative failure-handling policy attached to a call target.
///
/// A closed set: the interceptor dispatches exhaustively on the variant, so
/// exactly one strategy applies to any given call.
#[derive(Debug, Clone)]
pub enum FailureMetadata {
	/// Report failure through an alternate method on the receiver.
	Method(OnFailureMethod),
	/// Raise a structured vnd.error payload, optionally overridden.
	VndError(VndErrorMetadata),
}

impl FailureMetadata {
	/// Shorthand for a [`FailureMetadata::Method`] naming `method`.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::FailureMetadata;
	///
	/// let metadata = FailureMetadata::method("bad_request_action");
	/// assert!(matches!(metadata, FailureMetadata::Method(_)));
	/// ```
	pub fn method(method: impl Into<String>) -> Self {
		Self::Method(OnFailureMethod::new(method))
	}
}

impl Default for FailureMetadata {
	fn default() -> Self {
		Self::Method(OnFailureMethod::default())
	}
}

/// Metadata for the method strategy: the name of the alternate zero-argument
/// action to invoke on validation failure.
#[derive(Debug, Clone)]
pub struct OnFailureMethod {
	method: String,
}

impl OnFailureMethod {
	pub fn new(method: impl Into<String>) -> Self {
		Self {
			method: method.into(),
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}
}

impl Default for OnFailureMethod {
	fn default() -> Self {
		Self::new(DEFAULT_ON_FAILURE_METHOD)
	}
}

/// Optional overrides merged into the structured error body.
///
/// An empty string carries the same meaning as an absent field: it never
/// overrides the base value. This mirrors the merge policy of the system
/// this wire format is compatible with.
///
/// # Examples
///
/// ```
/// use formgate::VndErrorMetadata;
///
/// let metadata = VndErrorMetadata::new()
/// 	.with_message("Task rejected")
/// 	.with_logref("abc123");
/// assert_eq!(metadata.message(), Some("Task rejected"));
/// assert_eq!(metadata.path(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VndErrorMetadata {
	message: Option<String>,
	path: Option<String>,
	logref: Option<String>,
}

impl VndErrorMetadata {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn with_logref(mut self, logref: impl Into<String>) -> Self {
		self.logref = Some(logref.into());
		self
	}

	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	pub fn path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	pub fn logref(&self) -> Option<&str> {
		self.logref.as_deref()
	}
}

/// Read-only metadata resolution, keyed by call-target identity.
///
/// Must be a pure, side-effect-free read; the interceptor calls it once per
/// intercepted call.
pub trait MetadataLookup: Send + Sync {
	fn lookup(&self, target: &str) -> Option<Arc<FailureMetadata>>;
}

/// Statically registered mapping from call target to failure metadata.
///
/// Registered once during startup, read concurrently for the rest of the
/// process lifetime.
///
/// # Examples
///
/// ```
/// use formgate::{FailureMetadata, MetadataLookup, MetadataRegistry};
///
/// let registry = MetadataRegistry::new();
/// registry.register("TaskController::create", FailureMetadata::method("bad_request_action"));
///
/// assert!(registry.lookup("TaskController::create").is_some());
/// assert!(registry.lookup("TaskController::delete").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MetadataRegistry {
	entries: RwLock<HashMap<String, Arc<FailureMetadata>>>,
}

impl MetadataRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare the failure policy for `target`, replacing any previous one.
	pub fn register(&self, target: impl Into<String>, metadata: FailureMetadata) {
		let target = target.into();
		tracing::trace!(call = %target, "registering failure metadata");
		self.entries.write().insert(target, Arc::new(metadata));
	}

	/// Builder form of [`register`](Self::register) for startup wiring.
	pub fn with_entry(self, target: impl Into<String>, metadata: FailureMetadata) -> Self {
		self.register(target, metadata);
		self
	}
}

impl MetadataLookup for MetadataRegistry {
	fn lookup(&self, target: &str) -> Option<Arc<FailureMetadata>> {
		self.entries.read().get(target).cloned()
	}
}
