//! Failure-handling strategies
//!
//! When a bound form is invalid the interceptor defers to exactly one
//! [`FailureHandler`]. The two built-in strategies differ in control flow:
//! the method strategy absorbs the failure into a normal alternate return
//! value, the vnd.error strategy always raises.

use crate::context::CallContext;
use crate::error::{InterceptError, Result};
use crate::form::Form;
use crate::metadata::{DEFAULT_ON_FAILURE_METHOD, FailureMetadata};
use crate::response::Response;
use crate::vnd_error::VndError;

/// Strategy invoked when form validation fails.
///
/// Given the resolved metadata, the call context, and the (invalid) bound
/// form, a handler either produces a replacement result value or raises a
/// structured error. Whatever it does becomes the intercepted call's
/// outcome.
pub trait FailureHandler: Send + Sync {
	fn handle(
		&self,
		metadata: &FailureMetadata,
		ctx: &dyn CallContext,
		form: &Form,
	) -> Result<Response>;
}

/// Default strategy: report failure as a normal alternate return value.
///
/// Resolves the alternate action name from the metadata (falling back to
/// this handler's configured default) and invokes it on the receiver. The
/// alternate action's result becomes the call's result; only a
/// misconfigured action name raises an error.
#[derive(Debug, Clone)]
pub struct OnFailureMethodHandler {
	default_method: String,
}

impl OnFailureMethodHandler {
	pub fn new() -> Self {
		Self {
			default_method: DEFAULT_ON_FAILURE_METHOD.to_string(),
		}
	}

	/// Change the action name used when the metadata does not carry one.
	pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
		self.default_method = method.into();
		self
	}
}

impl Default for OnFailureMethodHandler {
	fn default() -> Self {
		Self::new()
	}
}

impl FailureHandler for OnFailureMethodHandler {
	fn handle(
		&self,
		metadata: &FailureMetadata,
		ctx: &dyn CallContext,
		_form: &Form,
	) -> Result<Response> {
		let method = match metadata {
			FailureMetadata::Method(m) => m.method(),
			FailureMetadata::VndError(_) => self.default_method.as_str(),
		};
		tracing::debug!(call = ctx.target(), method, "invoking on-failure action");
		match ctx.receiver().invoke_failure_action(method) {
			Some(result) => result,
			None => Err(InterceptError::InvalidOnFailureMethod {
				method: method.to_string(),
			}),
		}
	}
}

/// Structured-error strategy: always raises
/// [`InterceptError::ValidationFailed`] carrying a [`VndError`] body.
///
/// The base body is `message: "Validation failed"`, `path` from the call
/// context, and the form's failure messages. Non-empty metadata overrides
/// replace `message` and `path`; `logref` is added only when present and
/// non-empty. This handler never returns a value.
#[derive(Debug, Clone, Default)]
pub struct VndErrorHandler;

impl VndErrorHandler {
	pub fn new() -> Self {
		Self
	}
}

impl FailureHandler for VndErrorHandler {
	fn handle(
		&self,
		metadata: &FailureMetadata,
		ctx: &dyn CallContext,
		form: &Form,
	) -> Result<Response> {
		let overrides = match metadata {
			FailureMetadata::VndError(overrides) => Some(overrides),
			FailureMetadata::Method(_) => None,
		};

		// Empty overrides carry the same meaning as absent ones.
		let message = overrides
			.and_then(|o| o.message())
			.filter(|m| !m.is_empty())
			.unwrap_or("Validation failed");
		let path = overrides
			.and_then(|o| o.path())
			.filter(|p| !p.is_empty())
			.unwrap_or_else(|| ctx.request_path());
		let logref = overrides.and_then(|o| o.logref()).filter(|l| !l.is_empty());

		let mut error = VndError::new(message, path, form.failure_messages().to_vec());
		if let Some(logref) = logref {
			error = error.with_logref(logref);
		}
		tracing::debug!(call = ctx.target(), "raising structured validation error");
		Err(InterceptError::ValidationFailed(error))
	}
}
