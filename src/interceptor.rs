//! The call interceptor: pauses a form-submitting action, validates its
//! input, and routes validation failure to the declared strategy.

use crate::context::{Argument, CallContext};
use crate::error::{InterceptError, Result};
use crate::handler::{FailureHandler, OnFailureMethodHandler, VndErrorHandler};
use crate::metadata::{FailureMetadata, MetadataLookup};
use crate::response::Response;
use std::sync::Arc;

/// Intercepts form-submitting actions.
///
/// Before the action body runs, the interceptor locates the call's single
/// form argument, resolves the declared failure metadata, and binds the
/// submitted input. A valid form lets the call proceed untouched; an invalid
/// one is routed to exactly one failure handler, whose outcome becomes the
/// call's outcome. The original call body never executes when validation
/// fails.
///
/// # Examples
///
/// ```
/// use formgate::validators::AlphabeticValidator;
/// use formgate::{
/// 	Argument, Form, FormField, InputInterceptor, Invocation, MetadataRegistry, Receiver,
/// 	Response, Result,
/// };
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// struct TaskController;
///
/// impl Receiver for TaskController {
/// 	fn invoke_failure_action(&self, name: &str) -> Option<Result<Response>> {
/// 		match name {
/// 			"on_failure" => Some(Ok(Response::bad_request())),
/// 			_ => None,
/// 		}
/// 	}
/// }
///
/// let mut submitted = HashMap::new();
/// submitted.insert("name".to_string(), serde_json::json!("BEAR"));
/// let form = Form::new()
/// 	.with_field(FormField::new("name").with_validator(AlphabeticValidator::new()))
/// 	.with_submitted(submitted);
///
/// let mut call = Invocation::new("TaskController::create", Arc::new(TaskController), |_, _| {
/// 	Ok(Response::created())
/// })
/// .with_argument(Argument::Form(form));
///
/// let interceptor = InputInterceptor::new(Arc::new(MetadataRegistry::new()));
/// let response = interceptor.intercept(&mut call).unwrap();
/// assert_eq!(response.status, http::StatusCode::CREATED);
/// ```
pub struct InputInterceptor {
	lookup: Arc<dyn MetadataLookup>,
	default_metadata: Arc<FailureMetadata>,
	method_handler: Arc<dyn FailureHandler>,
	vnd_error_handler: Arc<dyn FailureHandler>,
}

impl InputInterceptor {
	pub fn new(lookup: Arc<dyn MetadataLookup>) -> Self {
		Self {
			lookup,
			default_metadata: Arc::new(FailureMetadata::default()),
			method_handler: Arc::new(OnFailureMethodHandler::new()),
			vnd_error_handler: Arc::new(VndErrorHandler::new()),
		}
	}

	/// Metadata applied to calls with no registered declaration.
	pub fn with_default_metadata(mut self, metadata: FailureMetadata) -> Self {
		self.default_metadata = Arc::new(metadata);
		self
	}

	/// Replace the handler dispatched for [`FailureMetadata::Method`].
	pub fn with_method_handler(mut self, handler: Arc<dyn FailureHandler>) -> Self {
		self.method_handler = handler;
		self
	}

	/// Replace the handler dispatched for [`FailureMetadata::VndError`].
	pub fn with_vnd_error_handler(mut self, handler: Arc<dyn FailureHandler>) -> Self {
		self.vnd_error_handler = handler;
		self
	}

	/// Intercept one call.
	///
	/// # Errors
	///
	/// [`InterceptError::InvalidFormProperty`] when the argument list does
	/// not contain exactly one form, raised before any binding. Whatever the
	/// dispatched failure handler raises propagates unmodified.
	pub fn intercept(&self, ctx: &mut dyn CallContext) -> Result<Response> {
		let form_index = Self::locate_form(ctx.arguments())?;
		let metadata = self
			.lookup
			.lookup(ctx.target())
			.unwrap_or_else(|| Arc::clone(&self.default_metadata));

		let valid = {
			let form = ctx.arguments_mut()[form_index]
				.as_form_mut()
				.expect("argument at located index is a form");
			let data = form.submitted().clone();
			form.bind(data);
			form.is_valid()
		};

		if valid {
			tracing::debug!(call = ctx.target(), "form valid; proceeding");
			return ctx.proceed();
		}

		tracing::debug!(call = ctx.target(), "form invalid; dispatching failure handler");
		let ctx: &dyn CallContext = &*ctx;
		let form = ctx.arguments()[form_index]
			.as_form()
			.expect("argument at located index is a form");
		let handler = match metadata.as_ref() {
			FailureMetadata::Method(_) => self.method_handler.as_ref(),
			FailureMetadata::VndError(_) => self.vnd_error_handler.as_ref(),
		};
		handler.handle(metadata.as_ref(), ctx, form)
	}

	/// Index of the single form argument.
	fn locate_form(arguments: &[Argument]) -> Result<usize> {
		let mut located = None;
		let mut found = 0usize;
		for (index, argument) in arguments.iter().enumerate() {
			if argument.is_form() {
				found += 1;
				located.get_or_insert(index);
			}
		}
		match (located, found) {
			(Some(index), 1) => Ok(index),
			_ => Err(InterceptError::InvalidFormProperty { found }),
		}
	}
}
