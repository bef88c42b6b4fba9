//! Form-submission validation interception
//!
//! This crate pauses a form-submitting action call before its body runs,
//! validates the submitted input against the call's declared form schema,
//! and on failure dispatches to a declared failure-handling strategy:
//! - **Form binding**: ordered field schemas with pluggable validation rules
//! - **Call interception**: the form argument is located structurally, bound,
//!   and checked before the action body may execute
//! - **Failure strategies**: report failure as an alternate action's normal
//!   return value, or raise a structured `application/vnd.error+json` body
//! - **Declarative metadata**: per-target failure policy registered once and
//!   resolved per call through an injected lookup
//! - **Anti-CSRF token check** on bound submissions
//!
//! ```
//! use formgate::validators::AlphabeticValidator;
//! use formgate::{
//! 	Argument, Form, FormField, InputInterceptor, Invocation, MetadataRegistry, Receiver,
//! 	Response, Result,
//! };
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! struct TaskController;
//!
//! impl Receiver for TaskController {
//! 	fn invoke_failure_action(&self, name: &str) -> Option<Result<Response>> {
//! 		match name {
//! 			"on_failure" => Some(Ok(Response::bad_request())),
//! 			_ => None,
//! 		}
//! 	}
//! }
//!
//! // The controller builds the form and hands it the raw submitted input.
//! let mut submitted = HashMap::new();
//! submitted.insert("name".to_string(), serde_json::json!(""));
//! let form = Form::new()
//! 	.with_field(FormField::new("name").with_validator(
//! 		AlphabeticValidator::new().with_message("Name must be alphabetic only."),
//! 	))
//! 	.with_submitted(submitted);
//!
//! let mut call = Invocation::new("TaskController::create", Arc::new(TaskController), |_, _| {
//! 	Ok(Response::created())
//! })
//! .with_argument(Argument::Form(form));
//!
//! // Invalid input: the action body never runs; the default strategy invokes
//! // the receiver's `on_failure` action instead.
//! let interceptor = InputInterceptor::new(Arc::new(MetadataRegistry::new()));
//! let response = interceptor.intercept(&mut call).unwrap();
//! assert_eq!(response.status, http::StatusCode::BAD_REQUEST);
//! ```

pub mod context;
pub mod error;
pub mod field;
pub mod form;
pub mod handler;
pub mod interceptor;
pub mod metadata;
pub mod response;
pub mod validators;
pub mod vnd_error;

pub use context::{Argument, CallContext, Invocation, Receiver};
pub use error::{InterceptError, Result};
pub use field::{FieldError, FieldResult, FormField};
pub use form::{ALL_FIELDS_KEY, BindState, CSRF_TOKEN_FIELD, Form};
pub use handler::{FailureHandler, OnFailureMethodHandler, VndErrorHandler};
pub use interceptor::InputInterceptor;
pub use metadata::{
	DEFAULT_ON_FAILURE_METHOD, FailureMetadata, MetadataLookup, MetadataRegistry, OnFailureMethod,
	VndErrorMetadata,
};
pub use response::Response;
pub use vnd_error::VndError;
