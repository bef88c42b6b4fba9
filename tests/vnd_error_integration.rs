//! Structured-error Strategy Integration Tests
//!
//! Verifies the vnd.error wire format byte for byte: canonical key order,
//! deterministic serialization, and the override merge policy.


use fixtures::{TaskController, create_invocation, interceptor_with, submission, task_form};
use formgate::{FailureMetadata, InterceptError, MetadataRegistry, VndError, VndErrorMetadata};
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::Ordering;

const CANONICAL_BODY: &str = r#"{
    "message": "Validation failed",
    "path": "",
    "validation_messages": {
        "name": [
            "Name must be alphabetic only."
        ]
    }
}"#;

fn vnd_interceptor(metadata: VndErrorMetadata) -> formgate::InputInterceptor {
	let registry = MetadataRegistry::new()
		.with_entry("TaskController::create", FailureMetadata::VndError(metadata));
	interceptor_with(registry)
}

fn intercept_empty_submission(metadata: VndErrorMetadata) -> VndError {
	let interceptor = vnd_interceptor(metadata);
	let controller = Arc::new(TaskController::new());
	let mut call = create_invocation(Arc::clone(&controller), task_form(submission(&[])));

	let error = interceptor.intercept(&mut call).unwrap_err();
	assert_eq!(controller.create_count.load(Ordering::SeqCst), 0);
	match error {
		InterceptError::ValidationFailed(body) => body,
		other => panic!("expected ValidationFailed, got {other:?}"),
	}
}

/// Test: with no overrides, the raised body serializes to the canonical
/// wire format exactly.
#[rstest]
fn empty_submission_raises_canonical_body() {
	let body = intercept_empty_submission(VndErrorMetadata::new());

	assert_eq!(body.to_json(), CANONICAL_BODY);
}

/// Test: serializing the same body twice yields byte-identical output.
#[rstest]
fn serialization_is_deterministic() {
	let body = intercept_empty_submission(VndErrorMetadata::new().with_logref("abc123"));

	assert_eq!(body.to_json(), body.to_json());
}

/// Test: a supplied logref serializes as the last key.
#[rstest]
fn logref_serializes_as_last_key() {
	let body = intercept_empty_submission(VndErrorMetadata::new().with_logref("abc123"));

	let json = body.to_json();
	assert!(json.ends_with("\"logref\": \"abc123\"\n}"));
	assert_eq!(
		json,
		r#"{
    "message": "Validation failed",
    "path": "",
    "validation_messages": {
        "name": [
            "Name must be alphabetic only."
        ]
    },
    "logref": "abc123"
}"#
	);
}

/// Test: non-empty message and path overrides replace the base values.
#[rstest]
fn non_empty_overrides_replace_base_values() {
	let body = intercept_empty_submission(
		VndErrorMetadata::new()
			.with_message("Task rejected")
			.with_path("/tasks"),
	);

	assert_eq!(body.message(), "Task rejected");
	assert_eq!(body.path(), "/tasks");
}

/// Test: empty-string overrides never apply; the base values survive.
#[rstest]
fn empty_overrides_keep_base_values() {
	let body = intercept_empty_submission(
		VndErrorMetadata::new()
			.with_message("")
			.with_path("")
			.with_logref(""),
	);

	assert_eq!(body.message(), "Validation failed");
	assert_eq!(body.path(), "");
	assert_eq!(body.logref(), None);
}

/// Test: the base path comes from the call context's request path.
#[rstest]
fn base_path_comes_from_the_request() {
	let interceptor = vnd_interceptor(VndErrorMetadata::new());
	let controller = Arc::new(TaskController::new());
	let mut call = create_invocation(controller, task_form(submission(&[]))).with_path("/tasks");

	let error = interceptor.intercept(&mut call).unwrap_err();
	match error {
		InterceptError::ValidationFailed(body) => assert_eq!(body.path(), "/tasks"),
		other => panic!("expected ValidationFailed, got {other:?}"),
	}
}

/// Test: the transport rendering carries status 400, the vnd.error content
/// type, and the canonical body.
#[rstest]
fn validation_failure_renders_as_http_400() {
	let body = intercept_empty_submission(VndErrorMetadata::new());
	let error = InterceptError::ValidationFailed(body);

	assert_eq!(error.status(), http::StatusCode::BAD_REQUEST);
	let response = error.to_response();
	assert_eq!(response.status, http::StatusCode::BAD_REQUEST);
	assert_eq!(
		response.headers.get(http::header::CONTENT_TYPE).unwrap(),
		"application/vnd.error+json"
	);
	assert_eq!(&response.body[..], CANONICAL_BODY.as_bytes());
}

/// Test: a CSRF token mismatch surfaces as a form-level message in the body.
#[rstest]
fn csrf_mismatch_reports_form_level_message() {
	use formgate::{ALL_FIELDS_KEY, CSRF_TOKEN_FIELD};

	let interceptor = vnd_interceptor(VndErrorMetadata::new());
	let controller = Arc::new(TaskController::new());
	let mut form = task_form(submission(&[("name", "BEAR"), (CSRF_TOKEN_FIELD, "stale")]));
	form.set_csrf_token("expected".to_string());
	let mut call = create_invocation(Arc::clone(&controller), form);

	let error = interceptor.intercept(&mut call).unwrap_err();
	let body = match error {
		InterceptError::ValidationFailed(body) => body,
		other => panic!("expected ValidationFailed, got {other:?}"),
	};

	assert_eq!(controller.create_count.load(Ordering::SeqCst), 0);
	assert_eq!(body.validation_messages().len(), 1);
	let (field, messages) = &body.validation_messages()[0];
	assert_eq!(field, ALL_FIELDS_KEY);
	assert_eq!(messages, &vec!["CSRF token missing or incorrect.".to_string()]);
}

/// Test: multiple failing fields keep declaration order in the body.
#[rstest]
fn field_order_is_declaration_order() {
	use formgate::validators::RequiredValidator;
	use formgate::{Argument, Form, FormField, Invocation, Response};

	let registry = MetadataRegistry::new().with_entry(
		"TaskController::create",
		FailureMetadata::VndError(VndErrorMetadata::new()),
	);
	let interceptor = interceptor_with(registry);
	let form = Form::new()
		.with_field(
			FormField::new("name").with_validator(RequiredValidator::new().with_message("name missing")),
		)
		.with_field(
			FormField::new("code").with_validator(RequiredValidator::new().with_message("code missing")),
		)
		.with_submitted(submission(&[]));
	let mut call = Invocation::new(
		"TaskController::create",
		Arc::new(TaskController::new()),
		|_, _| Ok(Response::created()),
	)
	.with_argument(Argument::Form(form));

	let error = interceptor.intercept(&mut call).unwrap_err();
	let body = match error {
		InterceptError::ValidationFailed(body) => body,
		other => panic!("expected ValidationFailed, got {other:?}"),
	};

	let fields: Vec<&str> = body
		.validation_messages()
		.iter()
		.map(|(field, _)| field.as_str())
		.collect();
	assert_eq!(fields, vec!["name", "code"]);
	let json = body.to_json();
	assert!(json.find("\"name\"").unwrap() < json.find("\"code\"").unwrap());
}
