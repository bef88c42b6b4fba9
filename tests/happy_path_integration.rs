//! Happy Path Integration Tests
//!
//! Exercises the interception pipeline under normal conditions: valid
//! submissions proceed to the original action, invalid submissions route to
//! the declared failure strategy and come back as a normal result.


use fixtures::{
	TaskController, assert_status, body_str, create_invocation, interceptor, interceptor_with,
	submission, task_form,
};
use formgate::{
	Argument, FailureMetadata, Form, FormField, InputInterceptor, Invocation, MetadataRegistry,
	Response,
};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Test: a submission passing every rule lets the original action run once
/// and its result come back unmodified.
#[rstest]
fn valid_submission_proceeds_to_primary_action(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[("name", "BEAR")]));
	let mut call = create_invocation(Arc::clone(&controller), form);

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 201);
	assert_eq!(body_str(&response), "201");
	assert_eq!(controller.create_count.load(Ordering::SeqCst), 1);
}

/// Test: the action body observes the bound form values.
#[rstest]
fn bound_values_are_visible_to_the_action(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[("name", "BEAR")]));
	let mut call = Invocation::new("TaskController::create", controller, |_, args| {
		let form = args[0].as_form().expect("first argument is the form");
		let name = form.value("name").and_then(|v| v.as_str()).unwrap_or("");
		Ok(Response::created().with_body(format!("created: {name}")))
	})
	.with_argument(Argument::Form(form));

	let response = interceptor.intercept(&mut call).unwrap();

	assert_eq!(body_str(&response), "created: BEAR");
}

/// Test: with no registered metadata, an invalid submission routes to the
/// receiver's default `on_failure` action and returns its result.
#[rstest]
fn invalid_submission_returns_default_on_failure_result(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[]));
	let mut call = create_invocation(Arc::clone(&controller), form);

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 400);
	assert_eq!(body_str(&response), "400");
	assert_eq!(controller.create_count.load(Ordering::SeqCst), 0);
}

/// Test: registered method metadata selects the named alternate action.
#[rstest]
fn method_metadata_selects_the_named_action() {
	let registry = MetadataRegistry::new().with_entry(
		"TaskController::create",
		FailureMetadata::method("bad_request_action"),
	);
	let interceptor = interceptor_with(registry);
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[]));
	let mut call = create_invocation(controller, form);

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 400);
	assert_eq!(body_str(&response), "custom");
}

/// Test: non-form arguments pass through the pipeline untouched.
#[rstest]
fn extra_value_arguments_are_ignored(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[("name", "BEAR")]));
	let mut call = Invocation::new("TaskController::create", controller, |_, args| {
		assert_eq!(args.len(), 2);
		Ok(Response::created())
	})
	.with_argument(Argument::Value(json!(42)))
	.with_argument(Argument::Form(form));

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 201);
}

/// Test: a fresh form is bound by the interception; the caller never binds.
#[rstest]
fn interception_binds_the_carried_submission(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = task_form(submission(&[("name", "BEAR")]));
	assert!(!form.is_bound());
	let mut call = Invocation::new("TaskController::create", controller, |_, args| {
		let form = args[0].as_form().expect("first argument is the form");
		assert!(form.is_bound());
		assert!(form.is_valid());
		Ok(Response::created())
	})
	.with_argument(Argument::Form(form));

	interceptor.intercept(&mut call).unwrap();
}

/// Test: a form with no fields binds valid and proceeds.
#[rstest]
fn empty_schema_is_trivially_valid(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = Form::new().with_submitted(submission(&[("anything", "goes")]));
	let mut call = create_invocation(Arc::clone(&controller), form);

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 201);
	assert_eq!(controller.create_count.load(Ordering::SeqCst), 1);
}

/// Test: a field with a default value binds valid when the key is missing.
#[rstest]
fn missing_optional_field_uses_its_default(interceptor: InputInterceptor) {
	let controller = Arc::new(TaskController::new());
	let form = Form::new()
		.with_field(FormField::new("priority").with_default(json!("normal")))
		.with_submitted(submission(&[]));
	let mut call = Invocation::new("TaskController::create", controller, |_, args| {
		let form = args[0].as_form().expect("first argument is the form");
		assert_eq!(form.value("priority"), Some(&json!("normal")));
		Ok(Response::created())
	})
	.with_argument(Argument::Form(form));

	let response = interceptor.intercept(&mut call).unwrap();

	assert_status(&response, 201);
}
