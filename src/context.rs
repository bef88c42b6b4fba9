//! Call context: the in-flight representation of an intercepted action call

use crate::error::Result;
use crate::form::Form;
use crate::response::Response;
use std::sync::Arc;

/// One argument of an intercepted call.
///
/// The pipeline recognizes bindable forms structurally through the
/// [`Argument::Form`] variant; everything else is opaque to it.
#[derive(Debug)]
pub enum Argument {
	/// A bindable form parameter, the marker the interceptor locates.
	Form(Form),
	/// Any other argument value, carried through untouched.
	Value(serde_json::Value),
}

impl Argument {
	pub fn is_form(&self) -> bool {
		matches!(self, Self::Form(_))
	}

	pub fn as_form(&self) -> Option<&Form> {
		match self {
			Self::Form(form) => Some(form),
			Self::Value(_) => None,
		}
	}

	pub fn as_form_mut(&mut self) -> Option<&mut Form> {
		match self {
			Self::Form(form) => Some(form),
			Self::Value(_) => None,
		}
	}
}

/// The object an intercepted call is invoked on.
///
/// Receivers export their failure actions by name; the method strategy
/// resolves the configured name through this capability instead of runtime
/// reflection.
pub trait Receiver: Send + Sync {
	/// Invoke the named zero-argument failure action, or return `None` when
	/// the receiver exports no public action under that name.
	fn invoke_failure_action(&self, name: &str) -> Option<Result<Response>>;
}

/// The call about to happen.
///
/// Owned by the caller (a router or dispatch layer); the pipeline borrows it
/// for the duration of one interception. Implementations expose the ordered
/// argument values, the receiver, the call-target identity used for metadata
/// lookup, and the current request path.
pub trait CallContext {
	/// Call-target identity, the key for metadata lookup.
	fn target(&self) -> &str;

	/// The current request path, or `""` outside a request.
	fn request_path(&self) -> &str;

	fn arguments(&self) -> &[Argument];

	fn arguments_mut(&mut self) -> &mut [Argument];

	fn receiver(&self) -> &dyn Receiver;

	/// Invoke the original call body and return its natural result.
	///
	/// The interceptor calls this exactly once, and only when the bound form
	/// is valid.
	fn proceed(&mut self) -> Result<Response>;
}

type ActionFn<R> = Box<dyn Fn(&R, &[Argument]) -> Result<Response> + Send + Sync>;

/// Ready-made [`CallContext`] for routers and tests.
///
/// Wraps a receiver, an ordered argument list, and the primary action as a
/// closure; `proceed` hands the closure the receiver and the (by then bound)
/// arguments.
///
/// # Examples
///
/// ```
/// use formgate::{Argument, CallContext, Form, Invocation, Receiver, Response, Result};
/// use std::sync::Arc;
///
/// struct TaskController;
///
/// impl Receiver for TaskController {
/// 	fn invoke_failure_action(&self, _name: &str) -> Option<Result<Response>> {
/// 		None
/// 	}
/// }
///
/// let call = Invocation::new("TaskController::create", Arc::new(TaskController), |_, _| {
/// 	Ok(Response::created())
/// })
/// .with_path("/tasks")
/// .with_argument(Argument::Form(Form::new()));
///
/// assert_eq!(call.target(), "TaskController::create");
/// assert_eq!(call.request_path(), "/tasks");
/// assert_eq!(call.arguments().len(), 1);
/// ```
pub struct Invocation<R: Receiver> {
	target: String,
	path: String,
	arguments: Vec<Argument>,
	receiver: Arc<R>,
	action: ActionFn<R>,
}

impl<R: Receiver> Invocation<R> {
	pub fn new(
		target: impl Into<String>,
		receiver: Arc<R>,
		action: impl Fn(&R, &[Argument]) -> Result<Response> + Send + Sync + 'static,
	) -> Self {
		Self {
			target: target.into(),
			path: String::new(),
			arguments: vec![],
			receiver,
			action: Box::new(action),
		}
	}

	/// Set the current request path. Defaults to `""`.
	pub fn with_path(mut self, path: impl Into<String>) -> Self {
		self.path = path.into();
		self
	}

	/// Append an argument to the ordered argument list.
	pub fn with_argument(mut self, argument: Argument) -> Self {
		self.arguments.push(argument);
		self
	}
}

impl<R: Receiver> CallContext for Invocation<R> {
	fn target(&self) -> &str {
		&self.target
	}

	fn request_path(&self) -> &str {
		&self.path
	}

	fn arguments(&self) -> &[Argument] {
		&self.arguments
	}

	fn arguments_mut(&mut self) -> &mut [Argument] {
		&mut self.arguments
	}

	fn receiver(&self) -> &dyn Receiver {
		self.receiver.as_ref()
	}

	fn proceed(&mut self) -> Result<Response> {
		(self.action)(self.receiver.as_ref(), &self.arguments)
	}
}
