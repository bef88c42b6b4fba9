//! Error taxonomy for the interception pipeline
//!
//! All three pipeline errors are raised synchronously at the point of
//! detection and propagate through the interceptor unmodified; there is no
//! catching, translation, or retry anywhere in this crate.

use crate::response::Response;
use crate::vnd_error::VndError;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};

pub type Result<T> = std::result::Result<T, InterceptError>;

#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
	/// The intercepted call's argument list does not contain exactly one
	/// form argument. Fatal to the call; raised before any binding.
	#[error("expected exactly one form argument, found {found}")]
	InvalidFormProperty { found: usize },

	/// The configured on-failure action is not a public zero-argument action
	/// exported by the receiver. A configuration error, not a user-input
	/// error.
	#[error("on-failure method `{method}` is not a public zero-argument action on the receiver")]
	InvalidOnFailureMethod { method: String },

	/// Bound input failed validation. An expected, user-facing outcome that
	/// the transport layer renders as HTTP 400 with the structured body.
	#[error("Validation failed.")]
	ValidationFailed(VndError),

	/// Passthrough for errors raised by the original call body or an
	/// alternate action.
	#[error(transparent)]
	Action(#[from] anyhow::Error),
}

impl InterceptError {
	/// The HTTP-equivalent status for this error.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::InterceptError;
	/// use http::StatusCode;
	///
	/// let error = InterceptError::InvalidFormProperty { found: 0 };
	/// assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
	/// ```
	pub fn status(&self) -> StatusCode {
		match self {
			Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
			Self::InvalidFormProperty { .. }
			| Self::InvalidOnFailureMethod { .. }
			| Self::Action(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Render this error the way the transport layer is expected to:
	/// validation failures become a 400 with the canonical
	/// `application/vnd.error+json` body, everything else a bare status with
	/// the error text.
	pub fn to_response(&self) -> Response {
		match self {
			Self::ValidationFailed(error) => Response::new(StatusCode::BAD_REQUEST)
				.with_header(
					CONTENT_TYPE,
					HeaderValue::from_static("application/vnd.error+json"),
				)
				.with_body(error.to_json()),
			other => Response::new(other.status()).with_body(other.to_string()),
		}
	}
}
