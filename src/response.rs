//! HTTP-style result values for intercepted actions

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

/// The result of an intercepted call: an HTTP-style status, headers, and body.
///
/// Primary actions and failure actions both produce this type; the transport
/// layer turns it into a concrete framework response.
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new response with the given status code.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::Response;
	/// use http::StatusCode;
	///
	/// let response = Response::new(StatusCode::OK);
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// HTTP 200 OK.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// HTTP 201 Created.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::Response;
	/// use http::StatusCode;
	///
	/// assert_eq!(Response::created().status, StatusCode::CREATED);
	/// ```
	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	/// HTTP 400 Bad Request.
	pub fn bad_request() -> Self {
		Self::new(StatusCode::BAD_REQUEST)
	}

	/// Replace the body.
	///
	/// # Examples
	///
	/// ```
	/// use formgate::Response;
	///
	/// let response = Response::ok().with_body("hello");
	/// assert_eq!(&response.body[..], b"hello");
	/// ```
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Insert a header, replacing any previous value under the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}
}
