//! Errors surfaced by the API flows.

use thiserror::Error;

/// Message for a request that never reached the server.
pub const UNREACHABLE_MESSAGE: &str =
	"Unable to connect to the server. Please check your connection.";

/// Fallback message for any failure without a server-provided detail.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Message for a successful login response that carries no token.
pub const MISSING_TOKEN_MESSAGE: &str = "Login failed: no token received.";

/// Failure of a register, login or research call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
	/// The server answered with an error status and a `detail` text.
	#[error("{detail}")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Server-provided message.
		detail: String,
	},

	/// No response was received.
	#[error("{}", UNREACHABLE_MESSAGE)]
	Unreachable,

	/// A 2xx login answer without `access_token`.
	#[error("{}", MISSING_TOKEN_MESSAGE)]
	MissingToken,

	/// Anything else; the inner text is for logs only.
	#[error("{}", GENERIC_MESSAGE)]
	Unexpected(String),
}

impl ApiError {
	/// Text shown inline next to the form that failed.
	pub fn user_message(&self) -> String {
		self.to_string()
	}
}

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_error_shows_detail_verbatim() {
		let err = ApiError::Server {
			status: 401,
			detail: "Incorrect email or password".into(),
		};
		assert_eq!(err.user_message(), "Incorrect email or password");
	}

	#[test]
	fn unexpected_hides_internal_text() {
		let err = ApiError::Unexpected("serde: missing field".into());
		assert_eq!(err.user_message(), GENERIC_MESSAGE);
		assert_eq!(ApiError::Unreachable.user_message(), UNREACHABLE_MESSAGE);
		assert_eq!(ApiError::MissingToken.user_message(), MISSING_TOKEN_MESSAGE);
	}
}
