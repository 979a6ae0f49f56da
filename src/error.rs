//! Errors surfaced by backend calls.

use thiserror::Error;

pub const CONNECTION_ERROR: &str = "Connection error. Please check that the server is running.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
	/// `fetch` itself rejected.
	#[error("network error: {0}")]
	Network(String),

	#[error("HTTP {0}")]
	Http(u16),

	/// The backend answered `{ success: false, error }`.
	#[error("{0}")]
	Backend(String),

	#[error("invalid response: {0}")]
	Decode(String),

	/// The owning view went away and cancelled the request.
	#[error("request aborted")]
	Aborted,
}

impl ApiError {
	/// Text for the page-level error banner.
	pub fn user_message(&self) -> String {
		match self {
			ApiError::Network(_) => CONNECTION_ERROR.to_string(),
			ApiError::Backend(msg) => msg.clone(),
			ApiError::Http(status) => format!("The server returned an error ({status})."),
			ApiError::Decode(_) => "The server sent a response this page could not read.".to_string(),
			ApiError::Aborted => String::new(),
		}
	}
}

impl From<gloo_net::Error> for ApiError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::Aborted,
			gloo_net::Error::JsError(js) => ApiError::Network(js.message),
			gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
			gloo_net::Error::GlooError(msg) => ApiError::Network(msg),
			#[allow(unreachable_patterns)]
			other => ApiError::Network(other.to_string()),
		}
	}
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backend_errors_are_shown_verbatim() {
		let err = ApiError::Backend("Graph store offline".into());
		assert_eq!(err.user_message(), "Graph store offline");
	}

	#[test]
	fn transport_errors_are_generic() {
		let err = ApiError::Network("TypeError: Failed to fetch".into());
		assert_eq!(err.user_message(), CONNECTION_ERROR);
	}
}
