use gloo_net::http::{Request, RequestBuilder, Response};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::AbortSignal;

use super::types::check_envelope;
use crate::error::{ApiError, Result};

/// Thin `fetch` wrapper for the backend. Cookies carry auth; nothing is cached or retried.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
	base: String,
	signal: Option<AbortSignal>,
}

impl ApiClient {
	pub fn new(base: &str) -> Self {
		Self {
			base: base.trim_end_matches('/').to_string(),
			signal: None,
		}
	}

	/// Copy of this client whose requests are cancelled by `signal`.
	pub fn with_signal(&self, signal: AbortSignal) -> Self {
		Self {
			base: self.base.clone(),
			signal: Some(signal),
		}
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base, path)
	}

	fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
		builder
			.header("Accept", "application/json")
			.abort_signal(self.signal.as_ref())
	}

	async fn read<T: DeserializeOwned>(resp: Response) -> Result<T> {
		let status = resp.status();
		// Most endpoints report logical failures in the body even with a 4xx/5xx status.
		let text = resp.text().await?;
		let value: serde_json::Value = match serde_json::from_str(&text) {
			Ok(value) => value,
			Err(_) if !(200..300).contains(&status) => return Err(ApiError::Http(status)),
			Err(e) => return Err(ApiError::Decode(e.to_string())),
		};
		check_envelope(&value)?;
		if !(200..300).contains(&status) {
			return Err(ApiError::Http(status));
		}
		serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
	}

	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		debug!("GET {}", path);
		let resp = self.prepare(Request::get(&self.url(path))).send().await?;
		Self::read(resp).await
	}

	pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		debug!("POST {}", path);
		let resp = self.prepare(Request::post(&self.url(path))).json(body)?.send().await?;
		Self::read(resp).await
	}

	pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		debug!("PUT {}", path);
		let resp = self.prepare(Request::put(&self.url(path))).json(body)?.send().await?;
		Self::read(resp).await
	}

	pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		debug!("DELETE {}", path);
		let resp = self.prepare(Request::delete(&self.url(path))).send().await?;
		Self::read(resp).await
	}
}
