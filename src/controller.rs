//! Request sequencing and lifetime handling for page controllers.
//!
//! A response is applied only when it belongs to the most recent request of
//! its owner and the owner is still mounted. Unmounting also aborts whatever
//! fetch is in flight.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use web_sys::AbortController;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct GuardState {
	latest: AtomicU64,
	alive: AtomicBool,
}

/// Hands out tickets; only the newest ticket of a live guard is current.
#[derive(Clone, Debug)]
pub struct RequestGuard {
	state: Arc<GuardState>,
}

impl Default for RequestGuard {
	fn default() -> Self {
		Self::new()
	}
}

impl RequestGuard {
	pub fn new() -> Self {
		Self {
			state: Arc::new(GuardState {
				latest: AtomicU64::new(0),
				alive: AtomicBool::new(true),
			}),
		}
	}

	pub fn begin(&self) -> Ticket {
		Ticket(self.state.latest.fetch_add(1, Ordering::Relaxed) + 1)
	}

	pub fn is_current(&self, ticket: Ticket) -> bool {
		self.is_alive() && self.state.latest.load(Ordering::Relaxed) == ticket.0
	}

	pub fn is_alive(&self) -> bool {
		self.state.alive.load(Ordering::Relaxed)
	}

	/// Marks the owner as gone; no ticket is current afterwards.
	pub fn retire(&self) {
		self.state.alive.store(false, Ordering::Relaxed);
	}
}

/// Client whose requests are aborted when the current reactive owner is cleaned up.
#[derive(Clone, Copy)]
pub struct ScopedApi {
	client: StoredValue<ApiClient, LocalStorage>,
}

impl ScopedApi {
	pub fn new() -> Self {
		let base = ApiClient::new(&expect_context::<AppConfig>().api_base);
		let controller = AbortController::new().ok();
		let client = match &controller {
			Some(c) => base.with_signal(c.signal()),
			None => base,
		};
		let controller = StoredValue::new_local(controller);
		on_cleanup(move || {
			controller.try_with_value(|c| {
				if let Some(c) = c {
					c.abort();
				}
			});
		});
		Self {
			client: StoredValue::new_local(client),
		}
	}

	pub fn client(&self) -> ApiClient {
		self.client.get_value()
	}
}

/// Remote data owned by one page: value, loading flag and error banner text.
pub struct Loadable<T: Send + Sync + 'static> {
	pub data: RwSignal<Option<T>>,
	pub loading: RwSignal<bool>,
	pub error: RwSignal<Option<String>>,
	guard: StoredValue<RequestGuard>,
	api: ScopedApi,
}

impl<T: Send + Sync + 'static> Clone for Loadable<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: Send + Sync + 'static> Copy for Loadable<T> {}

impl<T: Send + Sync + 'static> Loadable<T> {
	pub fn new() -> Self {
		let guard = RequestGuard::new();
		let retire = guard.clone();
		on_cleanup(move || retire.retire());
		Self {
			data: RwSignal::new(None),
			loading: RwSignal::new(false),
			error: RwSignal::new(None),
			guard: StoredValue::new(guard),
			api: ScopedApi::new(),
		}
	}

	pub fn api(&self) -> ApiClient {
		self.api.client()
	}

	/// Runs `fetch` and stores its result unless a newer load started or the page unmounted.
	pub fn load<F, Fut>(&self, fetch: F)
	where
		F: FnOnce(ApiClient) -> Fut + 'static,
		Fut: Future<Output = Result<T, ApiError>> + 'static,
	{
		let guard = self.guard.get_value();
		let ticket = guard.begin();
		let (data, loading, error) = (self.data, self.loading, self.error);
		loading.set(true);
		error.set(None);
		let request = fetch(self.api());
		spawn_local(async move {
			let result = request.await;
			if !guard.is_current(ticket) {
				debug!("Dropping stale response {:?}", ticket);
				return;
			}
			match result {
				Ok(value) => data.set(Some(value)),
				Err(ApiError::Aborted) => {}
				Err(e) => {
					warn!("Request failed: {}", e);
					error.set(Some(e.user_message()));
				}
			}
			loading.set(false);
		});
	}

	/// Runs a mutation; on success `then` runs (usually a reload), on failure the error banner is set.
	pub fn mutate<R, Fut>(&self, op: Fut, then: impl FnOnce(R) + 'static)
	where
		R: 'static,
		Fut: Future<Output = Result<R, ApiError>> + 'static,
	{
		let guard = self.guard.get_value();
		let error = self.error;
		spawn_local(async move {
			let result = op.await;
			if !guard.is_alive() {
				return;
			}
			match result {
				Ok(value) => then(value),
				Err(ApiError::Aborted) => {}
				Err(e) => {
					warn!("Update failed: {}", e);
					error.set(Some(e.user_message()));
				}
			}
		});
	}

	pub fn is_loading(&self) -> bool {
		self.loading.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn last_request_wins() {
		let guard = RequestGuard::new();
		let first = guard.begin();
		let second = guard.begin();
		assert!(!guard.is_current(first));
		assert!(guard.is_current(second));
	}

	#[test]
	fn retired_guard_accepts_nothing() {
		let guard = RequestGuard::new();
		let ticket = guard.begin();
		guard.clone().retire();
		assert!(!guard.is_current(ticket));
		assert!(!guard.is_alive());
	}
}
