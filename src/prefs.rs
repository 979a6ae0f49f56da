//! Onboarding flags persisted in browser storage.
//!
//! Both flags start unset. The long-lived one lives in `localStorage`, the
//! per-visit one in `sessionStorage`.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;

/// `localStorage` key, `"true"` once the connect prompt was dismissed.
pub const HAS_SEEN_CONNECT_POPUP: &str = "hasSeenConnectPopup";
/// `sessionStorage` key, `"true"` when the prompt was skipped for this visit.
pub const SKIP_CONNECT_SERVICES: &str = "skipConnectServices";

/// String key-value store the flags are kept in.
pub trait PreferenceBackend {
	/// Stored value, `None` when unset or unreadable.
	fn get(&self, key: &str) -> Option<String>;
	/// Stores `value`; failures are logged, not returned.
	fn set(&self, key: &str, value: &str);
	/// Forgets `key`.
	fn remove(&self, key: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which browser storage area a [`WebStorage`] uses.
pub enum StorageKind {
	/// Survives restarts.
	Local,
	/// Cleared when the tab closes.
	Session,
}

/// `window.localStorage` or `window.sessionStorage`. Storage that is unavailable
/// (private mode, sandboxed iframes) behaves as always empty.
#[derive(Clone, Copy, Debug)]
pub struct WebStorage(pub StorageKind);

impl WebStorage {
	fn storage(&self) -> Option<web_sys::Storage> {
		let window = web_sys::window()?;
		let storage = match self.0 {
			StorageKind::Local => window.local_storage(),
			StorageKind::Session => window.session_storage(),
		};
		storage.ok().flatten()
	}
}

impl PreferenceBackend for WebStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.storage()?.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		if let Some(storage) = self.storage() {
			if storage.set_item(key, value).is_err() {
				warn!("Could not persist {}", key);
			}
		}
	}

	fn remove(&self, key: &str) {
		if let Some(storage) = self.storage() {
			let _ = storage.remove_item(key);
		}
	}
}

/// In-memory backend for tests and storage-less hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage(RefCell<HashMap<String, String>>);

impl PreferenceBackend for MemoryStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.0.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.0.borrow_mut().insert(key.to_string(), value.to_string());
	}

	fn remove(&self, key: &str) {
		self.0.borrow_mut().remove(key);
	}
}

/// Onboarding flags over a long-lived and a per-visit backend.
pub struct Preferences<L, S> {
	local: L,
	session: S,
}

/// The browser-backed store shared by the whole app.
pub fn browser() -> Preferences<WebStorage, WebStorage> {
	Preferences::new(WebStorage(StorageKind::Local), WebStorage(StorageKind::Session))
}

impl<L: PreferenceBackend, S: PreferenceBackend> Preferences<L, S> {
	/// Wraps the two backends.
	pub fn new(local: L, session: S) -> Self {
		Self { local, session }
	}

	fn flag(backend: &impl PreferenceBackend, key: &str) -> bool {
		backend.get(key).as_deref() == Some("true")
	}

	/// Whether the connect prompt was ever dismissed.
	pub fn has_seen_connect_popup(&self) -> bool {
		Self::flag(&self.local, HAS_SEEN_CONNECT_POPUP)
	}

	/// Records the prompt as dismissed, or not.
	pub fn set_has_seen_connect_popup(&self, seen: bool) {
		self.local.set(HAS_SEEN_CONNECT_POPUP, if seen { "true" } else { "false" });
	}

	/// Whether the prompt was skipped during this visit.
	pub fn skip_connect_services(&self) -> bool {
		Self::flag(&self.session, SKIP_CONNECT_SERVICES)
	}

	/// Skips the prompt for the rest of this visit, or not.
	pub fn set_skip_connect_services(&self, skip: bool) {
		self.session.set(SKIP_CONNECT_SERVICES, if skip { "true" } else { "false" });
	}

	/// Back to the initial, unseen state.
	pub fn clear(&self) {
		self.local.remove(HAS_SEEN_CONNECT_POPUP);
		self.session.remove(SKIP_CONNECT_SERVICES);
	}

	/// The prompt shows while some service is disconnected and neither flag is set.
	pub fn should_show_connect_popup(&self, any_disconnected: bool) -> bool {
		any_disconnected && !self.has_seen_connect_popup() && !self.skip_connect_services()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn prefs() -> Preferences<MemoryStorage, MemoryStorage> {
		Preferences::new(MemoryStorage::default(), MemoryStorage::default())
	}

	#[test]
	fn starts_unseen() {
		let p = prefs();
		assert!(!p.has_seen_connect_popup());
		assert!(!p.skip_connect_services());
		assert!(p.should_show_connect_popup(true));
		assert!(!p.should_show_connect_popup(false));
	}

	#[test]
	fn either_flag_hides_popup() {
		let p = prefs();
		p.set_has_seen_connect_popup(true);
		assert!(!p.should_show_connect_popup(true));

		let p = prefs();
		p.set_skip_connect_services(true);
		assert!(!p.should_show_connect_popup(true));
	}

	#[test]
	fn clear_resets() {
		let p = prefs();
		p.set_has_seen_connect_popup(true);
		p.set_skip_connect_services(true);
		p.clear();
		assert!(p.should_show_connect_popup(true));
	}
}
