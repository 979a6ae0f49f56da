#![cfg(target_arch = "wasm32")]

use my_desk_app::prefs::{self, PreferenceBackend, StorageKind, WebStorage};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn web_storage_round_trips_flags() {
	let store = prefs::browser();
	store.clear();
	assert!(store.should_show_connect_popup(true));

	store.set_skip_connect_services(true);
	assert!(!store.should_show_connect_popup(true));
	assert_eq!(
		WebStorage(StorageKind::Session).get(prefs::SKIP_CONNECT_SERVICES).as_deref(),
		Some("true")
	);

	store.clear();
	store.set_has_seen_connect_popup(true);
	assert!(!store.should_show_connect_popup(true));
	assert_eq!(WebStorage(StorageKind::Local).get(prefs::HAS_SEEN_CONNECT_POPUP).as_deref(), Some("true"));
	store.clear();
}

#[wasm_bindgen_test]
fn config_defaults_without_meta_tags() {
	let config = my_desk_app::AppConfig::from_document();
	assert!(config.base_path.ends_with("/app"));
}
