//! One-time prompt to link external accounts.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::api::ApiClient;
use crate::api::types::OAuthService;
use crate::config::AppConfig;
use crate::prefs;

/// Sends the browser to the account-linking flow, returning to the current page.
pub fn start_connect(api: &ApiClient, service_id: &str) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let location = window.location();
	let redirect = location.pathname().unwrap_or_else(|_| "/".to_string());
	if location.set_href(&api.oauth_connect_url(service_id, &redirect)).is_err() {
		warn!("Could not start connecting {}", service_id);
	}
}

#[component]
pub fn ConnectPopup() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let api = StoredValue::new_local(ApiClient::new(&config.api_base));
	let services = RwSignal::new(Vec::<OAuthService>::new());
	let visible = RwSignal::new(false);

	let client = api.get_value();
	spawn_local(async move {
		match client.oauth_status().await {
			Ok(status) => {
				let show = prefs::browser().should_show_connect_popup(status.any_disconnected());
				debug!("Connect popup {}", if show { "shown" } else { "suppressed" });
				services.try_set(status.services.into_iter().filter(|s| !s.connected).collect());
				visible.try_set(show);
			}
			Err(e) => warn!("OAuth status unavailable: {}", e),
		}
	});

	let dismiss_forever = move |_: leptos::ev::MouseEvent| {
		prefs::browser().set_has_seen_connect_popup(true);
		visible.set(false);
	};
	let skip = move |_: leptos::ev::MouseEvent| {
		prefs::browser().set_skip_connect_services(true);
		visible.set(false);
	};

	view! {
		<Show when=move || visible.get()>
			<div class="modal-backdrop">
				<div class="modal connect-popup" role="dialog">
					<h2>"Connect your accounts"</h2>
					<p>"Linking your accounts lets your assistant see your calendar, mail and files."</p>
					<ul class="services">
						{move || {
							services
								.get()
								.into_iter()
								.map(|service| {
									let id = service.id.clone();
									let name = if service.name.is_empty() { service.id } else { service.name };
									view! {
										<li>
											<span>{name}</span>
											<button
												class="btn"
												on:click=move |_| {
													prefs::browser().set_has_seen_connect_popup(true);
													api.with_value(|api| start_connect(api, &id));
												}
											>
												"Connect"
											</button>
										</li>
									}
								})
								.collect_view()
						}}
					</ul>
					<footer>
						<button class="btn btn-secondary" on:click=skip>"Skip for now"</button>
						<button class="btn btn-link" on:click=dismiss_forever>"Don't show again"</button>
					</footer>
				</div>
			</div>
		</Show>
	}
}
