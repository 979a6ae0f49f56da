//! Floating persona chat available on every page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;
use log::{info, warn};

use crate::api::ApiClient;
use crate::chat::{ChatSession, Rejected, Role, page_context_for};
use crate::config::AppConfig;

#[component]
pub fn ChatWidget() -> impl IntoView {
	let config = StoredValue::new(expect_context::<AppConfig>());
	let api = StoredValue::new_local(config.with_value(|c| ApiClient::new(&c.api_base)));
	let pathname = use_location().pathname;
	let session = RwSignal::new(ChatSession::default());
	let draft = RwSignal::new(String::new());

	let toggle = move |_: leptos::ev::MouseEvent| {
		let needs_init = session.try_update(|s| s.toggle()).unwrap_or(false);
		if !needs_init {
			return;
		}
		let client = api.get_value();
		spawn_local(async move {
			let identity = client.persona_initialize().await.map_err(|e| {
				warn!("Persona initialize failed: {}", e);
				e.user_message()
			});
			if let Ok(id) = &identity {
				info!("Persona ready: {}", id.name);
			}
			session.update(|s| s.finish_initialize(identity));
		});
	};

	let send = move || {
		let text = draft.get_untracked();
		let route = config.with_value(|c| c.route_of(&pathname.get_untracked()).to_string());
		let request = match session.try_update(|s| s.submit(&text, page_context_for(&route))) {
			Some(Ok(request)) => request,
			Some(Err(Rejected::Busy)) => {
				warn!("Message dropped while a reply is pending");
				return;
			}
			Some(Err(_)) | None => return,
		};
		draft.set(String::new());
		let client = api.get_value();
		spawn_local(async move {
			let reply = client
				.persona_chat(&request)
				.await
				.map(|r| r.response)
				.map_err(|e| {
					warn!("Persona chat failed: {}", e);
					e.user_message()
				});
			session.update(|s| s.receive(reply));
		});
	};

	view! {
		<div class="chat-widget" class:open=move || session.with(|s| s.open)>
			<Show when=move || session.with(|s| s.open)>
				<section class="chat-panel">
					<header>
						<span class="persona">
							{move || session.with(|s| {
								if s.persona.is_empty() { "Connecting".to_string() } else { s.persona.clone() }
							})}
						</span>
						<button class="close" title="Close" on:click=move |_| session.update(|s| s.close())>
							"×"
						</button>
					</header>
					<ol class="transcript">
						{move || {
							session
								.with(|s| s.transcript.clone())
								.into_iter()
								.map(|entry| {
									let class = match (entry.role, entry.is_error) {
										(_, true) => "message error",
										(Role::User, _) => "message user",
										(Role::Assistant, _) => "message assistant",
									};
									view! { <li class=class>{entry.content}</li> }
								})
								.collect_view()
						}}
						<Show when=move || session.with(|s| s.pending)>
							<li class="message assistant typing">"…"</li>
						</Show>
					</ol>
					<form
						class="chat-input"
						on:submit=move |ev| {
							ev.prevent_default();
							send();
						}
					>
						<input
							type="text"
							placeholder="Ask anything"
							prop:value=move || draft.get()
							on:input=move |ev| draft.set(event_target_value(&ev))
							disabled=move || !session.with(|s| s.can_send())
						/>
						<button type="submit" disabled=move || !session.with(|s| s.can_send())>
							"Send"
						</button>
					</form>
				</section>
			</Show>
			<button class="chat-toggle" title="Chat" on:click=toggle>
				{move || if session.with(|s| s.open) { "×" } else { "Chat" }}
			</button>
		</div>
	}
}
