//! Small shared view pieces: loading, error and empty states.

use leptos::prelude::*;

#[component]
pub fn Loading(#[prop(default = "Loading")] label: &'static str) -> impl IntoView {
	view! {
		<div class="loading">
			<span class="spinner"></span>
			{label}
		</div>
	}
}

/// Error banner with a manual retry; there is no automatic retry anywhere.
#[component]
pub fn ErrorBanner(
	#[prop(into)] message: Signal<Option<String>>,
	#[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
	move || {
		message.get().map(|msg| {
			view! {
				<div class="error-banner" role="alert">
					<span>{msg}</span>
					{on_retry.map(|cb| {
						view! {
							<button class="btn btn-small" on:click=move |_| cb.run(())>
								"Retry"
							</button>
						}
					})}
				</div>
			}
		})
	}
}

#[component]
pub fn EmptyState(
	message: &'static str,
	#[prop(optional)] hint: Option<&'static str>,
) -> impl IntoView {
	view! {
		<div class="empty-state">
			<p>{message}</p>
			{hint.map(|h| view! { <p class="hint">{h}</p> })}
		</div>
	}
}

/// Button that disables itself and shows a spinner while `busy`.
#[component]
pub fn BusyButton(
	label: &'static str,
	busy_label: &'static str,
	#[prop(into)] busy: Signal<bool>,
	on_click: Callback<()>,
	#[prop(optional, into)] disabled: Option<Signal<bool>>,
) -> impl IntoView {
	let is_disabled = move || busy.get() || disabled.map(|d| d.get()).unwrap_or(false);
	view! {
		<button class="btn" disabled=is_disabled on:click=move |_| on_click.run(())>
			{move || {
				if busy.get() {
					view! {
						<span class="spinner"></span>
						{busy_label}
					}
						.into_any()
				} else {
					label.into_any()
				}
			}}
		</button>
	}
}
