//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::hooks::use_location;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod chat;
mod components;
pub mod config;
mod controller;
mod error;
mod graph;
mod markdown;
mod pages;
pub mod prefs;
mod theme;

pub use config::AppConfig;

// Top-Level pages
use crate::components::chat_widget::ChatWidget;
use crate::components::connect_popup::ConnectPopup;
use crate::components::nav::{NavBar, nav_visible};
use crate::pages::audio::Audio;
use crate::pages::cards::Cards;
use crate::pages::graph::GraphExplorer;
use crate::pages::home::Home;
use crate::pages::jobs_feed::JobsFeed;
use crate::pages::not_found::NotFound;
use crate::pages::projects::Projects;
use crate::pages::read::Read;
use crate::pages::relationships::Relationships;
use crate::pages::research::Research;
use crate::pages::write::Write;
use crate::theme::Theme;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

#[component]
fn Chrome() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let pathname = use_location().pathname;
	let show_nav = Memo::new(move |_| nav_visible(config.route_of(&pathname.get())));
	view! {
		<Show when=move || show_nav.get()>
			<NavBar />
		</Show>
	}
}

/// The whole workspace, mounted under `config.base_path`.
#[component]
pub fn App(
	/// Mount point and backend settings for this page.
	config: AppConfig,
) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let base = config.base_path.clone();
	provide_context(config);
	let theme = RwSignal::new(Theme::default());
	provide_context(theme);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.get().attr() />

		// sets the document title
		<Title text="my-desk" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router base=base>
			<Chrome />
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/graph") view=GraphExplorer />
					<Route path=path!("/cards") view=Cards />
					<Route path=path!("/write") view=Write />
					<Route path=path!("/read") view=Read />
					<Route path=path!("/audio") view=Audio />
					<Route path=path!("/jobs-feed") view=JobsFeed />
					<Route path=path!("/research") view=Research />
					<Route path=path!("/relationships") view=Relationships />
					<Route path=path!("/projects") view=Projects />
				</Routes>
			</main>
			<ChatWidget />
			<ConnectPopup />
		</Router>
	}
}
