use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::config::AppConfig;
use crate::theme::Theme;

pub const NAV_LINKS: &[(&str, &str)] = &[
	("/", "Home"),
	("/graph", "Graph"),
	("/cards", "Cards"),
	("/projects", "Projects"),
	("/relationships", "Relationships"),
	("/read", "Read"),
	("/write", "Write"),
	("/audio", "Audio"),
	("/jobs-feed", "Jobs"),
];

/// Focus modes hide the navigation bar.
pub fn nav_visible(route: &str) -> bool {
	!matches!(route.trim_end_matches('/'), "/write" | "/read")
}

fn is_active(route: &str, link: &str) -> bool {
	let route = route.trim_end_matches('/');
	match link {
		"/" => route.is_empty(),
		_ => route == link,
	}
}

#[component]
pub fn NavBar() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let theme = expect_context::<RwSignal<Theme>>();
	let location = use_location();
	let route = {
		let config = config.clone();
		Memo::new(move |_| config.route_of(&location.pathname.get()).to_string())
	};

	view! {
		<nav class="navbar">
			<span class="brand">"my-desk"</span>
			<ul class="nav-links">
				{NAV_LINKS
					.iter()
					.map(|&(link, label)| {
						let href = config.href(link);
						view! {
							<li class:active=move || is_active(&route.get(), link)>
								<A href=href>{label}</A>
							</li>
						}
					})
					.collect_view()}
			</ul>
			<button
				class="theme-toggle"
				title="Toggle theme"
				on:click=move |_| theme.update(|t| *t = t.toggled())
			>
				{move || if theme.get() == Theme::Dark { "Light" } else { "Dark" }}
			</button>
		</nav>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hidden_in_focus_modes() {
		assert!(!nav_visible("/write"));
		assert!(!nav_visible("/read/"));
		assert!(nav_visible("/"));
		assert!(nav_visible("/graph"));
	}

	#[test]
	fn home_is_active_only_at_root() {
		assert!(is_active("/", "/"));
		assert!(!is_active("/graph", "/"));
		assert!(is_active("/graph/", "/graph"));
	}
}
