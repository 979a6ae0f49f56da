use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::types::{OAuthStatus, UserProfile};
use crate::components::common::{ErrorBanner, Loading};
use crate::components::connect_popup::start_connect;
use crate::config::AppConfig;
use crate::controller::Loadable;
use crate::graph::{CategoryMap, FilterCategory, GraphData, filter};

const QUICK_LINKS: &[(&str, &str, &str)] = &[
	("/graph", "Graph", "Explore everything your assistant knows"),
	("/projects", "Projects", "Plan and research your projects"),
	("/write", "Write", "Draft in a distraction-free editor"),
	("/read", "Read", "Read and annotate your documents"),
	("/jobs-feed", "Jobs", "Openings found for you"),
];

/// Home heading, personalised when a profile exists.
pub fn greeting(profile: Option<&UserProfile>) -> String {
	match profile.map(UserProfile::greeting_name).filter(|n| !n.is_empty()) {
		Some(name) => format!("Welcome back, {name}"),
		None => "Welcome to your desk".to_string(),
	}
}

#[component]
pub fn Home() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let profile = Loadable::<Option<UserProfile>>::new();
	let oauth = Loadable::<OAuthStatus>::new();
	let graph = Loadable::<GraphData>::new();
	let reload = move || {
		profile.load(|api| async move { api.user_profile().await });
		oauth.load(|api| async move { api.oauth_status().await });
		graph.load(|api| async move { api.cognitive_graph().await });
	};
	reload();

	let counts = Memo::new(move |_| {
		let map = CategoryMap::default();
		graph
			.data
			.with(|d| d.as_ref().map(|d| filter::category_counts(&d.nodes, &map)))
			.unwrap_or_default()
	});
	let links = QUICK_LINKS
		.iter()
		.map(|&(route, title, blurb)| {
			view! {
				<A href=config.href(route)>
					<div class="quick-link">
						<h3>{title}</h3>
						<p>{blurb}</p>
					</div>
				</A>
			}
		})
		.collect_view();
	let graph_href = config.href("/graph");

	view! {
		<div class="page home-page">
			<header class="hero">
				<h1>{move || profile.data.with(|p| greeting(p.as_ref().and_then(Option::as_ref)))}</h1>
				{move || {
					profile
						.data
						.get()
						.flatten()
						.and_then(|p| p.location)
						.map(|l| view! { <p class="location">{l.to_string()}</p> })
				}}
			</header>
			<ErrorBanner message=profile.error on_retry=Callback::new(move |_| reload()) />
			<section class="quick-links">{links}</section>
			<section class="graph-summary">
				<h2>"Your graph"</h2>
				{move || {
					if graph.is_loading() && graph.data.with(Option::is_none) {
						return view! { <Loading label="Counting" /> }.into_any();
					}
					let graph_href = graph_href.clone();
					counts
						.get()
						.into_iter()
						.filter(|(c, _)| *c != FilterCategory::All)
						.map(|(c, n)| {
							let href = format!("{}?filter={}", graph_href, c.key());
							view! {
								<A href=href>
									<div class="count">
										<strong>{n}</strong>
										<span>{c.label()}</span>
									</div>
								</A>
							}
						})
						.collect_view()
						.into_any()
				}}
			</section>
			<section class="connections">
				<h2>"Connected accounts"</h2>
				<ErrorBanner message=oauth.error />
				{move || {
					oauth
						.data
						.get()
						.map(|status| {
							status
								.services
								.into_iter()
								.map(|service| {
									let id = service.id.clone();
									let name = if service.name.is_empty() { service.id.clone() } else { service.name };
									view! {
										<div class="service" class:connected=service.connected>
											<span>{name}</span>
											{if service.connected {
												view! { <span class="ok">"Connected"</span> }.into_any()
											} else {
												view! {
													<button
														class="btn btn-small"
														on:click=move |_| start_connect(&oauth.api(), &id)
													>
														"Connect"
													</button>
												}
													.into_any()
											}}
										</div>
									}
								})
								.collect_view()
						})
				}}
			</section>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn greets_by_nickname_then_name() {
		assert_eq!(greeting(None), "Welcome to your desk");
		let mut profile = UserProfile {
			name: "Ada".into(),
			..UserProfile::default()
		};
		assert_eq!(greeting(Some(&profile)), "Welcome back, Ada");
		profile.nickname = Some("Ace".into());
		assert_eq!(greeting(Some(&profile)), "Welcome back, Ace");
	}
}
