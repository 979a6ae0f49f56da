use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::AppConfig;

#[component]
pub fn NotFound() -> impl IntoView {
	let home = expect_context::<AppConfig>().href("/");
	view! {
		<div class="page not-found">
			<h1>"Page not found"</h1>
			<p>"There is nothing at this address."</p>
			<A href=home>"Back to your desk"</A>
		</div>
	}
}
