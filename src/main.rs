use leptos::prelude::*;
use my_desk_app::{App, AppConfig, init_logging};

fn main() {
	init_logging();
	let config = AppConfig::from_document();
	leptos::mount::mount_to_body(move || view! { <App config=config /> });
}
