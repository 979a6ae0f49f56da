pub mod audio;
pub mod cards;
pub mod graph;
pub mod home;
pub mod jobs_feed;
pub mod not_found;
pub mod projects;
pub mod read;
pub mod relationships;
pub mod research;
pub mod write;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::graph::FilterCategory;

/// Category selection seeded from `?filter=` and following later query changes.
pub(crate) fn category_from_query() -> RwSignal<FilterCategory> {
	let query = use_query_map();
	let initial = query.with_untracked(|q| q.get("filter"));
	let category = RwSignal::new(FilterCategory::from_query(initial.as_deref()));
	Effect::new(move |_| {
		let filter = query.with(|q| q.get("filter"));
		category.set(FilterCategory::from_query(filter.as_deref()));
	});
	category
}

/// Value of one query parameter, tracked.
pub(crate) fn query_param(key: &'static str) -> Memo<Option<String>> {
	let query = use_query_map();
	Memo::new(move |_| query.with(|q| q.get(key)).filter(|v| !v.is_empty()))
}
