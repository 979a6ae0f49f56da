//! Filter bar, search box and node inspector shared by the graph pages.

use leptos::prelude::*;

use crate::graph::style::{edge_label, node_color};
use crate::graph::{FilterCategory, GraphData};

#[component]
pub fn CategoryBar(
	#[prop(into)] counts: Signal<Vec<(FilterCategory, usize)>>,
	selected: RwSignal<FilterCategory>,
) -> impl IntoView {
	view! {
		<div class="category-bar" role="tablist">
			{move || {
				counts
					.get()
					.into_iter()
					.map(|(category, count)| {
						view! {
							<button
								class="category"
								class:active=move || selected.get() == category
								on:click=move |_| selected.set(category)
							>
								{category.label()}
								<span class="badge">{count}</span>
							</button>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

#[component]
pub fn SearchBox(
	query: RwSignal<String>,
	#[prop(default = "Search nodes")] placeholder: &'static str,
) -> impl IntoView {
	view! {
		<div class="search-box">
			<input
				type="search"
				placeholder=placeholder
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<Show when=move || !query.get().is_empty()>
				<button class="clear" title="Clear search" on:click=move |_| query.set(String::new())>
					"×"
				</button>
			</Show>
		</div>
	}
}

/// Details of the selected node and its direct neighbours.
#[component]
pub fn NodeInspector(
	#[prop(into)] data: Signal<GraphData>,
	selected: RwSignal<Option<String>>,
) -> impl IntoView {
	move || {
		let id = selected.get()?;
		let graph = data.get();
		let node = graph.node(&id)?.clone();
		let neighbors: Vec<(String, String, String)> = graph
			.neighbors(&id)
			.map(|(n, rel)| (n.id.clone(), n.display_name().to_string(), edge_label(rel)))
			.collect();
		let properties: Vec<(String, String)> = node
			.properties
			.iter()
			.filter_map(|(k, v)| match v {
				serde_json::Value::String(s) => Some((k.clone(), s.clone())),
				serde_json::Value::Number(n) => Some((k.clone(), n.to_string())),
				serde_json::Value::Bool(b) => Some((k.clone(), b.to_string())),
				_ => None,
			})
			.collect();
		let color = node_color(&node.node_type);

		Some(view! {
			<aside class="node-inspector">
				<header>
					<span class="type-chip" style=format!("background: {color}")>
						{node.node_type.clone()}
					</span>
					<button class="close" title="Close" on:click=move |_| selected.set(None)>
						"×"
					</button>
				</header>
				<h3>{node.display_name().to_string()}</h3>
				{node.description.clone().map(|d| view! { <p class="description">{d}</p> })}
				{node.content.clone().map(|c| view! { <p class="content">{c}</p> })}
				{node.strength.map(|s| view! { <p class="metric">"Strength " {format!("{s:.2}")}</p> })}
				{node
					.confidence
					.map(|c| view! { <p class="metric">"Confidence " {format!("{:.0}%", c * 100.0)}</p> })}
				{(!properties.is_empty())
					.then(|| {
						view! {
							<dl class="properties">
								{properties
									.into_iter()
									.map(|(k, v)| view! {
										<dt>{k}</dt>
										<dd>{v}</dd>
									})
									.collect_view()}
							</dl>
						}
					})}
				<h4>"Connections (" {neighbors.len()} ")"</h4>
				<ul class="neighbors">
					{neighbors
						.into_iter()
						.map(|(nid, name, rel)| {
							view! {
								<li>
									<span class="rel">{rel}</span>
									<button class="link" on:click=move |_| selected.set(Some(nid.clone()))>
										{name}
									</button>
								</li>
							}
						})
						.collect_view()}
				</ul>
			</aside>
		})
	}
}
