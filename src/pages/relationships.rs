use leptos::ev::MouseEvent;
use leptos::prelude::*;
use log::info;

use crate::api::types::{Ack, RelationshipCategory};
use crate::components::common::{EmptyState, ErrorBanner, Loading};
use crate::components::force_graph::ForceGraphCanvas;
use crate::controller::Loadable;
use crate::graph::{GraphData, GraphNode, LayoutStrategy, PlacedGraph};

pub const SIGNIFICANCE: std::ops::RangeInclusive<u8> = 1..=5;

fn confirm(message: &str) -> bool {
	web_sys::window()
		.and_then(|w| w.confirm_with_message(message).ok())
		.unwrap_or(false)
}

/// Parses the significance select; blank or out of range means "leave unset".
pub fn parse_significance(value: &str) -> Option<u8> {
	value.trim().parse().ok().filter(|s| SIGNIFICANCE.contains(s))
}

#[component]
pub fn Relationships() -> impl IntoView {
	let graph = Loadable::<GraphData>::new();
	let categories = Loadable::<Vec<RelationshipCategory>>::new();
	let reload = move || graph.load(|api| async move { api.relationships().await });
	reload();
	categories.load(|api| async move { api.relationship_categories().await });

	let placed = Memo::new(move |_| {
		graph
			.data
			.with(|d| d.as_ref().map(|d| PlacedGraph::build(d, LayoutStrategy::Radial)))
			.unwrap_or_default()
	});
	let selected = RwSignal::new(None::<String>);
	let current = Memo::new(move |_| {
		let id = selected.get()?;
		graph.data.with(|d| d.as_ref()?.node(&id).cloned())
	});

	let category = RwSignal::new(String::new());
	let significance = RwSignal::new(String::new());
	let new_type = RwSignal::new(String::new());
	Effect::new(move |_| {
		let node: Option<GraphNode> = current.get();
		category.set(node.as_ref().and_then(|n| n.category.clone()).unwrap_or_default());
		significance.set(
			node.as_ref()
				.and_then(|n| n.significance)
				.map(|s| s.to_string())
				.unwrap_or_default(),
		);
		new_type.set(
			node.map(|n| {
				n.property("relationship_type")
					.map(str::to_string)
					.unwrap_or(n.node_type)
			})
			.unwrap_or_default(),
		);
	});

	let busy = RwSignal::new(false);
	let after = move |_: Ack| reload();

	let save_category = move |_: MouseEvent| {
		let (Some(id), cat) = (selected.get_untracked(), category.get_untracked()) else {
			return;
		};
		if cat.is_empty() {
			return;
		}
		let sig = parse_significance(&significance.get_untracked());
		busy.set(true);
		let api = graph.api();
		graph.mutate(
			async move {
				let ack = api.update_relationship_category(&id, &cat, sig).await;
				busy.try_set(false);
				ack
			},
			after,
		);
	};

	let save_type = move |_: MouseEvent| {
		let (Some(id), ty) = (selected.get_untracked(), new_type.get_untracked()) else {
			return;
		};
		let ty = ty.trim().to_string();
		if ty.is_empty() {
			return;
		}
		busy.set(true);
		let api = graph.api();
		graph.mutate(
			async move {
				let ack = api.update_relationship_type(&id, &ty).await;
				busy.try_set(false);
				ack
			},
			after,
		);
	};

	let delete = move |_: MouseEvent| {
		let Some(node) = current.get_untracked() else {
			return;
		};
		if !confirm(&format!("Remove {} from your relationships?", node.display_name())) {
			return;
		}
		busy.set(true);
		let api = graph.api();
		graph.mutate(
			async move {
				let ack = api.delete_relationship(&node.id).await;
				busy.try_set(false);
				ack
			},
			move |_: Ack| {
				info!("Relationship removed");
				selected.set(None);
				reload();
			},
		);
	};

	view! {
		<div class="page relationships-page">
			<header class="toolbar">
				<h1>"Relationships"</h1>
				<button class="btn btn-secondary" disabled=move || graph.is_loading() on:click=move |_| reload()>
					"Refresh"
				</button>
			</header>
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			{move || {
				if graph.is_loading() && graph.data.with(Option::is_none) {
					view! { <Loading label="Loading relationships" /> }.into_any()
				} else if graph.data.with(|d| d.as_ref().is_some_and(GraphData::is_empty)) {
					view! {
						<EmptyState
							message="No relationships yet."
							hint="People you mention in chat or connect through your accounts appear here."
						/>
					}
						.into_any()
				} else {
					().into_any()
				}
			}}
			<div class="graph-stage">
				<ForceGraphCanvas
					data=placed
					selected=selected
					on_select=Callback::new(move |id| selected.set(id))
				/>
				{move || {
					current
						.get()
						.map(|node| {
							view! {
								<aside class="relationship-editor">
									<h3>{node.display_name().to_string()}</h3>
									{node.description.clone().map(|d| view! { <p>{d}</p> })}
									<label>
										"Category"
										<select
											prop:value=move || category.get()
											on:change=move |ev| category.set(event_target_value(&ev))
										>
											<option value="">"Choose…"</option>
											{move || {
												categories
													.data
													.get()
													.unwrap_or_default()
													.into_iter()
													.map(|c| {
														let label = c.display().to_string();
														view! { <option value=c.id>{label}</option> }
													})
													.collect_view()
											}}
										</select>
									</label>
									<label>
										"Significance"
										<select
											prop:value=move || significance.get()
											on:change=move |ev| significance.set(event_target_value(&ev))
										>
											<option value="">"-"</option>
											{SIGNIFICANCE
												.map(|s| view! { <option value=s.to_string()>{s}</option> })
												.collect_view()}
										</select>
									</label>
									<button class="btn" disabled=move || busy.get() on:click=save_category>
										"Save category"
									</button>
									<label>
										"Type"
										<input
											type="text"
											prop:value=move || new_type.get()
											on:input=move |ev| new_type.set(event_target_value(&ev))
										/>
									</label>
									<button class="btn" disabled=move || busy.get() on:click=save_type>
										"Change type"
									</button>
									<button class="btn btn-danger" disabled=move || busy.get() on:click=delete>
										"Delete"
									</button>
								</aside>
							}
						})
				}}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn significance_is_one_to_five() {
		assert_eq!(parse_significance("3"), Some(3));
		assert_eq!(parse_significance(""), None);
		assert_eq!(parse_significance("0"), None);
		assert_eq!(parse_significance("6"), None);
	}
}
