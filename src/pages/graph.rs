use leptos::prelude::*;
use log::info;

use crate::api::types::CycleReport;
use crate::components::common::{BusyButton, EmptyState, ErrorBanner, Loading};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::graph_controls::{CategoryBar, NodeInspector, SearchBox};
use crate::controller::Loadable;
use crate::graph::{CategoryMap, GraphData, LayoutStrategy, PlacedGraph, filter};
use crate::pages::category_from_query;

/// Explorer for the cognitive graph.
#[component]
pub fn GraphExplorer() -> impl IntoView {
	let graph = Loadable::<GraphData>::new();
	let reload = move || graph.load(|api| async move { api.cognitive_graph().await });
	reload();

	let category = category_from_query();
	let query = RwSignal::new(String::new());
	let selected = RwSignal::new(None::<String>);
	let map = CategoryMap::default();

	let source = Signal::derive(move || graph.data.get().unwrap_or_default());
	let counts = {
		let map = map.clone();
		Memo::new(move |_| {
			graph
				.data
				.with(|d| d.as_ref().map(|d| filter::category_counts(&d.nodes, &map)))
				.unwrap_or_default()
		})
	};
	let placed = Memo::new(move |_| {
		let (category, query) = (category.get(), query.get());
		graph.data.with(|d| match d {
			Some(d) => PlacedGraph::build(&filter::apply(d, &map, category, &query), LayoutStrategy::Radial),
			None => PlacedGraph::default(),
		})
	});

	let running = RwSignal::new(false);
	let cycle_note = RwSignal::new(None::<String>);
	let run_cycle = Callback::new(move |_: ()| {
		running.set(true);
		cycle_note.set(None);
		let api = graph.api();
		graph.mutate(
			async move {
				let report = api.run_cycle("").await;
				running.try_set(false);
				report
			},
			move |report: CycleReport| {
				info!("Discovery cycle finished");
				cycle_note.set(Some(report.headline()));
				reload();
			},
		);
	});

	view! {
		<div class="page graph-page">
			<header class="toolbar">
				<CategoryBar counts=counts selected=category />
				<SearchBox query=query />
				<button class="btn btn-secondary" disabled=move || graph.is_loading() on:click=move |_| reload()>
					"Refresh"
				</button>
				<BusyButton
					label="Run discovery cycle"
					busy_label="Running cycle"
					busy=running
					on_click=run_cycle
				/>
			</header>
			{move || cycle_note.get().map(|note| view! { <p class="notice">{note}</p> })}
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			{move || {
				if graph.is_loading() && graph.data.with(Option::is_none) {
					view! { <Loading label="Loading graph" /> }.into_any()
				} else if graph.data.with(|d| d.as_ref().is_some_and(GraphData::is_empty)) {
					view! {
						<EmptyState
							message="Your graph is empty."
							hint="Chat with your assistant or run a discovery cycle to start filling it."
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
				<NodeInspector data=source selected=selected />
			</div>
		</div>
	}
}
