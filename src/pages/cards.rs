use leptos::prelude::*;

use crate::components::common::{EmptyState, ErrorBanner, Loading};
use crate::components::graph_controls::{CategoryBar, SearchBox};
use crate::controller::Loadable;
use crate::graph::style::node_color;
use crate::graph::{CategoryMap, GraphData, GraphNode, filter};
use crate::pages::category_from_query;

const EXCERPT_CHARS: usize = 160;

fn excerpt(node: &GraphNode) -> Option<String> {
	let text = node.description.as_deref().or(node.content.as_deref())?.trim();
	if text.is_empty() {
		return None;
	}
	if text.chars().count() <= EXCERPT_CHARS {
		return Some(text.to_string());
	}
	let cut: String = text.chars().take(EXCERPT_CHARS).collect();
	Some(format!("{}…", cut.trim_end()))
}

#[derive(Clone, Debug, PartialEq)]
struct Card {
	id: String,
	node_type: String,
	title: String,
	excerpt: Option<String>,
	connections: usize,
}

fn cards(data: &GraphData) -> Vec<Card> {
	data.nodes
		.iter()
		.map(|n| Card {
			id: n.id.clone(),
			node_type: n.node_type.clone(),
			title: n.display_name().to_string(),
			excerpt: excerpt(n),
			connections: data.edges.iter().filter(|e| e.touches(&n.id)).count(),
		})
		.collect()
}

/// The cognitive graph as a grid of cards.
#[component]
pub fn Cards() -> impl IntoView {
	let graph = Loadable::<GraphData>::new();
	let reload = move || graph.load(|api| async move { api.cognitive_graph().await });
	reload();

	let category = category_from_query();
	let query = RwSignal::new(String::new());
	let map = CategoryMap::default();
	let counts = {
		let map = map.clone();
		Memo::new(move |_| {
			graph
				.data
				.with(|d| d.as_ref().map(|d| filter::category_counts(&d.nodes, &map)))
				.unwrap_or_default()
		})
	};
	let visible = Memo::new(move |_| {
		let (category, query) = (category.get(), query.get());
		graph
			.data
			.with(|d| d.as_ref().map(|d| cards(&filter::apply(d, &map, category, &query))))
			.unwrap_or_default()
	});

	view! {
		<div class="page cards-page">
			<header class="toolbar">
				<CategoryBar counts=counts selected=category />
				<SearchBox query=query placeholder="Search cards" />
			</header>
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			{move || {
				if graph.is_loading() && graph.data.with(Option::is_none) {
					return view! { <Loading /> }.into_any();
				}
				let cards = visible.get();
				if cards.is_empty() && graph.data.with(Option::is_some) {
					return view! { <EmptyState message="No cards match." hint="Try another category or clear the search." /> }
						.into_any();
				}
				view! {
					<div class="card-grid">
						{cards
							.into_iter()
							.map(|card| {
								let color = node_color(&card.node_type);
								view! {
									<article class="card" data-id=card.id>
										<span class="type-chip" style=format!("background: {color}")>
											{card.node_type}
										</span>
										<h3>{card.title}</h3>
										{card.excerpt.map(|e| view! { <p>{e}</p> })}
										<footer>{card.connections} " connections"</footer>
									</article>
								}
							})
							.collect_view()}
					</div>
				}
					.into_any()
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphEdge;

	#[test]
	fn long_descriptions_are_cut() {
		let node = GraphNode {
			description: Some("word ".repeat(100)),
			..GraphNode::new("n", "Note", "Long")
		};
		let text = excerpt(&node).unwrap();
		assert!(text.ends_with('…'));
		assert!(text.chars().count() <= EXCERPT_CHARS + 1);
		assert_eq!(excerpt(&GraphNode::new("m", "Note", "Bare")), None);
	}

	#[test]
	fn cards_count_connections() {
		let data = GraphData::new(
			vec![GraphNode::new("a", "Person", "Ann"), GraphNode::new("b", "Topic", "Rust")],
			vec![GraphEdge::new("a", "b", "INTERESTED_IN")],
		);
		let cards = cards(&data);
		assert_eq!(cards.len(), 2);
		assert!(cards.iter().all(|c| c.connections == 1));
	}
}
