use leptos::prelude::*;
use log::warn;

use crate::api::types::ResearchAnswer;
use crate::components::common::{EmptyState, ErrorBanner, Loading};
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::graph_controls::NodeInspector;
use crate::config::AppConfig;
use crate::controller::Loadable;
use crate::error::ApiError;
use crate::graph::{GraphData, GraphEdge, GraphNode, LayoutStrategy, PlacedGraph};

fn described(id: &str, node_type: &str, name: &str, description: &str) -> GraphNode {
	GraphNode {
		description: Some(description.to_string()),
		..GraphNode::new(id, node_type, name)
	}
}

/// Bundled sample shown when the research backend reports an error.
pub fn demo_graph() -> GraphData {
	GraphData::new(
		vec![
			described("topic-ml", "Topic", "Machine Learning", "Learning patterns from data"),
			described("topic-kg", "Topic", "Knowledge Graphs", "Entities linked by typed relations"),
			described("article-rag", "Article", "Retrieval-Augmented Generation", "Grounding answers in retrieved documents"),
			described("article-embed", "Article", "Sentence Embeddings", "Dense vectors for semantic search"),
			described("source-arxiv", "Source", "arXiv", "Preprint server"),
			described("insight-hybrid", "Insight", "Hybrid retrieval wins", "Graph plus vector search beats either alone"),
			GraphNode::new("tag-nlp", "Tag", "nlp"),
		],
		vec![
			GraphEdge::new("article-rag", "topic-ml", "ABOUT"),
			GraphEdge::new("article-rag", "topic-kg", "ABOUT"),
			GraphEdge::new("article-embed", "topic-ml", "ABOUT"),
			GraphEdge::new("article-rag", "source-arxiv", "PUBLISHED_IN"),
			GraphEdge::new("article-embed", "source-arxiv", "PUBLISHED_IN"),
			GraphEdge::new("insight-hybrid", "article-rag", "DERIVED_FROM"),
			GraphEdge::new("insight-hybrid", "topic-kg", "INFORMS"),
			GraphEdge::new("article-embed", "tag-nlp", "TAGGED"),
		],
	)
}

/// Resolves a research graph fetch. A backend-reported error becomes the
/// demo graph when `demo_allowed`; the flag says whether demo data is shown.
pub fn with_demo_fallback(
	result: Result<GraphData, ApiError>,
	demo_allowed: bool,
) -> Result<(GraphData, bool), ApiError> {
	match result {
		Ok(graph) => Ok((graph, false)),
		Err(ApiError::Backend(msg)) if demo_allowed => {
			warn!("Research graph unavailable ({}), showing demo data", msg);
			Ok((demo_graph(), true))
		}
		Err(e) => Err(e),
	}
}

/// Legacy research graph view.
#[component]
pub fn Research() -> impl IntoView {
	let demo_allowed = expect_context::<AppConfig>().demo_fallback;
	let graph = Loadable::<(GraphData, bool)>::new();
	let reload = move || {
		graph.load(move |api| async move {
			with_demo_fallback(api.research_graph().await, demo_allowed)
		})
	};
	reload();

	let showing_demo = Memo::new(move |_| graph.data.with(|d| d.as_ref().is_some_and(|(_, demo)| *demo)));
	let source = Signal::derive(move || graph.data.get().map(|(g, _)| g).unwrap_or_default());
	let placed = Memo::new(move |_| {
		graph
			.data
			.with(|d| d.as_ref().map(|(g, _)| PlacedGraph::build(g, LayoutStrategy::TypeGrouped)))
			.unwrap_or_default()
	});
	let selected = RwSignal::new(None::<String>);

	let question = RwSignal::new(String::new());
	let asking = RwSignal::new(false);
	let answer = RwSignal::new(None::<String>);
	let ask = move || {
		let q = question.get_untracked().trim().to_string();
		if q.is_empty() || asking.get_untracked() {
			return;
		}
		asking.set(true);
		answer.set(None);
		let api = graph.api();
		graph.mutate(
			async move {
				let result = api.research_query(&q).await;
				asking.try_set(false);
				result
			},
			move |reply: ResearchAnswer| {
				if !reply.graph.is_empty() {
					graph.data.set(Some((reply.graph, false)));
				}
				answer.set(Some(reply.answer).filter(|a| !a.is_empty()));
			},
		);
	};

	view! {
		<div class="page research-page">
			<header class="toolbar">
				<h1>"Research"</h1>
				<form
					class="research-query"
					on:submit=move |ev| {
						ev.prevent_default();
						ask();
					}
				>
					<input
						type="search"
						placeholder="Ask a research question"
						prop:value=move || question.get()
						on:input=move |ev| question.set(event_target_value(&ev))
					/>
					<button class="btn" type="submit" disabled=move || asking.get()>
						{move || if asking.get() { "Researching" } else { "Ask" }}
					</button>
				</form>
			</header>
			<Show when=move || showing_demo.get()>
				<p class="notice demo">"Showing demo data: the research service is unavailable."</p>
			</Show>
			{move || answer.get().map(|a| view! { <p class="answer">{a}</p> })}
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			{move || {
				if graph.is_loading() && graph.data.with(Option::is_none) {
					view! { <Loading label="Loading research" /> }.into_any()
				} else if graph.data.with(|d| d.as_ref().is_some_and(|(g, _)| g.is_empty())) {
					view! { <EmptyState message="No research yet." hint="Ask a question to start exploring." /> }
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

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::filter::retain_edges;

	#[test]
	fn demo_graph_is_self_contained() {
		let demo = demo_graph();
		assert_eq!(retain_edges(&demo.nodes, &demo.edges).len(), demo.edges.len());
		let layout = LayoutStrategy::TypeGrouped.apply(&demo.nodes, &demo.edges);
		assert_eq!(layout.len(), demo.nodes.len());
	}

	#[test]
	fn demo_flag_comes_from_the_resolved_fetch() {
		let real = GraphData::new(vec![GraphNode::new("t", "Topic", "Rust")], vec![]);
		let (graph, demo) = with_demo_fallback(Ok(real.clone()), true).unwrap();
		assert_eq!(graph, real);
		assert!(!demo);

		let (graph, demo) = with_demo_fallback(Err(ApiError::Backend("offline".into())), true).unwrap();
		assert_eq!(graph, demo_graph());
		assert!(demo);
	}

	#[test]
	fn only_enabled_backend_errors_fall_back() {
		let backend = ApiError::Backend("offline".into());
		assert_eq!(with_demo_fallback(Err(backend.clone()), false), Err(backend));
		let network = ApiError::Network("refused".into());
		assert_eq!(with_demo_fallback(Err(network.clone()), true), Err(network));
	}
}
