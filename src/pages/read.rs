use leptos::prelude::*;
use leptos_router::components::A;

use crate::api::types::{Ack, ReferenceRequest};
use crate::components::common::{EmptyState, ErrorBanner, Loading};
use crate::config::AppConfig;
use crate::controller::Loadable;
use crate::graph::{GraphData, GraphNode};
use crate::markdown;
use crate::pages::query_param;

pub const DOCUMENT: &str = "Document";

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSummary {
	pub id: String,
	pub title: String,
	pub content: String,
}

impl DocumentSummary {
	fn from_node(node: &GraphNode) -> Self {
		Self {
			id: node.id.clone(),
			title: node.display_name().to_string(),
			content: node
				.content
				.clone()
				.or_else(|| node.description.clone())
				.unwrap_or_default(),
		}
	}
}

pub fn documents(data: &GraphData) -> Vec<DocumentSummary> {
	data.nodes
		.iter()
		.filter(|n| n.is_type(DOCUMENT))
		.map(DocumentSummary::from_node)
		.collect()
}

fn current_selection() -> String {
	web_sys::window()
		.and_then(|w| w.get_selection().ok().flatten())
		.map(|s| String::from(s.to_string()))
		.map(|s| s.trim().to_string())
		.unwrap_or_default()
}

/// Document reader with "save selection as reference".
#[component]
pub fn Read() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let (home, read_href) = (config.href("/"), config.href("/read"));
	let graph = Loadable::<GraphData>::new();
	let reload = move || graph.load(|api| async move { api.cognitive_graph().await });
	reload();

	let selected_id = query_param("document");
	let docs = Memo::new(move |_| graph.data.with(|d| d.as_ref().map(documents).unwrap_or_default()));
	let current = Memo::new(move |_| {
		let docs = docs.get();
		match selected_id.get() {
			Some(id) => docs.into_iter().find(|d| d.id == id),
			None => docs.into_iter().next(),
		}
	});

	let selection = RwSignal::new(String::new());
	let note = RwSignal::new(String::new());
	let project = RwSignal::new(String::new());
	let saving = RwSignal::new(false);
	let saved = RwSignal::new(None::<String>);

	let save = move |_: leptos::ev::MouseEvent| {
		let Some(doc) = current.get_untracked() else {
			return;
		};
		let (text, note_text, project_text) =
			(selection.get_untracked(), note.get_untracked(), project.get_untracked());
		if text.is_empty() {
			return;
		}
		saving.set(true);
		let api = graph.api();
		graph.mutate(
			async move {
				let request = ReferenceRequest {
					text: &text,
					note: &note_text,
					project: &project_text,
					source: &doc.title,
				};
				let result = api.save_reference(&request).await;
				saving.try_set(false);
				result
			},
			move |ack: Ack| {
				saved.set(Some(ack.message.unwrap_or_else(|| "Reference saved.".to_string())));
				selection.set(String::new());
				note.set(String::new());
			},
		);
	};

	view! {
		<div class="page focus-page read-page">
			<header class="focus-bar">
				<A href=home>"← Back"</A>
				{move || current.get().map(|d| view! { <h1>{d.title}</h1> })}
				{move || {
					current
						.get()
						.map(|d| view! { <span class="stats">{markdown::reading_minutes(&d.content)} " min read"</span> })
				}}
			</header>
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			<div class="read-layout">
				<ul class="document-list">
					{move || {
						let read_href = read_href.clone();
						docs.get()
							.into_iter()
							.map(|d| {
								let href = format!(
									"{}?document={}",
									read_href,
									String::from(js_sys::encode_uri_component(&d.id)),
								);
								let id = d.id.clone();
								let active = move || current.with(|c| c.as_ref().is_some_and(|c| c.id == id));
								view! {
									<li class="doc" class:active=active>
										<A href=href>{d.title}</A>
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
				{move || {
					if graph.is_loading() && graph.data.with(Option::is_none) {
						return view! { <Loading label="Loading documents" /> }.into_any();
					}
					match current.get() {
						Some(doc) => view! {
							<article
								class="markdown-body reader"
								on:mouseup=move |_| selection.set(current_selection())
								inner_html=markdown::render(&doc.content)
							/>
						}
							.into_any(),
						None if graph.data.with(Option::is_some) => view! {
							<EmptyState
								message="No documents yet."
								hint="Upload a document through the chat to read it here."
							/>
						}
							.into_any(),
						None => ().into_any(),
					}
				}}
				<Show when=move || !selection.get().is_empty()>
					<aside class="reference-form">
						<h3>"Save as reference"</h3>
						<blockquote>{move || selection.get()}</blockquote>
						<input
							type="text"
							placeholder="Note"
							prop:value=move || note.get()
							on:input=move |ev| note.set(event_target_value(&ev))
						/>
						<input
							type="text"
							placeholder="Project"
							prop:value=move || project.get()
							on:input=move |ev| project.set(event_target_value(&ev))
						/>
						<button class="btn" disabled=move || saving.get() on:click=save>
							{move || if saving.get() { "Saving" } else { "Save reference" }}
						</button>
						<button class="btn btn-link" on:click=move |_| selection.set(String::new())>
							"Cancel"
						</button>
					</aside>
				</Show>
				{move || saved.get().map(|msg| view! { <p class="notice">{msg}</p> })}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_document_nodes_are_listed() {
		let data = GraphData::new(
			vec![
				GraphNode {
					content: Some("# Notes".into()),
					..GraphNode::new("d1", DOCUMENT, "Notes")
				},
				GraphNode::new("p", "Person", "Ann"),
				GraphNode {
					description: Some("summary only".into()),
					..GraphNode::new("d2", DOCUMENT, "")
				},
			],
			vec![],
		);
		let docs = documents(&data);
		assert_eq!(docs.len(), 2);
		assert_eq!(docs[0].content, "# Notes");
		assert_eq!(docs[1].title, "d2");
		assert_eq!(docs[1].content, "summary only");
	}
}
