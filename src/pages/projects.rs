use leptos::prelude::*;
use log::info;

use crate::api::types::{Ack, ChatReply, CycleReport, Project};
use crate::components::common::{BusyButton, EmptyState, ErrorBanner, Loading};
use crate::components::force_graph::ForceGraphCanvas;
use crate::controller::Loadable;
use crate::graph::{GraphData, LayoutStrategy, PlacedGraph};

#[derive(Clone, Debug, PartialEq)]
struct Turn {
	from_user: bool,
	text: String,
}

#[component]
pub fn Projects() -> impl IntoView {
	let graph = Loadable::<GraphData>::new();
	let projects = Loadable::<Vec<Project>>::new();
	let reload = move || {
		graph.load(|api| async move { api.full_graph().await });
		projects.load(|api| async move { api.projects().await });
	};
	reload();

	let placed = Memo::new(move |_| {
		graph
			.data
			.with(|d| d.as_ref().map(|d| PlacedGraph::build(d, LayoutStrategy::HubAndSpoke)))
			.unwrap_or_default()
	});
	let selected = RwSignal::new(None::<String>);
	let current = Memo::new(move |_| {
		let id = selected.get()?;
		projects.data.with(|p| p.as_ref()?.iter().find(|p| p.id == id).cloned())
	});

	let new_name = RwSignal::new(String::new());
	let creating = RwSignal::new(false);
	let create = Callback::new(move |_: ()| {
		let name = new_name.get_untracked().trim().to_string();
		if name.is_empty() {
			return;
		}
		creating.set(true);
		let api = projects.api();
		projects.mutate(
			async move {
				let ack = api.create_project(&name).await;
				creating.try_set(false);
				ack
			},
			move |_: Ack| {
				new_name.set(String::new());
				reload();
			},
		);
	});

	let initializing = RwSignal::new(false);
	let init_defaults = Callback::new(move |_: ()| {
		initializing.set(true);
		let api = projects.api();
		projects.mutate(
			async move {
				let ack = api.initialize_default_projects().await;
				initializing.try_set(false);
				ack
			},
			move |_: Ack| {
				info!("Default projects created");
				reload();
			},
		);
	});

	let turns = RwSignal::new(Vec::<Turn>::new());
	let draft = RwSignal::new(String::new());
	let chatting = RwSignal::new(false);
	Effect::new(move |_| {
		selected.track();
		turns.set(Vec::new());
	});
	let send = Callback::new(move |_: ()| {
		let (Some(project), message) = (current.get_untracked(), draft.get_untracked()) else {
			return;
		};
		let message = message.trim().to_string();
		if message.is_empty() || chatting.get_untracked() {
			return;
		}
		turns.update(|t| {
			t.push(Turn {
				from_user: true,
				text: message.clone(),
			})
		});
		draft.set(String::new());
		chatting.set(true);
		let api = projects.api();
		projects.mutate(
			async move {
				let reply = api.project_chat(&project.id, &message).await;
				chatting.try_set(false);
				reply
			},
			move |reply: ChatReply| {
				turns.update(|t| {
					t.push(Turn {
						from_user: false,
						text: reply.response,
					})
				})
			},
		);
	});

	let focus = RwSignal::new(String::new());
	let researching = RwSignal::new(false);
	let findings = RwSignal::new(None::<CycleReport>);
	let research = Callback::new(move |_: ()| {
		let Some(project) = current.get_untracked() else {
			return;
		};
		researching.set(true);
		findings.set(None);
		let focus_text = focus.get_untracked();
		let api = projects.api();
		projects.mutate(
			async move {
				let report = api.project_research(&project.id, &focus_text).await;
				researching.try_set(false);
				report
			},
			move |report: CycleReport| {
				findings.set(Some(report));
				reload();
			},
		);
	});

	view! {
		<div class="page projects-page">
			<header class="toolbar">
				<h1>"Projects"</h1>
				<form
					class="new-project"
					on:submit=move |ev| {
						ev.prevent_default();
						create.run(());
					}
				>
					<input
						type="text"
						placeholder="New project name"
						prop:value=move || new_name.get()
						on:input=move |ev| new_name.set(event_target_value(&ev))
					/>
					<button class="btn" type="submit" disabled=move || creating.get()>
						{move || if creating.get() { "Creating" } else { "Create" }}
					</button>
				</form>
			</header>
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			<ErrorBanner message=projects.error on_retry=Callback::new(move |_| reload()) />
			<div class="projects-layout">
				<aside class="project-list">
					{move || match projects.data.get() {
						None if projects.is_loading() => view! { <Loading label="Loading projects" /> }.into_any(),
						None => ().into_any(),
						Some(list) if list.is_empty() => view! {
							<EmptyState message="No projects yet." hint="Start from the default set or create your own." />
							<BusyButton
								label="Create default projects"
								busy_label="Creating"
								busy=initializing
								on_click=init_defaults
							/>
						}
							.into_any(),
						Some(list) => list
							.into_iter()
							.map(|p| {
								let id = p.id.clone();
								let is_current = {
									let id = id.clone();
									move || selected.get().as_deref() == Some(id.as_str())
								};
								view! {
									<button
										class="project"
										class:active=is_current
										on:click=move |_| selected.set(Some(id.clone()))
									>
										<strong>{p.name}</strong>
										{p.status.map(|s| view! { <span class="status">{s}</span> })}
									</button>
								}
							})
							.collect_view()
							.into_any(),
					}}
				</aside>
				<div class="graph-stage">
					<ForceGraphCanvas
						data=placed
						selected=selected
						on_select=Callback::new(move |id| selected.set(id))
					/>
				</div>
				{move || {
					current
						.get()
						.map(|project| {
							view! {
								<aside class="project-panel">
									<h2>{project.name.clone()}</h2>
									{project.description.clone().map(|d| view! { <p>{d}</p> })}
									<section class="project-research">
										<input
											type="text"
											placeholder="Research focus (optional)"
											prop:value=move || focus.get()
											on:input=move |ev| focus.set(event_target_value(&ev))
										/>
										<BusyButton
											label="Research"
											busy_label="Researching"
											busy=researching
											on_click=research
										/>
										{move || {
											findings
												.get()
												.map(|r| {
													view! {
														<div class="findings">
															<p>{r.headline()}</p>
															<ul>
																{r.findings.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
															</ul>
														</div>
													}
												})
										}}
									</section>
									<section class="project-chat">
										<ol class="transcript">
											{move || {
												turns
													.get()
													.into_iter()
													.map(|t| {
														let class = if t.from_user { "message user" } else { "message assistant" };
														view! { <li class=class>{t.text}</li> }
													})
													.collect_view()
											}}
										</ol>
										<form
											class="chat-input"
											on:submit=move |ev| {
												ev.prevent_default();
												send.run(());
											}
										>
											<input
												type="text"
												placeholder="Ask about this project"
												prop:value=move || draft.get()
												on:input=move |ev| draft.set(event_target_value(&ev))
												disabled=move || chatting.get()
											/>
											<button type="submit" disabled=move || chatting.get()>"Send"</button>
										</form>
									</section>
								</aside>
							}
						})
				}}
			</div>
		</div>
	}
}
