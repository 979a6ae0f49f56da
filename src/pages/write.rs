use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::AppConfig;
use crate::markdown;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Pane {
	#[default]
	Split,
	Edit,
	Preview,
}

impl Pane {
	const ALL: [Pane; 3] = [Pane::Split, Pane::Edit, Pane::Preview];

	fn label(self) -> &'static str {
		match self {
			Pane::Split => "Split",
			Pane::Edit => "Write",
			Pane::Preview => "Preview",
		}
	}

	fn shows_editor(self) -> bool {
		self != Pane::Preview
	}

	fn shows_preview(self) -> bool {
		self != Pane::Edit
	}
}

/// Distraction-free markdown editor.
#[component]
pub fn Write() -> impl IntoView {
	let home = expect_context::<AppConfig>().href("/");
	let text = RwSignal::new(String::new());
	let pane = RwSignal::new(Pane::default());
	let preview = Memo::new(move |_| text.with(|t| markdown::render(t)));
	let stats = Memo::new(move |_| text.with(|t| (markdown::word_count(t), markdown::reading_minutes(t))));

	view! {
		<div class="page focus-page write-page">
			<header class="focus-bar">
				<A href=home>"← Back"</A>
				<div class="pane-switch">
					{Pane::ALL
						.into_iter()
						.map(|p| {
							view! {
								<button class:active=move || pane.get() == p on:click=move |_| pane.set(p)>
									{p.label()}
								</button>
							}
						})
						.collect_view()}
				</div>
				<span class="stats">
					{move || {
						let (words, minutes) = stats.get();
						format!("{words} words · {minutes} min read")
					}}
				</span>
			</header>
			<div class="write-panes" class:split=move || pane.get() == Pane::Split>
				<Show when=move || pane.get().shows_editor()>
					<textarea
						class="editor"
						placeholder="Start writing…"
						prop:value=move || text.get()
						on:input=move |ev| text.set(event_target_value(&ev))
					/>
				</Show>
				<Show when=move || pane.get().shows_preview()>
					<article class="markdown-body" inner_html=move || preview.get() />
				</Show>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_shows_both_panes() {
		assert!(Pane::Split.shows_editor() && Pane::Split.shows_preview());
		assert!(!Pane::Edit.shows_preview());
		assert!(!Pane::Preview.shows_editor());
	}
}
