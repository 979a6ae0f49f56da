use leptos::html::Audio as AudioElement;
use leptos::prelude::*;
use leptos_router::components::A;
use log::warn;

use crate::components::common::{EmptyState, ErrorBanner, Loading};
use crate::config::AppConfig;
use crate::controller::Loadable;
use crate::graph::{GraphData, GraphNode};
use crate::pages::query_param;

pub const RATES: [f64; 5] = [0.75, 1.0, 1.25, 1.5, 2.0];
const SKIP_SECS: f64 = 15.0;

#[derive(Clone, Debug, PartialEq)]
pub struct AudioTrack {
	pub id: String,
	pub title: String,
	pub url: String,
	pub duration_secs: Option<f64>,
}

impl AudioTrack {
	/// Memories and documents that carry an `audio_url` (or `audio`) property.
	pub fn from_node(node: &GraphNode) -> Option<Self> {
		if !(node.is_type("Memory") || node.is_type("Document")) {
			return None;
		}
		let url = node
			.property("audio_url")
			.or_else(|| node.property("audio"))
			.filter(|u| !u.is_empty())?;
		Some(Self {
			id: node.id.clone(),
			title: node.display_name().to_string(),
			url: url.to_string(),
			duration_secs: node.properties.get("duration").and_then(|d| d.as_f64()),
		})
	}
}

pub fn tracks(data: &GraphData) -> Vec<AudioTrack> {
	data.nodes.iter().filter_map(AudioTrack::from_node).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
	#[default]
	Stopped,
	Playing,
	Paused,
}

/// What the player shows; the `<audio>` element follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
	pub track: Option<String>,
	pub playback: Playback,
	pub position: f64,
	pub duration: f64,
	pub rate: f64,
}

impl Default for PlayerState {
	fn default() -> Self {
		Self {
			track: None,
			playback: Playback::Stopped,
			position: 0.0,
			duration: 0.0,
			rate: 1.0,
		}
	}
}

impl PlayerState {
	/// Switching tracks stops playback; the rate is kept.
	pub fn load(&mut self, track: &AudioTrack) {
		if self.track.as_deref() == Some(track.id.as_str()) {
			return;
		}
		self.track = Some(track.id.clone());
		self.playback = Playback::Stopped;
		self.position = 0.0;
		self.duration = track.duration_secs.unwrap_or(0.0);
	}

	pub fn play(&mut self) {
		if self.track.is_some() {
			self.playback = Playback::Playing;
		}
	}

	pub fn pause(&mut self) {
		if self.playback == Playback::Playing {
			self.playback = Playback::Paused;
		}
	}

	pub fn toggle(&mut self) {
		match self.playback {
			Playback::Playing => self.pause(),
			Playback::Stopped | Playback::Paused => self.play(),
		}
	}

	pub fn stop(&mut self) {
		self.playback = Playback::Stopped;
		self.position = 0.0;
	}

	/// Clamps to the known duration; returns the position actually used.
	pub fn seek(&mut self, to: f64) -> f64 {
		let upper = if self.duration > 0.0 { self.duration } else { f64::MAX };
		self.position = to.clamp(0.0, upper);
		self.position
	}

	pub fn skip(&mut self, delta: f64) -> f64 {
		self.seek(self.position + delta)
	}

	pub fn cycle_rate(&mut self) {
		let next = RATES.iter().position(|r| *r > self.rate).unwrap_or(0);
		self.rate = RATES[next];
	}

	pub fn time_update(&mut self, position: f64) {
		if position.is_finite() {
			self.position = position.max(0.0);
		}
	}

	pub fn set_duration(&mut self, duration: f64) {
		if duration.is_finite() && duration > 0.0 {
			self.duration = duration;
		}
	}

	pub fn ended(&mut self) {
		self.stop();
	}

	/// Played fraction in `0..=1`.
	pub fn progress(&self) -> f64 {
		if self.duration <= 0.0 {
			return 0.0;
		}
		(self.position / self.duration).clamp(0.0, 1.0)
	}
}

/// `m:ss`, or `h:mm:ss` past an hour.
pub fn format_time(secs: f64) -> String {
	let total = if secs.is_finite() && secs > 0.0 { secs.floor() as u64 } else { 0 };
	let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
	if h > 0 {
		format!("{h}:{m:02}:{s:02}")
	} else {
		format!("{m}:{s:02}")
	}
}

#[component]
pub fn Audio() -> impl IntoView {
	let config = expect_context::<AppConfig>();
	let audio_href = config.href("/audio");
	let graph = Loadable::<GraphData>::new();
	let reload = move || graph.load(|api| async move { api.cognitive_graph().await });
	reload();

	let requested = query_param("id");
	let all = Memo::new(move |_| graph.data.with(|d| d.as_ref().map(tracks).unwrap_or_default()));
	let current = Memo::new(move |_| {
		let all = all.get();
		match requested.get() {
			Some(id) => all.into_iter().find(|t| t.id == id),
			None => all.into_iter().next(),
		}
	});

	let player = RwSignal::new(PlayerState::default());
	let audio_ref = NodeRef::<AudioElement>::new();

	Effect::new(move |_| {
		if let Some(track) = current.get() {
			player.update(|p| p.load(&track));
		}
	});

	Effect::new(move |_| {
		let playback = player.with(|p| p.playback);
		let Some(el) = audio_ref.get() else {
			return;
		};
		match playback {
			Playback::Playing => {
				if el.play().is_err() {
					warn!("Audio playback refused");
					player.update(|p| p.pause());
				}
			}
			Playback::Paused => {
				let _ = el.pause();
			}
			Playback::Stopped => {
				let _ = el.pause();
				el.set_current_time(0.0);
			}
		}
	});

	Effect::new(move |_| {
		let rate = player.with(|p| p.rate);
		if let Some(el) = audio_ref.get() {
			el.set_playback_rate(rate);
		}
	});

	// Moves the playhead in the state, then mirrors it onto the element.
	let move_playhead = move |step: &dyn Fn(&mut PlayerState) -> f64| {
		let Some(pos) = player.try_update(|p| step(p)) else {
			return;
		};
		if let Some(el) = audio_ref.get_untracked() {
			el.set_current_time(pos);
		}
	};
	let seek_to = move |to: f64| move_playhead(&|p: &mut PlayerState| p.seek(to));
	let skip_by = move |delta: f64| move_playhead(&|p: &mut PlayerState| p.skip(delta));

	view! {
		<div class="page audio-page">
			<ErrorBanner message=graph.error on_retry=Callback::new(move |_| reload()) />
			<div class="audio-layout">
				<ul class="track-list">
					{move || {
						let audio_href = audio_href.clone();
						all.get()
							.into_iter()
							.map(|t| {
								let href = format!(
									"{}?id={}",
									audio_href,
									String::from(js_sys::encode_uri_component(&t.id)),
								);
								let id = t.id.clone();
								let active = move || current.with(|c| c.as_ref().is_some_and(|c| c.id == id));
								view! {
									<li class="track" class:active=active>
										<A href=href>{t.title}</A>
										{t.duration_secs.map(|d| view! { <span class="duration">{format_time(d)}</span> })}
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
				{move || {
					if graph.is_loading() && graph.data.with(Option::is_none) {
						return view! { <Loading label="Loading audio" /> }.into_any();
					}
					let Some(track) = current.get() else {
						return view! {
							<EmptyState
								message="No recordings yet."
								hint="Voice notes and narrated documents show up here."
							/>
						}
							.into_any();
					};
					view! {
						<section class="player">
							<h2>{track.title.clone()}</h2>
							<audio
								node_ref=audio_ref
								src=track.url.clone()
								preload="metadata"
								on:timeupdate=move |_| {
									if let Some(el) = audio_ref.get_untracked() {
										player.update(|p| p.time_update(el.current_time()));
									}
								}
								on:loadedmetadata=move |_| {
									if let Some(el) = audio_ref.get_untracked() {
										el.set_playback_rate(player.with_untracked(|p| p.rate));
										player.update(|p| p.set_duration(el.duration()));
									}
								}
								on:ended=move |_| player.update(|p| p.ended())
							/>
							<input
								type="range"
								class="scrubber"
								min="0"
								max="1000"
								prop:value=move || (player.with(|p| p.progress()) * 1000.0).round().to_string()
								on:change=move |ev| {
									let fraction = event_target_value(&ev).parse::<f64>().unwrap_or(0.0) / 1000.0;
									seek_to(fraction * player.with_untracked(|p| p.duration));
								}
							/>
							<div class="times">
								<span>{move || format_time(player.with(|p| p.position))}</span>
								<span>{move || format_time(player.with(|p| p.duration))}</span>
							</div>
							<div class="controls">
								<button title="Back 15s" on:click=move |_| skip_by(-SKIP_SECS)>"−15"</button>
								<button class="play" on:click=move |_| player.update(|p| p.toggle())>
									{move || if player.with(|p| p.playback == Playback::Playing) { "Pause" } else { "Play" }}
								</button>
								<button title="Forward 15s" on:click=move |_| skip_by(SKIP_SECS)>"+15"</button>
								<button title="Stop" on:click=move |_| player.update(|p| p.stop())>"Stop"</button>
								<button class="rate" on:click=move |_| player.update(|p| p.cycle_rate())>
									{move || format!("{}×", player.with(|p| p.rate))}
								</button>
							</div>
						</section>
					}
						.into_any()
				}}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn track(id: &str, duration: Option<f64>) -> AudioTrack {
		AudioTrack {
			id: id.into(),
			title: id.into(),
			url: format!("/audio/{id}.mp3"),
			duration_secs: duration,
		}
	}

	#[test]
	fn play_requires_a_track() {
		let mut p = PlayerState::default();
		p.play();
		assert_eq!(p.playback, Playback::Stopped);
		p.load(&track("a", Some(60.0)));
		p.toggle();
		assert_eq!(p.playback, Playback::Playing);
		p.toggle();
		assert_eq!(p.playback, Playback::Paused);
	}

	#[test]
	fn switching_tracks_stops_and_rewinds() {
		let mut p = PlayerState::default();
		p.load(&track("a", Some(60.0)));
		p.play();
		p.time_update(30.0);
		p.cycle_rate();
		p.load(&track("b", None));
		assert_eq!(p.playback, Playback::Stopped);
		assert_eq!(p.position, 0.0);
		assert_eq!(p.rate, 1.25);
	}

	#[test]
	fn seek_clamps_to_duration() {
		let mut p = PlayerState::default();
		p.load(&track("a", Some(60.0)));
		assert_eq!(p.seek(90.0), 60.0);
		assert_eq!(p.skip(-100.0), 0.0);
		assert_eq!(p.progress(), 0.0);
		p.seek(30.0);
		assert_eq!(p.progress(), 0.5);
		assert_eq!(p.skip(15.0), 45.0);
		assert_eq!(p.skip(60.0), 60.0);
	}

	#[test]
	fn rate_wraps_around() {
		let mut p = PlayerState::default();
		for _ in 0..4 {
			p.cycle_rate();
		}
		assert_eq!(p.rate, 0.75);
	}

	#[test]
	fn ended_resets() {
		let mut p = PlayerState::default();
		p.load(&track("a", Some(10.0)));
		p.play();
		p.time_update(10.0);
		p.ended();
		assert_eq!((p.playback, p.position), (Playback::Stopped, 0.0));
	}

	#[test]
	fn formats_times() {
		assert_eq!(format_time(0.0), "0:00");
		assert_eq!(format_time(65.4), "1:05");
		assert_eq!(format_time(3725.0), "1:02:05");
		assert_eq!(format_time(f64::NAN), "0:00");
	}

	#[test]
	fn tracks_need_an_audio_url() {
		let mut memo = GraphNode::new("m", "Memory", "Voice note");
		memo.properties.insert("audio_url".into(), "/a.mp3".into());
		memo.properties.insert("duration".into(), 42.0.into());
		let mut person = GraphNode::new("p", "Person", "Ann");
		person.properties.insert("audio_url".into(), "/b.mp3".into());
		let data = GraphData::new(vec![memo, person, GraphNode::new("d", "Document", "Text")], vec![]);
		let found = tracks(&data);
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].duration_secs, Some(42.0));
	}
}
