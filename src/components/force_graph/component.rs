use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::frame::{FrameLoop, WindowListener};
use super::render;
use super::state::{CLICK_SLOP, ForceGraphState};
use crate::graph::PlacedGraph;
use crate::theme::Theme;

type Shared = Rc<RefCell<Option<ForceGraphState>>>;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Size of the element the canvas fills.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let parent = canvas.parent_element();
	let measure = |read: fn(&web_sys::Element) -> i32, fallback| {
		parent
			.as_ref()
			.map(|p| read(p) as f64)
			.filter(|v| *v > 0.0)
			.unwrap_or(fallback)
	};
	(
		measure(web_sys::Element::client_width, FALLBACK_SIZE.0),
		measure(web_sys::Element::client_height, FALLBACK_SIZE.1),
	)
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

/// Canvas view of a laid-out graph. Nodes start pinned at their layout
/// positions and can be dragged; clicking a node reports its id.
///
/// The canvas fills its parent element and follows window resizes.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<PlacedGraph>,
	#[prop(optional, into)] selected: Option<Signal<Option<String>>>,
	#[prop(optional)] on_select: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared = Rc::new(RefCell::new(None));
	let frames = FrameLoop::default();
	let resize = WindowListener::default();
	let theme = use_context::<RwSignal<Theme>>();

	let teardown = StoredValue::new_local((frames.clone(), resize.clone()));
	on_cleanup(move || {
		teardown.try_with_value(|(frames, resize)| {
			frames.stop();
			resize.remove();
		});
	});

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if frames.is_running() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas;

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("2d canvas context unavailable");
			return;
		};
		let mut initial = ForceGraphState::new(&data.get_untracked(), w, h);
		initial.dark = theme.map(|t| t.get_untracked() == Theme::Dark).unwrap_or(true);
		initial.select_id(selected.and_then(|s| s.get_untracked()).as_deref());
		*state_init.borrow_mut() = Some(initial);

		let state_resize = state_init.clone();
		resize.attach("resize", move || {
			let (nw, nh) = container_size(&canvas);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				if (nw, nh) == (s.width, s.height) {
					return;
				}
				s.resize(nw, nh);
			}
			canvas.set_width(nw as u32);
			canvas.set_height(nh as u32);
		});

		let state_anim = state_init.clone();
		frames.start(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
		});
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.load(&graph);
		}
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selected.and_then(|s| s.get());
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.select_id(id.as_deref());
		}
	});

	let state_theme = state.clone();
	Effect::new(move |_| {
		let dark = theme.map(|t| t.get() == Theme::Dark).unwrap_or(true);
		if let Some(ref mut s) = *state_theme.borrow_mut() {
			s.dark = dark;
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.moved = false;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			// Update hover state when not dragging
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if (x - s.drag.start_x).hypot(y - s.drag.start_y) > CLICK_SLOP {
					s.drag.moved = true;
				}
				if let (Some(idx), true) = (s.drag.node_idx, s.drag.moved) {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				if (x - s.pan.start_x).hypot(y - s.pan.start_y) > CLICK_SLOP {
					s.pan.moved = true;
				}
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = {
			let mut guard = state_mu.borrow_mut();
			let Some(ref mut s) = *guard else {
				return;
			};
			let clicked = if s.drag.active && !s.drag.moved {
				s.selected = s.drag.node_idx;
				Some(s.drag.node_idx.and_then(|idx| s.node_id(idx)))
			} else if s.pan.active && !s.pan.moved {
				s.selected = None;
				Some(None)
			} else {
				None
			};
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			clicked
		};
		// The borrow is released before handing control to the page.
		if let (Some(id), Some(cb)) = (clicked, on_select) {
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
