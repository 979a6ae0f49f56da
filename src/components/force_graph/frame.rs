//! Browser callbacks owned by the canvas: the animation frame loop and the
//! window resize listener. Both are torn down explicitly so nothing the
//! callbacks capture outlives the component.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

#[derive(Default)]
struct Frames {
	callback: Option<Closure<dyn FnMut()>>,
	handle: Option<i32>,
}

/// Calls a function once per animation frame until [`FrameLoop::stop`].
///
/// The frame callback only holds a weak reference back to the loop, so
/// dropping every `FrameLoop` handle frees the callback and its captures.
#[derive(Clone, Default)]
pub struct FrameLoop(Rc<RefCell<Frames>>);

impl FrameLoop {
	pub fn start(&self, mut tick: impl FnMut() + 'static) {
		self.stop();
		let frames: Weak<RefCell<Frames>> = Rc::downgrade(&self.0);
		let callback = Closure::<dyn FnMut()>::new(move || {
			tick();
			if let Some(frames) = frames.upgrade() {
				request(&frames);
			}
		});
		self.0.borrow_mut().callback = Some(callback);
		request(&self.0);
	}

	/// Cancels the pending frame and drops the callback.
	pub fn stop(&self) {
		let mut frames = self.0.borrow_mut();
		if let (Some(handle), Some(window)) = (frames.handle.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(handle);
		}
		frames.callback = None;
	}

	pub fn is_running(&self) -> bool {
		self.0.borrow().callback.is_some()
	}
}

fn request(frames: &RefCell<Frames>) {
	let mut frames = frames.borrow_mut();
	let Frames { callback, handle } = &mut *frames;
	let (Some(cb), Some(window)) = (callback.as_ref(), web_sys::window()) else {
		return;
	};
	*handle = window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
}

/// A single window event listener that can be detached later.
#[derive(Clone, Default)]
pub struct WindowListener(Rc<RefCell<Option<(&'static str, Closure<dyn FnMut()>)>>>);

impl WindowListener {
	pub fn attach(&self, event: &'static str, f: impl FnMut() + 'static) {
		self.remove();
		let Some(window) = web_sys::window() else {
			return;
		};
		let callback = Closure::<dyn FnMut()>::new(f);
		match window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
			Ok(()) => *self.0.borrow_mut() = Some((event, callback)),
			Err(_) => log::warn!("Could not listen for window {}", event),
		}
	}

	pub fn remove(&self) {
		let Some((event, callback)) = self.0.borrow_mut().take() else {
			return;
		};
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		}
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn stopping_the_loop_frees_its_captures() {
		let ticks = Rc::new(Cell::new(0u32));
		let frames = FrameLoop::default();
		let counter = ticks.clone();
		frames.start(move || counter.set(counter.get() + 1));
		assert!(frames.is_running());
		assert_eq!(Rc::strong_count(&ticks), 2);

		frames.stop();
		assert!(!frames.is_running());
		assert_eq!(Rc::strong_count(&ticks), 1);
	}

	#[wasm_bindgen_test]
	fn dropping_the_last_handle_frees_the_loop() {
		let frames = FrameLoop::default();
		let inner = Rc::downgrade(&frames.0);
		frames.start(|| {});
		frames.stop();
		drop(frames);
		assert!(inner.upgrade().is_none());
	}

	#[wasm_bindgen_test]
	fn removed_listener_releases_its_closure() {
		let hits = Rc::new(Cell::new(0u32));
		let listener = WindowListener::default();
		let counter = hits.clone();
		listener.attach("resize", move || counter.set(counter.get() + 1));
		assert_eq!(Rc::strong_count(&hits), 2);
		listener.remove();
		assert_eq!(Rc::strong_count(&hits), 1);
	}
}
