//! `requestAnimationFrame` driver shared by the animated widgets.
//!
//! The widgets keep their simulation in plain structs with a `step`/`advance`
//! method; this module only turns animation frames into calls of a tick
//! closure with the frame timestamp and the seconds elapsed since the last
//! frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use wasm_bindgen::prelude::*;

/// Longest step handed to a tick, in seconds. Background tabs stop frames,
/// so the first frame after returning would otherwise jump.
pub const MAX_FRAME_DT: f64 = 0.1;

/// Cancellation point for one frame loop.
///
/// Cloning shares the same loop. It is `Send + Sync`, so it can be handed to
/// `on_cleanup`.
#[derive(Clone, Debug, Default)]
pub struct FrameLoopHandle {
	cancelled: Arc<AtomicBool>,
}

impl FrameLoopHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::SeqCst)
	}

	/// Stop the loop. No tick runs after this returns; the frame already
	/// requested only releases the loop's resources.
	pub fn cancel(&self) {
		if !self.cancelled.swap(true, Ordering::SeqCst) {
			debug!("frame loop cancelled");
		}
	}
}

/// Turns frame timestamps into ticks until its handle is cancelled.
pub struct FrameDriver<F> {
	handle: FrameLoopHandle,
	tick: F,
	last: Option<f64>,
}

impl<F: FnMut(f64, f64)> FrameDriver<F> {
	pub fn new(handle: FrameLoopHandle, tick: F) -> Self {
		Self { handle, tick, last: None }
	}

	/// Handle the frame at `now_ms`. Returns whether another frame is
	/// wanted; once it returns `false` the tick is never called again.
	pub fn frame(&mut self, now_ms: f64) -> bool {
		if self.handle.is_cancelled() {
			return false;
		}
		let dt = self
			.last
			.map_or(0.0, |prev| ((now_ms - prev) / 1000.0).clamp(0.0, MAX_FRAME_DT));
		self.last = Some(now_ms);
		(self.tick)(now_ms, dt);
		!self.handle.is_cancelled()
	}
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Call `tick(now_ms, dt_seconds)` once per animation frame until `handle`
/// is cancelled. The first frame reports a zero delta and later deltas are
/// capped at [`MAX_FRAME_DT`].
pub fn start(handle: &FrameLoopHandle, tick: impl FnMut(f64, f64) + 'static) {
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();
	let mut driver = FrameDriver::new(handle.clone(), tick);

	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		if !driver.frame(now) {
			// the closure owns its own cell; dropping it here frees both
			// once this call returns
			let _ = animate_inner.borrow_mut().take();
			return;
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			request_frame(cb);
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		request_frame(cb);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn recording(handle: &FrameLoopHandle) -> (FrameDriver<impl FnMut(f64, f64)>, Rc<RefCell<Vec<(f64, f64)>>>) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		let driver = FrameDriver::new(handle.clone(), move |now, dt| sink.borrow_mut().push((now, dt)));
		(driver, seen)
	}

	#[test]
	fn ticks_with_elapsed_seconds() {
		let handle = FrameLoopHandle::new();
		let (mut driver, seen) = recording(&handle);
		assert!(driver.frame(1000.0));
		assert!(driver.frame(1016.0));
		assert!(driver.frame(5000.0));
		assert_eq!(*seen.borrow(), [(1000.0, 0.0), (1016.0, 0.016), (5000.0, MAX_FRAME_DT)]);
	}

	#[test]
	fn no_tick_runs_after_cancel() {
		let handle = FrameLoopHandle::new();
		let (mut driver, seen) = recording(&handle);
		assert!(driver.frame(0.0));
		handle.clone().cancel();
		assert!(handle.is_cancelled());
		for now in [16.0, 32.0, 48.0] {
			assert!(!driver.frame(now));
		}
		assert_eq!(seen.borrow().len(), 1);
	}

	#[test]
	fn cancelling_inside_a_tick_ends_the_loop() {
		let handle = FrameLoopHandle::new();
		let inner = handle.clone();
		let mut calls = 0;
		let mut driver = FrameDriver::new(handle.clone(), move |_, _| {
			calls += 1;
			assert_eq!(calls, 1, "ticked after cancel");
			inner.cancel();
		});
		assert!(!driver.frame(0.0));
		assert!(!driver.frame(16.0));
	}
}
