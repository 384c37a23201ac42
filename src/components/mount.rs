//! Per-mount resources shared between a component's closures and its cleanup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Holds a value created when a component mounts. Clones share the slot;
/// `take` on cleanup drops the value for every clone.
pub struct MountSlot<T>(Rc<RefCell<Option<T>>>);

impl<T> Clone for MountSlot<T> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<T> Default for MountSlot<T> {
	fn default() -> Self {
		Self(Rc::new(RefCell::new(None)))
	}
}

impl<T> MountSlot<T> {
	/// Fill the slot, dropping whatever an earlier mount left behind.
	pub fn set(&self, value: T) {
		*self.0.borrow_mut() = Some(value);
	}

	pub fn take(&self) -> Option<T> {
		self.0.borrow_mut().take()
	}

	pub fn is_set(&self) -> bool {
		self.0.borrow().is_some()
	}

	/// Run `f` on the value if the slot is filled.
	pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
		self.0.borrow_mut().as_mut().map(f)
	}

	/// Run `f` on the value without a mutable borrow, so `f` may re-enter.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
		self.0.borrow().as_ref().map(f)
	}
}

/// Stop switch for a self-rescheduling `requestAnimationFrame` loop.
#[derive(Debug, Default)]
pub struct FrameLoop {
	stopped: Cell<bool>,
	pending: Cell<Option<i32>>,
}

impl FrameLoop {
	/// Remember the handle of the frame just requested.
	pub fn scheduled(&self, handle: i32) {
		self.pending.set(Some(handle));
	}

	/// Called at the top of each frame; clears the pending handle.
	pub fn fired(&self) {
		self.pending.set(None);
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.get()
	}

	/// End the loop. Returns the frame still queued, which the caller must
	/// cancel before dropping the callback.
	pub fn stop(&self) -> Option<i32> {
		self.stopped.set(true);
		self.pending.take()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Counted(Rc<Cell<u32>>);

	impl Drop for Counted {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	#[test]
	fn take_releases_for_every_clone() {
		let drops = Rc::new(Cell::new(0));
		let slot = MountSlot::default();
		let handler_copy = slot.clone();
		slot.set(Counted(drops.clone()));
		assert!(handler_copy.is_set());

		drop(slot.take());
		assert_eq!(drops.get(), 1);
		assert!(!handler_copy.is_set());
		assert_eq!(handler_copy.with_mut(|_| ()), None);
	}

	#[test]
	fn refilling_drops_previous_value() {
		let drops = Rc::new(Cell::new(0));
		let slot = MountSlot::default();
		slot.set(Counted(drops.clone()));
		slot.set(Counted(drops.clone()));
		assert_eq!(drops.get(), 1);
	}

	#[test]
	fn stopped_loop_hands_back_queued_frame() {
		let frames = FrameLoop::default();
		frames.scheduled(7);
		assert!(!frames.is_stopped());
		assert_eq!(frames.stop(), Some(7));
		assert!(frames.is_stopped());
		assert_eq!(frames.stop(), None);
	}

	#[test]
	fn fired_frame_needs_no_cancel() {
		let frames = FrameLoop::default();
		frames.scheduled(3);
		frames.fired();
		assert_eq!(frames.stop(), None);
	}
}
