//! Frame scheduling.
//!
//! A [`FrameScheduler`] defers a callback until just before the next
//! repaint. [`FrameQueue`] is driven by the host, either manually with
//! [`FrameQueue::run_frame`] or from a [`FrameLoop`] thread.

mod frame_loop;
mod scheduler;

pub use frame_loop::FrameLoop;
pub use scheduler::{FrameCallback, FrameQueue, FrameScheduler};
