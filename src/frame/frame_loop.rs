use super::scheduler::FrameQueue;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Drives a [`FrameQueue`] from a background thread at a fixed interval.
///
/// The loop stops when [`FrameLoop::stop`] is called or the handle is dropped.
pub struct FrameLoop {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Roughly 60 frames per second.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(16_667);

    pub fn spawn(queue: Arc<FrameQueue>) -> std::io::Result<Self> {
        Self::with_interval(queue, Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(queue: Arc<FrameQueue>, interval: Duration) -> std::io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("lantern-frames".to_string())
            .spawn(move || {
                log::debug!("Frame loop started ({:?} per frame)", interval);
                while flag.load(Ordering::Acquire) {
                    queue.run_frame();
                    thread::sleep(interval);
                }
                log::debug!("Frame loop stopped");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the loop and wait for the current frame to finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Frame loop thread panicked");
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
