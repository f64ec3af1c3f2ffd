use std::cell::Cell;

use super::display_context::DisplayContext;

/// The environment driving the frame loop (a window, or a headless runner)
pub trait FrameHost {
    /// Current drawable size in physical pixels
    fn dimensions(&self) -> DisplayContext;

    /// Ask for exactly one more frame
    fn request_redraw(&self);

    /// True once the host wants the loop to stop
    fn shutdown_requested(&self) -> bool;
}

/// Optional cap on how many frames a host lets through
#[derive(Debug, Default)]
pub struct FrameLimit {
    limit: Option<u64>,
    counted: Cell<u64>,
}

impl FrameLimit {
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            limit,
            counted: Cell::new(0),
        }
    }

    /// Note that one more frame is being produced
    pub fn count(&self) {
        self.counted.set(self.counted.get() + 1);
    }

    pub fn counted(&self) -> u64 {
        self.counted.get()
    }

    pub fn reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.counted.get() >= limit)
    }
}
