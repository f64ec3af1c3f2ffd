use std::cell::Cell;
use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::core::{DisplayContext, FrameHost, FrameLimit};

/// Wrapper around a winit window that hosts the frame loop
pub struct Window {
    inner: Arc<WinitWindow>,
    limit: FrameLimit,
    closing: Cell<bool>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>, frame_limit: Option<u64>) -> Self {
        Self {
            inner: window,
            limit: FrameLimit::new(frame_limit),
            closing: Cell::new(false),
        }
    }

    /// Called once per `RedrawRequested`, before the frame is produced
    pub fn count_frame(&self) {
        self.limit.count();
    }

    pub fn frames_counted(&self) -> u64 {
        self.limit.counted()
    }

    /// Stop scheduling frames; the current one still completes
    pub fn close(&self) {
        self.closing.set(true);
    }
}

impl FrameHost for Window {
    fn dimensions(&self) -> DisplayContext {
        let size = self.inner.inner_size();
        DisplayContext::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn shutdown_requested(&self) -> bool {
        self.closing.get() || self.limit.reached()
    }
}
