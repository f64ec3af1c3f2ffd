use std::cell::Cell;

use crate::core::{DisplayContext, FrameHost, FrameLimit, RecordingTarget};
use crate::frame::FrameClock;
use crate::frame_loop::{FrameLoop, FrameStatus};

/// Simulated refresh rate of the headless host
pub const HEADLESS_FPS: f32 = 60.0;

/// Host without a window: fixed size, fixed time step, optional frame cap
pub struct HeadlessHost {
    dims: DisplayContext,
    limit: FrameLimit,
    redraw_pending: Cell<bool>,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32, frame_limit: Option<u64>) -> Self {
        Self {
            dims: DisplayContext::new(width, height),
            limit: FrameLimit::new(frame_limit),
            redraw_pending: Cell::new(true),
        }
    }

    /// Consume the pending redraw request, if any
    fn take_redraw(&self) -> bool {
        self.redraw_pending.replace(false)
    }
}

impl FrameHost for HeadlessHost {
    fn dimensions(&self) -> DisplayContext {
        self.dims
    }

    fn request_redraw(&self) {
        self.redraw_pending.set(true);
    }

    fn shutdown_requested(&self) -> bool {
        self.limit.reached()
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub draws: u64,
    pub last_frame_draws: usize,
    pub simulated_seconds: f32,
}

/// Run the loop against a [`RecordingTarget`] until the host stops it.
///
/// Time advances by exactly `1 / HEADLESS_FPS` per frame, so a run is fully
/// reproducible for a given seed.
pub fn run_headless(frame_loop: &mut FrameLoop, host: &HeadlessHost) -> (HeadlessSummary, RecordingTarget) {
    let mut target = RecordingTarget::new();
    let mut clock = FrameClock::fixed_step(1.0 / HEADLESS_FPS);
    let mut simulated_seconds = 0.0;

    while host.take_redraw() {
        let Some(frame) = clock.next() else {
            break;
        };
        host.limit.count();
        simulated_seconds = frame.time;

        if frame_loop.frame(&frame, &mut target, host) == FrameStatus::Shutdown {
            break;
        }
    }

    let summary = HeadlessSummary {
        frames: target.frames_finished(),
        draws: target.draws_total(),
        last_frame_draws: target.last_frame().len(),
        simulated_seconds,
    };

    log::info!(
        "Headless run of '{}': {} frames, {} draw calls, {:.2}s simulated",
        frame_loop.name(),
        summary.frames,
        summary.draws,
        summary.simulated_seconds
    );

    (summary, target)
}
