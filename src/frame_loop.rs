use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::camera::CameraState;
use crate::core::{ClearState, DrawTarget, FrameHost};
use crate::frame::FrameInfo;
use crate::scene::{FrameContext, SceneGraph};
use crate::sketches::Sketch;

/// What the loop does after a frame has been produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A follow-up frame was requested from the host
    Continue,
    /// The host asked to stop; no further frame was requested
    Shutdown,
}

/// Drives one sketch: clear, derive camera matrices, update and draw every
/// drawable in insertion order, then schedule the next frame.
pub struct FrameLoop {
    name: String,
    camera: Option<CameraState>,
    clear: ClearState,
    scene: SceneGraph,
    frames_rendered: u64,
}

impl FrameLoop {
    pub fn new(
        name: impl Into<String>,
        camera: Option<CameraState>,
        clear: ClearState,
        scene: SceneGraph,
    ) -> Self {
        Self {
            name: name.into(),
            camera,
            clear,
            scene,
            frames_rendered: 0,
        }
    }

    /// Build a sketch's scene with a seeded RNG and wrap it in a loop
    pub fn from_sketch(sketch: &dyn Sketch, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = sketch.build(&mut rng);

        log::info!(
            "Sketch '{}' ready: {} drawables, {} vertices (seed {})",
            sketch.name(),
            scene.len(),
            scene.vertex_count(),
            seed
        );

        Self::new(sketch.name(), sketch.camera(), sketch.clear_state(), scene)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn clear_state(&self) -> &ClearState {
        &self.clear
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Frame context for the given time and aspect ratio
    pub fn context(&self, frame: &FrameInfo, aspect: f32) -> FrameContext {
        FrameContext {
            time: frame.time,
            frame: frame.number,
            aspect,
            camera: self.camera.map(|c| c.matrices(aspect)),
        }
    }

    /// Produce exactly one frame, then request the next one unless the host
    /// is shutting down. Render errors are logged and do not stop the loop.
    pub fn frame(
        &mut self,
        frame: &FrameInfo,
        target: &mut dyn DrawTarget,
        host: &dyn FrameHost,
    ) -> FrameStatus {
        let context = self.context(frame, host.dimensions().aspect());

        target.begin_frame(&self.clear);
        for (id, drawable) in self.scene.iter_mut() {
            drawable.update(frame.time, &context);
            target.draw(id, drawable.geometry(), drawable.uniforms());
        }
        if let Err(e) = target.finish_frame() {
            log::error!("Render error: {:#}", e);
        }
        self.frames_rendered += 1;

        if host.shutdown_requested() {
            log::info!("Stopping '{}' after {} frames", self.name, self.frames_rendered);
            FrameStatus::Shutdown
        } else {
            host.request_redraw();
            FrameStatus::Continue
        }
    }
}
