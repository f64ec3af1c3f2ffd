use crate::geometry::Geometry;
use crate::scene::DrawableId;
use crate::uniforms::Uniforms;

/// Fixed-function state applied when a frame starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearState {
    /// RGBA clear color
    pub color: [f64; 4],
    /// Clear and test against the depth buffer
    pub depth_test: bool,
    pub cull_back_faces: bool,
}

impl ClearState {
    /// Opaque black, depth tested, back faces culled
    pub const fn scene_3d() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 1.0],
            depth_test: true,
            cull_back_faces: true,
        }
    }

    /// Transparent black, no depth, no culling
    pub const fn flat_2d() -> Self {
        Self {
            color: [0.0, 0.0, 0.0, 0.0],
            depth_test: false,
            cull_back_faces: false,
        }
    }

    pub fn wgpu_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.color[0],
            g: self.color[1],
            b: self.color[2],
            a: self.color[3],
        }
    }
}

impl Default for ClearState {
    fn default() -> Self {
        Self::scene_3d()
    }
}

/// Receives the clear and the ordered draw calls of one frame
pub trait DrawTarget {
    /// Start a frame by clearing color (and depth when enabled)
    fn begin_frame(&mut self, clear: &ClearState);

    /// Queue one draw call
    fn draw(&mut self, id: DrawableId, geometry: &Geometry, uniforms: &Uniforms);

    /// Submit everything queued since `begin_frame`
    fn finish_frame(&mut self) -> anyhow::Result<()>;
}

/// A draw call captured by [`RecordingTarget`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub id: DrawableId,
    pub vertex_count: u32,
    pub uniforms: Uniforms,
}

/// Draw target that keeps the last frame in memory instead of touching a GPU
#[derive(Debug, Default)]
pub struct RecordingTarget {
    clear: Option<ClearState>,
    pending: Vec<RecordedDraw>,
    last_frame: Vec<RecordedDraw>,
    frames_finished: u64,
    draws_total: u64,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the most recently finished frame, in submission order
    pub fn last_frame(&self) -> &[RecordedDraw] {
        &self.last_frame
    }

    pub fn last_clear(&self) -> Option<&ClearState> {
        self.clear.as_ref()
    }

    pub fn frames_finished(&self) -> u64 {
        self.frames_finished
    }

    pub fn draws_total(&self) -> u64 {
        self.draws_total
    }
}

impl DrawTarget for RecordingTarget {
    fn begin_frame(&mut self, clear: &ClearState) {
        self.clear = Some(*clear);
        self.pending.clear();
    }

    fn draw(&mut self, id: DrawableId, geometry: &Geometry, uniforms: &Uniforms) {
        self.pending.push(RecordedDraw {
            id,
            vertex_count: geometry.vertex_count(),
            uniforms: uniforms.clone(),
        });
    }

    fn finish_frame(&mut self) -> anyhow::Result<()> {
        self.draws_total += self.pending.len() as u64;
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_finished += 1;
        Ok(())
    }
}
