use crate::camera::CameraMatrices;
use crate::geometry::Geometry;
use crate::uniforms::Uniforms;

/// Everything a drawable may read while computing its uniforms for a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the loop started
    pub time: f32,
    pub frame: u64,
    /// Viewport width / height
    pub aspect: f32,
    /// `None` for sketches that draw straight into clip space
    pub camera: Option<CameraMatrices>,
}

impl FrameContext {
    /// View-projection matrix, or identity when there is no camera
    pub fn view_projection(&self) -> glam::Mat4 {
        self.camera
            .map(|c| c.view_projection)
            .unwrap_or(glam::Mat4::IDENTITY)
    }
}

/// Per-frame behaviour of a drawable.
///
/// `update` must be a pure function of the implementor's own fields, the
/// frame context and `time`. It never sees other drawables.
pub trait Animate {
    fn update(&self, time: f32, frame: &FrameContext) -> Uniforms;

    fn name(&self) -> &str {
        "Drawable"
    }
}

/// Position of a drawable in its scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(pub usize);

/// Geometry plus the uniforms it is drawn with and the logic that refreshes them
pub struct Drawable {
    geometry: Geometry,
    uniforms: Uniforms,
    logic: Box<dyn Animate>,
}

impl Drawable {
    pub fn new(geometry: Geometry, logic: impl Animate + 'static) -> Self {
        Self {
            geometry,
            uniforms: Uniforms::new(),
            logic: Box::new(logic),
        }
    }

    /// Seed the uniform mapping used before the first update
    pub fn with_uniforms(mut self, uniforms: Uniforms) -> Self {
        self.uniforms = uniforms;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn name(&self) -> &str {
        self.logic.name()
    }

    /// Recompute this drawable's uniforms for `time`
    pub fn update(&mut self, time: f32, frame: &FrameContext) {
        self.uniforms = self.logic.update(time, frame);
    }
}

impl std::fmt::Debug for Drawable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drawable")
            .field("name", &self.name())
            .field("vertices", &self.geometry.vertex_count())
            .field("topology", &self.geometry.topology())
            .finish()
    }
}

/// Ordered list of drawables. Iteration order is insertion order.
#[derive(Debug, Default)]
pub struct SceneGraph {
    drawables: Vec<Drawable>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        self.drawables.push(drawable);
        DrawableId(self.drawables.len() - 1)
    }

    /// Builder-style add
    pub fn with(mut self, drawable: Drawable) -> Self {
        self.add(drawable);
        self
    }

    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.drawables.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.drawables
            .iter()
            .enumerate()
            .map(|(i, d)| (DrawableId(i), d))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (DrawableId, &mut Drawable)> {
        self.drawables
            .iter_mut()
            .enumerate()
            .map(|(i, d)| (DrawableId(i), d))
    }

    /// Update every drawable for `time`, in order
    pub fn update(&mut self, time: f32, frame: &FrameContext) {
        for drawable in &mut self.drawables {
            drawable.update(time, frame);
        }
    }

    /// Total vertices across all drawables
    pub fn vertex_count(&self) -> u64 {
        self.drawables
            .iter()
            .map(|d| d.geometry.vertex_count() as u64)
            .sum()
    }
}
