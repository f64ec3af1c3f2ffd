pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod frame_loop;
pub mod geometry;
pub mod headless;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod sketches;
pub mod types;
pub mod uniforms;
pub mod window;

pub use frame_loop::{FrameLoop, FrameStatus};
pub use scene::{Animate, Drawable, DrawableId, FrameContext, SceneGraph};
pub use sketches::{Sketch, SketchKind};
