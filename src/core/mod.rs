pub mod display_context;
pub mod draw_target;
pub mod gpu_context;
pub mod host;

pub use display_context::DisplayContext;
pub use draw_target::{ClearState, DrawTarget, RecordedDraw, RecordingTarget};
pub use gpu_context::GpuContext;
pub use host::{FrameHost, FrameLimit};
