//! Surface backends: the vello_cpu rasterizer and a display-list recorder.

pub mod cpu;
pub mod recording;
mod text;

pub use cpu::CpuCanvas;
pub use recording::{DrawCommand, RecordingSurface};
