//! Broadcast test cards and countdown-clock animations, rendered frame-accurately.
//!
//! Layouts draw through the [`Surface`] trait in reference coordinates. A
//! [`CpuCanvas`] rasterizes them; a [`RecordingSurface`] keeps the display list for
//! inspection. The [`driver`] turns a time axis into frames written to a [`FrameSink`].
#![forbid(unsafe_code)]

mod foundation;

pub mod cards;
pub mod clock;
pub mod colour;
pub mod compose;
pub mod driver;
pub mod encode;
pub mod layout;
pub mod render;
pub mod scene;
pub mod surface;

pub use crate::foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRGBA, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{TestCardError, TestCardResult};

pub use crate::cards::{SlicerTiming, TestCard, UhdLayer};
pub use crate::colour::{Colour, Gradient};
pub use crate::driver::{FrameCounter, RunStats, Schedule, Strategy, Tick, TimeAxis};
pub use crate::encode::{FfmpegSink, FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::layout::Resolution;
pub use crate::render::{CpuCanvas, DrawCommand, RecordingSurface};
pub use crate::scene::{CountdownStrategy, Scene, SceneSpec, compose_frame, render_scene};
pub use crate::surface::{FontSpec, LineCap, SavedState, Surface, scoped};
