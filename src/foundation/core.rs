use crate::foundation::error::{TestCardError, TestCardResult};
use crate::foundation::math::Fnv1a64;

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Absolute 0-based index of a frame in the output stream.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Whole frames per second. Every timing rule here works in integral frame rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Fps(u32);

impl Fps {
    pub const DEFAULT: Fps = Fps(30);

    /// Create a validated frame rate (must be > 0).
    pub fn new(frames_per_second: u32) -> TestCardResult<Self> {
        if frames_per_second == 0 {
            return Err(TestCardError::invalid_argument("frame rate must be > 0"));
        }
        Ok(Self(frames_per_second))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        frames as f64 / self.as_f64()
    }

    /// Whole seconds elapsed at `frame`.
    pub fn whole_secs(self, frame: u64) -> u64 {
        frame / u64::from(self.0)
    }

    /// Position of `frame` inside its second, in `0..fps`.
    pub fn frame_in_second(self, frame: u64) -> u32 {
        (frame % u64::from(self.0)) as u32
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Fps {
    type Error = TestCardError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fps> for u32 {
    fn from(value: Fps) -> Self {
        value.0
    }
}

/// One rendered frame, RGBA8 row-major with no row padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// True when colour channels are already multiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Stable 64-bit digest of dimensions and pixel bytes.
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.width));
        h.write_u64(u64::from(self.height));
        h.write_bytes(&self.data);
        h.finish()
    }
}
