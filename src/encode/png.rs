use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::flatten_premul_over_bg_to_opaque_rgba8;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{TestCardError, TestCardResult};

fn encode_png(frame: &FrameRGBA, bg_rgba: [u8; 4]) -> TestCardResult<Vec<u8>> {
    let mut straight = vec![0u8; frame.data.len()];
    flatten_premul_over_bg_to_opaque_rgba8(
        &mut straight,
        &frame.data,
        frame.premultiplied,
        bg_rgba,
    )?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight).ok_or_else(|| {
        TestCardError::invalid_argument("frame.data size mismatch with width*height*4")
    })?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| TestCardError::encoding(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Write one frame as an opaque PNG (flattened over black).
pub fn write_png(frame: &FrameRGBA, path: &Path) -> TestCardResult<()> {
    crate::encode::ensure_parent_dir(path)?;
    let bytes = encode_png(frame, [0, 0, 0, 255])?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    bg_rgba: [u8; 4],
    config: Option<SinkConfig>,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bg_rgba: [0, 0, 0, 255],
            config: None,
            written: 0,
        }
    }

    /// Colour that translucent pixels are flattened over. Defaults to opaque black.
    pub fn with_background(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }

    fn write_encoded(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        let Some(config) = self.config else {
            return Err(TestCardError::encoding("png sink received a frame before begin"));
        };
        config.check_frame(frame)?;
        let bytes = encode_png(frame, self.bg_rgba)?;
        for _ in 0..n {
            let path = self.frame_path(self.written);
            std::fs::write(&path, &bytes)
                .map_err(|e| TestCardError::encoding(format!("write '{}': {e}", path.display())))?;
            self.written += 1;
        }
        Ok(())
    }
}

impl FrameSink for PngSequenceSink {
    #[tracing::instrument(skip(self), fields(dir = %self.dir.display()))]
    fn begin(&mut self, config: SinkConfig) -> TestCardResult<()> {
        config.validate()?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TestCardError::resource(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.config = Some(config);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> TestCardResult<()> {
        self.write_encoded(frame, 1)
    }

    fn push_repeated(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        if n == 0 {
            return Err(TestCardError::invalid_argument("repeat count must be >= 1"));
        }
        self.write_encoded(frame, n)
    }

    fn end(&mut self) -> TestCardResult<()> {
        if self.config.take().is_some() {
            tracing::info!(
                frames = self.written,
                dir = %self.dir.display(),
                "png sequence written"
            );
        }
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.written
    }
}
