use crate::foundation::core::{Fps, FrameRGBA};
use crate::foundation::error::{TestCardError, TestCardResult};

/// Raster size and rate of the frames a sink is about to receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

impl SinkConfig {
    pub fn validate(&self) -> TestCardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TestCardError::invalid_argument("sink width/height must be non-zero"));
        }
        Ok(())
    }

    pub(crate) fn check_frame(&self, frame: &FrameRGBA) -> TestCardResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(TestCardError::invalid_argument(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != (self.width as usize) * (self.height as usize) * 4 {
            return Err(TestCardError::invalid_argument(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

/// Destination for a run's frames, acquired by `begin` and released by `end`.
pub trait FrameSink {
    fn begin(&mut self, config: SinkConfig) -> TestCardResult<()>;

    fn push_frame(&mut self, frame: &FrameRGBA) -> TestCardResult<()>;

    /// Write the same frame `n` times. Implementations may reuse encoded bytes.
    fn push_repeated(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        if n == 0 {
            return Err(TestCardError::invalid_argument("repeat count must be >= 1"));
        }
        for _ in 0..n {
            self.push_frame(frame)?;
        }
        Ok(())
    }

    /// Flush and release. Called once per run, also after a failed frame.
    fn end(&mut self) -> TestCardResult<()>;

    fn frames_written(&self) -> u64;
}

/// Keeps every frame in memory as `(frame, repeat)` runs.
#[derive(Debug, Default)]
pub struct InMemorySink {
    config: Option<SinkConfig>,
    runs: Vec<(FrameRGBA, u32)>,
    written: u64,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.config
    }

    pub fn runs(&self) -> &[(FrameRGBA, u32)] {
        &self.runs
    }

    /// Every written frame in order, repeats expanded.
    pub fn frames(&self) -> impl Iterator<Item = &FrameRGBA> + '_ {
        self.runs
            .iter()
            .flat_map(|(frame, n)| std::iter::repeat_n(frame, *n as usize))
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn push_run(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        let Some(config) = self.config else {
            return Err(TestCardError::encoding("sink received a frame before begin"));
        };
        if self.ended {
            return Err(TestCardError::encoding("sink is already ended"));
        }
        config.check_frame(frame)?;
        self.runs.push((frame.clone(), n));
        self.written += u64::from(n);
        Ok(())
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, config: SinkConfig) -> TestCardResult<()> {
        config.validate()?;
        self.config = Some(config);
        self.runs.clear();
        self.written = 0;
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> TestCardResult<()> {
        self.push_run(frame, 1)
    }

    fn push_repeated(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        if n == 0 {
            return Err(TestCardError::invalid_argument("repeat count must be >= 1"));
        }
        self.push_run(frame, n)
    }

    fn end(&mut self) -> TestCardResult<()> {
        self.ended = true;
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.written
    }
}
