use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::{ensure_parent_dir, flatten_premul_over_bg_to_opaque_rgba8, is_ffmpeg_on_path};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{TestCardError, TestCardResult};

struct Running {
    config: SinkConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

/// Pipes raw RGBA into the system `ffmpeg` and encodes H.264 (yuv420p) MP4.
pub struct FfmpegSink {
    out_path: PathBuf,
    bg_rgba: [u8; 4],
    overwrite: bool,
    running: Option<Running>,
    written: u64,
}

impl FfmpegSink {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            bg_rgba: [0, 0, 0, 255],
            overwrite: true,
            running: None,
            written: 0,
        }
    }

    /// Colour that translucent pixels are flattened over. Defaults to opaque black.
    pub fn with_background(mut self, bg_rgba: [u8; 4]) -> Self {
        self.bg_rgba = bg_rgba;
        self
    }

    /// When false, `begin` refuses to replace an existing output file.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    fn validate(&self, config: &SinkConfig) -> TestCardResult<()> {
        config.validate()?;
        if !config.width.is_multiple_of(2) || !config.height.is_multiple_of(2) {
            return Err(TestCardError::invalid_argument(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if !self.overwrite && self.out_path.exists() {
            return Err(TestCardError::invalid_argument(format!(
                "output file '{}' already exists",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    fn spawn(&self, config: &SinkConfig) -> TestCardResult<(Child, ChildStdin)> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", config.width, config.height),
            "-r",
            &config.fps.get().to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            TestCardError::resource(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TestCardError::resource("failed to open ffmpeg stdin"));
        };
        Ok((child, stdin))
    }

    fn write_scratch(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        let bg = self.bg_rgba;
        let Some(run) = self.running.as_mut() else {
            return Err(TestCardError::encoding("ffmpeg sink is not running"));
        };
        run.config.check_frame(frame)?;
        flatten_premul_over_bg_to_opaque_rgba8(
            &mut run.scratch,
            &frame.data,
            frame.premultiplied,
            bg,
        )?;

        let Some(stdin) = run.stdin.as_mut() else {
            return Err(TestCardError::encoding("ffmpeg sink is already finalized"));
        };
        for _ in 0..n {
            stdin.write_all(&run.scratch).map_err(|e| {
                TestCardError::encoding(format!("failed to write frame to ffmpeg stdin: {e}"))
            })?;
            self.written += 1;
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip(self), fields(out = %self.out_path.display()))]
    fn begin(&mut self, config: SinkConfig) -> TestCardResult<()> {
        if self.running.is_some() {
            return Err(TestCardError::encoding("ffmpeg sink already started"));
        }
        self.validate(&config)?;
        ensure_parent_dir(&self.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(TestCardError::resource(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }
        let (child, stdin) = self.spawn(&config)?;
        self.running = Some(Running {
            scratch: vec![0u8; (config.width as usize) * (config.height as usize) * 4],
            config,
            child,
            stdin: Some(stdin),
        });
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> TestCardResult<()> {
        self.write_scratch(frame, 1)
    }

    fn push_repeated(&mut self, frame: &FrameRGBA, n: u32) -> TestCardResult<()> {
        if n == 0 {
            return Err(TestCardError::invalid_argument("repeat count must be >= 1"));
        }
        self.write_scratch(frame, n)
    }

    fn end(&mut self) -> TestCardResult<()> {
        let Some(mut run) = self.running.take() else {
            return Ok(());
        };
        drop(run.stdin.take());

        let output = run.child.wait_with_output().map_err(|e| {
            TestCardError::encoding(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TestCardError::encoding(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        tracing::info!(
            frames = self.written,
            out = %self.out_path.display(),
            "ffmpeg finished"
        );
        Ok(())
    }

    fn frames_written(&self) -> u64 {
        self.written
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(mut run) = self.running.take() {
            tracing::warn!("ffmpeg sink dropped without end, killing encoder");
            drop(run.stdin.take());
            let _ = run.child.kill();
            let _ = run.child.wait();
        }
    }
}
