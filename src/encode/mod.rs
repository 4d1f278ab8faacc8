//! Frame sinks: where composed frames go.

use std::path::Path;

use crate::foundation::error::{TestCardError, TestCardResult};
use crate::foundation::math::mul_div255_u16;

pub mod ffmpeg;
pub mod png;
pub mod sink;

pub use ffmpeg::FfmpegSink;
pub use png::{PngSequenceSink, write_png};
pub use sink::{FrameSink, InMemorySink, SinkConfig};

pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> TestCardResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Composite RGBA8 pixels over an opaque background.
///
/// `dst` receives straight RGBA with alpha 255 everywhere.
pub fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> TestCardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TestCardError::invalid_argument("flatten expects equal-length rgba8 buffers"));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255_u16(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_premul_over_black_produces_expected_rgb() {
        let src = vec![128u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
        assert_eq!(dst, vec![128, 0, 0, 255]);
    }

    #[test]
    fn flatten_straight_over_white() {
        let src = vec![0u8, 0, 0, 128];
        let mut dst = vec![0u8; 4];
        flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, false, [255, 255, 255, 255])
            .unwrap();
        assert_eq!(dst, vec![127, 127, 127, 255]);
    }

    #[test]
    fn flatten_rejects_mismatched_buffers() {
        let mut dst = vec![0u8; 8];
        assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0; 4], true, [0; 4]).is_err());
    }
}
