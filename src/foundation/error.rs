pub type TestCardResult<T> = Result<T, TestCardError>;

#[derive(thiserror::Error, Debug)]
pub enum TestCardError {
    #[error("invalid colour spec: {0}")]
    InvalidColourSpec(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("resource acquisition failed: {0}")]
    ResourceAcquisition(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    /// A drawing error raised while painting one named layer of a card.
    #[error("layer '{layer}': {source}")]
    Layer {
        layer: &'static str,
        source: Box<TestCardError>,
    },

    /// A per-frame failure, carrying the output frame index and displayed time.
    #[error("frame {frame} (t={seconds:.3}s): {source}")]
    Frame {
        frame: u64,
        seconds: f64,
        source: Box<TestCardError>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TestCardError {
    pub fn colour_spec(msg: impl Into<String>) -> Self {
        Self::InvalidColourSpec(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn resource(msg: impl Into<String>) -> Self {
        Self::ResourceAcquisition(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn in_layer(self, layer: &'static str) -> Self {
        Self::Layer {
            layer,
            source: Box::new(self),
        }
    }

    pub fn at_frame(self, frame: u64, seconds: f64) -> Self {
        Self::Frame {
            frame,
            seconds,
            source: Box::new(self),
        }
    }

    /// Strip layer and frame context, returning the error that started it.
    pub fn innermost(&self) -> &TestCardError {
        match self {
            Self::Layer { source, .. } | Self::Frame { source, .. } => source.innermost(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TestCardError::colour_spec("x")
                .to_string()
                .contains("invalid colour spec:")
        );
        assert!(
            TestCardError::invalid_argument("x")
                .to_string()
                .contains("invalid argument:")
        );
        assert!(
            TestCardError::resource("x")
                .to_string()
                .contains("resource acquisition failed:")
        );
        assert!(
            TestCardError::encoding("x")
                .to_string()
                .contains("encoding error:")
        );
    }

    #[test]
    fn context_wraps_and_unwraps() {
        let err = TestCardError::invalid_argument("fps")
            .in_layer("slicer_upper")
            .at_frame(12, 3.5);
        let msg = err.to_string();
        assert!(msg.starts_with("frame 12 (t=3.500s):"));
        assert!(msg.contains("layer 'slicer_upper'"));
        assert!(matches!(
            err.innermost(),
            TestCardError::InvalidArgument(m) if m == "fps"
        ));
    }

    #[test]
    fn anyhow_converts_into_other() {
        let err: TestCardError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, TestCardError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
