pub type FramepressResult<T> = Result<T, FramepressError>;

#[derive(thiserror::Error, Debug)]
pub enum FramepressError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramepressError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FramepressError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            FramepressError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            FramepressError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FramepressError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
