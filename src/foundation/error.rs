pub type StillreelResult<T> = Result<T, StillreelError>;

#[derive(thiserror::Error, Debug)]
pub enum StillreelError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StillreelError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
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
            StillreelError::not_found("x")
                .to_string()
                .contains("not found:")
        );
        assert!(
            StillreelError::empty_input("x")
                .to_string()
                .contains("empty input:")
        );
        assert!(
            StillreelError::invalid_config("x")
                .to_string()
                .contains("invalid config:")
        );
        assert!(
            StillreelError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            StillreelError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StillreelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
