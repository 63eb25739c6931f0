//! Error types for spam-rs

use thiserror::Error;

/// Result type alias for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Error, Debug)]
pub enum FilterError {
    /// Training manifest missing, empty or malformed
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Prediction requested before any successful training
    #[error("Model has not been trained")]
    NotTrained,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FilterError::Corpus("manifest is empty".to_string()).to_string(),
            "Corpus error: manifest is empty"
        );
        assert_eq!(FilterError::NotTrained.to_string(), "Model has not been trained");
        assert_eq!(
            FilterError::Config("bad laplace".to_string()).to_string(),
            "Configuration error: bad laplace"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let err: FilterError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, FilterError::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
