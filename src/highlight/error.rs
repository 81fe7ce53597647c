//! Error types for the fallible edges of the crate.
//!
//! Lexing and folding never fail. Errors only come from loading configuration, looking up an
//! output format and preparing the page pass.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading, merging or deserializing the layered sources failed
    #[error("invalid config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid override key '{0}'")]
    InvalidKey(String),

    #[error("invalid colour '{value}' for palette entry '{name}'")]
    InvalidColour { name: String, value: String },
}

#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    /// Error during serialization
    #[error("serialization error: {0}")]
    SerializationError(String),
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid code block element name '{0}'")]
    InvalidElement(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FormatError::FormatNotFound("pdf".to_string()).to_string(),
            "format 'pdf' not found"
        );
        assert_eq!(
            ConfigError::InvalidColour {
                name: "green".to_string(),
                value: "#zz".to_string()
            }
            .to_string(),
            "invalid colour '#zz' for palette entry 'green'"
        );
        assert_eq!(
            PageError::InvalidElement("a b".to_string()).to_string(),
            "invalid code block element name 'a b'"
        );
    }
}
