//! Token dumps for inspecting lexer output.

use super::registry::Formatter;
use crate::highlight::config::HighlightConfig;
use crate::highlight::error::FormatError;
use crate::highlight::token::TokenStream;

/// One `KIND "text"` line per token.
pub fn to_simple(tokens: &TokenStream) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!("{} {:?}\n", token.kind, token.text));
    }
    out
}

pub struct TokenJsonFormatter;

impl Formatter for TokenJsonFormatter {
    fn name(&self) -> &str {
        "token-json"
    }

    fn serialize(
        &self,
        tokens: &TokenStream,
        _config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tokens)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Token stream as a JSON array of {kind, text}"
    }
}

pub struct TokenYamlFormatter;

impl Formatter for TokenYamlFormatter {
    fn name(&self) -> &str {
        "token-yaml"
    }

    fn serialize(
        &self,
        tokens: &TokenStream,
        _config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        serde_yaml::to_string(tokens).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Token stream as a YAML sequence of {kind, text}"
    }
}

pub struct TokenSimpleFormatter;

impl Formatter for TokenSimpleFormatter {
    fn name(&self) -> &str {
        "token-simple"
    }

    fn serialize(
        &self,
        tokens: &TokenStream,
        _config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        Ok(to_simple(tokens))
    }

    fn description(&self) -> &str {
        "One KIND \"text\" line per token"
    }
}
