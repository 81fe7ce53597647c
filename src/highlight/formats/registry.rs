//! Format registry for token stream serialization
//!
//! This module provides a pluggable registry system for output formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::highlight::config::HighlightConfig;
use crate::highlight::error::FormatError;
use crate::highlight::token::TokenStream;
use std::collections::HashMap;

/// Trait for token stream formatters
///
/// Implementors turn the tokens of one code block into a string representation.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "html", "token-json")
    fn name(&self) -> &str;

    /// Serialize a token stream to this format
    fn serialize(&self, tokens: &TokenStream, config: &HighlightConfig)
        -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of token stream formatters
///
/// Formats can be registered and retrieved by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize tokens using the specified format
    pub fn serialize(
        &self,
        tokens: &TokenStream,
        format: &str,
        config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tokens, config)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::HtmlFormatter);
        registry.register(super::AnsiFormatter);
        registry.register(super::TokenJsonFormatter);
        registry.register(super::TokenYamlFormatter);
        registry.register(super::TokenSimpleFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
