//! Configuration loader.
//!
//! `defaults/rustlight.default.yaml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files and single-key overrides on
//! top of those defaults via [`Loader`] before deserializing into [`HighlightConfig`].

use crate::highlight::error::ConfigError;
use crate::highlight::token::Colour;
use serde::{Deserialize, Serialize};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use std::path::Path;

const DEFAULT_YAML: &str = include_str!("../../defaults/rustlight.default.yaml");

/// Top-level configuration consumed by the renderers and the page pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    pub render: RenderConfig,
    pub palette: Palette,
    pub page: PageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    pub markup: Markup,
    pub class_prefix: String,
}

/// How a rendered span carries its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Markup {
    /// `class="hl-keyword"`, styled by an external stylesheet
    Class,
    /// `style="color: #cf6a00;"` from the palette
    Inline,
}

/// Hex colour (`#rrggbb`) per display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    pub orange: String,
    pub green: String,
    pub cyan: String,
    pub purple: String,
    pub yellow: String,
    pub blue: String,
    pub grey: String,
}

/// Which elements of a page hold code blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    pub element: String,
    pub class: String,
}

impl Palette {
    /// Hex value for a colour; `None` for [Colour::None].
    pub fn hex(&self, colour: Colour) -> Option<&str> {
        let hex = match colour {
            Colour::None => return None,
            Colour::Orange => &self.orange,
            Colour::Green => &self.green,
            Colour::Cyan => &self.cyan,
            Colour::Purple => &self.purple,
            Colour::Yellow => &self.yellow,
            Colour::Blue => &self.blue,
            Colour::Grey => &self.grey,
        };
        Some(hex.as_str())
    }

    pub fn rgb(&self, colour: Colour) -> Option<(u8, u8, u8)> {
        self.hex(colour).and_then(parse_hex)
    }

    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("orange", &self.orange),
            ("green", &self.green),
            ("cyan", &self.cyan),
            ("purple", &self.purple),
            ("yellow", &self.yellow),
            ("blue", &self.blue),
            ("grey", &self.grey),
        ]
    }
}

impl HighlightConfig {
    /// Reject palette entries that are not `#rrggbb`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.palette.entries() {
            if parse_hex(value).is_none() {
                return Err(ConfigError::InvalidColour {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            render: RenderConfig {
                markup: Markup::Class,
                class_prefix: "hl-".to_string(),
            },
            palette: Palette {
                orange: "#cf6a00".to_string(),
                green: "#116329".to_string(),
                cyan: "#0598bc".to_string(),
                purple: "#8250df".to_string(),
                yellow: "#9a6700".to_string(),
                blue: "#0550ae".to_string(),
                grey: "#6e7781".to_string(),
            },
            page: PageConfig {
                element: "code".to_string(),
                class: "language-rust".to_string(),
            },
        }
    }
}

/// Parse `#rrggbb`.
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_YAML, FileFormat::Yaml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        log::debug!("layering config file {}", path.as_ref().display());
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Yaml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single dotted-key override (`render.markup`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Apply a `key=value` override as given on a command line. The value is kept as a
    /// string; typed fields are converted when the configuration is deserialized.
    pub fn set_override_str(self, assignment: &str) -> Result<Self, ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidKey(assignment.to_string()))?;
        self.set_override(key.trim(), value.to_string())
    }

    /// Finalize the builder, deserialize the resulting configuration and validate it.
    pub fn build(self) -> Result<HighlightConfig, ConfigError> {
        let config: HighlightConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<HighlightConfig, ConfigError> {
    Loader::new().build()
}
