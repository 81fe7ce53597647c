//! Output format implementations for token streams
//!
//! This module contains the formats a highlighted block can be written in:
//! - HTML fragments (class or inline-style spans), the page renderer's format
//! - ANSI-coloured text for terminals
//! - token dumps (json, yaml, simple) for inspecting lexer output

pub mod ansi;
pub mod html;
pub mod registry;
pub mod tokens;

pub use ansi::{to_ansi, AnsiFormatter};
pub use html::HtmlFormatter;
pub use registry::{FormatRegistry, Formatter};
pub use tokens::{to_simple, TokenJsonFormatter, TokenSimpleFormatter, TokenYamlFormatter};
