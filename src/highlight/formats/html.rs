//! HTML fragment output, the format the page pass writes back into code blocks.

use super::registry::Formatter;
use crate::highlight::config::HighlightConfig;
use crate::highlight::error::FormatError;
use crate::highlight::folding::fold_with;
use crate::highlight::token::TokenStream;

pub struct HtmlFormatter;

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn serialize(
        &self,
        tokens: &TokenStream,
        config: &HighlightConfig,
    ) -> Result<String, FormatError> {
        Ok(fold_with(tokens, config))
    }

    fn description(&self) -> &str {
        "HTML fragment with one span per highlight group"
    }
}
