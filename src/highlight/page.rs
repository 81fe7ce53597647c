//! Page pass: find the code blocks of an HTML page and replace their bodies with highlighted
//! markup.
//!
//! A block is an `<{element}>` whose `class` attribute contains the configured class, by
//! default `<code class="language-rust">`. The body is read back through
//! [inner_text](crate::highlight::escape::inner_text), so a block that was already highlighted
//! yields its original source again and renders to the same markup. Running the pass twice
//! gives the same page.

use crate::highlight::config::HighlightConfig;
use crate::highlight::error::PageError;
use crate::highlight::escape::inner_text;
use crate::highlight::folding::fold_with;
use crate::highlight::lexing::tokenize;
use crate::highlight::token::TokenStream;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid class attribute pattern")
});

/// One code block: the displayable source text it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    source: String,
}

impl CodeBlock {
    pub fn new(source: impl Into<String>) -> Self {
        CodeBlock {
            source: source.into(),
        }
    }

    /// Read a block from the markup inside its element.
    pub fn from_markup(markup: &str) -> Self {
        CodeBlock::new(inner_text(markup))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> TokenStream {
        tokenize(&self.source)
    }

    /// Render from the stored source; never from previously rendered markup.
    pub fn render(&self, config: &HighlightConfig) -> String {
        fold_with(&self.tokens(), config)
    }
}

pub struct PageHighlighter {
    pattern: Regex,
    config: HighlightConfig,
}

impl PageHighlighter {
    pub fn new(config: &HighlightConfig) -> Result<Self, PageError> {
        let element = config.page.element.as_str();
        let valid = !element.is_empty()
            && element
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(PageError::InvalidElement(element.to_string()));
        }
        let pattern = Regex::new(&format!(
            r"(?is)<({el})(\s[^>]*)?>(.*?)(</{el}\s*>)",
            el = regex::escape(element)
        ))?;
        Ok(PageHighlighter {
            pattern,
            config: config.clone(),
        })
    }

    fn is_code_block(&self, attributes: &str) -> bool {
        CLASS_ATTR.captures_iter(attributes).any(|caps| {
            let value = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());
            value
                .split_whitespace()
                .any(|class| class == self.config.page.class)
        })
    }

    /// The code blocks of a page, in document order.
    pub fn code_blocks(&self, html: &str) -> Vec<CodeBlock> {
        self.pattern
            .captures_iter(html)
            .filter(|caps| self.is_code_block(caps.get(2).map_or("", |m| m.as_str())))
            .map(|caps| CodeBlock::from_markup(&caps[3]))
            .collect()
    }

    /// Rewrite every code block of `html` with highlighted markup. Everything outside the
    /// blocks is kept byte for byte.
    pub fn highlight_page(&self, html: &str) -> String {
        let mut count = 0usize;
        let page = self.pattern.replace_all(html, |caps: &Captures| {
            let attributes = caps.get(2).map_or("", |m| m.as_str());
            if !self.is_code_block(attributes) {
                return caps[0].to_string();
            }
            count += 1;
            let block = CodeBlock::from_markup(&caps[3]);
            format!(
                "<{}{}>{}{}",
                &caps[1],
                attributes,
                block.render(&self.config),
                &caps[4]
            )
        });
        log::debug!("highlighted {count} code blocks");
        page.into_owned()
    }
}
