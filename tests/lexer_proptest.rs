//! Property-based tests for the lexer and the fold pass
//!
//! These tests ensure that any input, Rust-like or not, is tokenized without panicking,
//! that no character is lost on the way to HTML, and that the page pass is stable.

use proptest::prelude::*;
use regex::Regex;
use rustlight::highlight::keywords::is_keyword;
use rustlight::highlight::{
    escape_html, fold, inner_text, tokenize, HighlightConfig, PageHighlighter, TokenKind,
};

/// Snippets that exercise every dispatch rule, glued together at random.
fn rust_like_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z_][a-zA-Z0-9_]{0,8}",
            Just(" ".to_string()),
            Just("\n".to_string()),
            Just("::".to_string()),
            Just(": ".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("{ }".to_string()),
            Just("[]".to_string()),
            Just(".".to_string()),
            Just(";".to_string()),
            Just("&".to_string()),
            Just("->".to_string()),
            Just("'a".to_string()),
            Just("'\\''".to_string()),
            Just("\"\\\"x\"".to_string()),
            Just(" // note\n".to_string()),
            Just("println!".to_string()),
            Just("1.5".to_string()),
            Just(" == ".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn without_tags(html: &str) -> String {
    let tags = Regex::new(r"</?span[^>]*>").unwrap();
    tags.replace_all(html, "").into_owned()
}

proptest! {
    #[test]
    fn test_tokens_reproduce_source(input in "\\PC{0,80}") {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.source(), input);
    }

    #[test]
    fn test_rust_like_tokens_reproduce_source(input in rust_like_strategy()) {
        let tokens = tokenize(&input);
        prop_assert_eq!(tokens.source(), input);
    }

    #[test]
    fn test_no_empty_tokens(input in rust_like_strategy()) {
        for token in tokenize(&input).iter() {
            prop_assert!(!token.text.is_empty(), "empty {} token", token.kind);
        }
    }

    #[test]
    fn test_displayed_text_is_source(input in rust_like_strategy()) {
        let html = fold(&tokenize(&input));
        prop_assert_eq!(inner_text(&html), input);
    }

    #[test]
    fn test_arbitrary_displayed_text_is_source(input in "\\PC{0,60}") {
        let html = fold(&tokenize(&input));
        prop_assert_eq!(inner_text(&html), input);
    }

    #[test]
    fn test_text_is_escaped(input in "[a-z<>\"'& ]{0,40}") {
        let text = without_tags(&fold(&tokenize(&input)));
        prop_assert!(!text.contains(['<', '>', '"', '\'']), "raw character in {}", text);
        for (at, _) in text.match_indices('&') {
            let rest = &text[at..];
            prop_assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#039;"]
                    .iter()
                    .any(|entity| rest.starts_with(entity)),
                "bare ampersand in {}",
                text
            );
        }
    }

    #[test]
    fn test_one_span_per_string_literal(
        literals in prop::collection::vec("[a-z ]{0,6}", 1..6)
    ) {
        let source = literals
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(" + ");
        let html = fold(&tokenize(&source));
        prop_assert_eq!(html.matches("class=\"hl-string\"").count(), literals.len());
    }

    #[test]
    fn test_uppercase_call_is_construction(name in "[A-Z][a-zA-Z0-9_]{0,8}") {
        prop_assume!(!is_keyword(&name));
        let tokens = tokenize(&format!("{name}(x)"));
        prop_assert_eq!(tokens[0].kind, TokenKind::StructConstruction);
    }

    #[test]
    fn test_lowercase_call_is_method_call(name in "[a-z_][a-zA-Z0-9_]{0,8}") {
        prop_assume!(!is_keyword(&name));
        let tokens = tokenize(&format!("{name}(x)"));
        prop_assert_eq!(tokens[0].kind, TokenKind::MethodCall);
    }

    #[test]
    fn test_page_pass_is_idempotent(input in rust_like_strategy()) {
        let highlighter = PageHighlighter::new(&HighlightConfig::default()).unwrap();
        let page = format!(
            "<p>before</p><pre><code class=\"language-rust\">{}</code></pre>",
            escape_html(&input)
        );
        let once = highlighter.highlight_page(&page);
        let twice = highlighter.highlight_page(&once);
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
    assert_eq!(fold(&tokenize("")), "");
}
