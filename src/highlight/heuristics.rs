//! Word-shape heuristics used by the transition table.
//!
//!     These are deliberately small and isolated: each one is a known source of
//!     misclassification and is pinned by tests so changes show up as diffs.

/// A call whose name starts with an uppercase letter is read as a tuple struct or enum
/// variant construction (`Some(x)`, `Point(1, 2)`).
///
/// Lowercase constructor-like calls (`vec(..)`, `some_struct(..)`) are classified as plain
/// method calls, and uppercase functions (rare, but legal) as constructions.
pub fn looks_like_construction(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// A word made only of operator characters (`=`, `=>`, `<=`, `||`, `+`).
pub fn is_operator_run(word: &str) -> bool {
    !word.is_empty() && !word.chars().any(is_word_char)
}

/// Digits only, so a following `.` may continue a float literal.
pub fn is_integer(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

pub fn is_lifetime(word: &str) -> bool {
    word.starts_with('\'')
}

/// Words that may appear in a type annotation before the type itself (`&mut T`, `&'a T`,
/// `dyn Trait`, `impl Trait`, `*const T`).
pub fn is_type_modifier(word: &str) -> bool {
    is_lifetime(word) || matches!(word, "mut" | "dyn" | "impl" | "const")
}

pub fn is_macro_name(word: &str) -> bool {
    word.len() > 1 && word.ends_with('!')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}
