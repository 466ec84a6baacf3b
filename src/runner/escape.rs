//! Backslash escaping for task names and arguments.
//!
//! Rake-style task strings (`name[a, b]`) are split on commas that are not
//! preceded by a backslash, and `\x` pairs are then unescaped. Every
//! character outside a conservative safe set gets a backslash, so quotes,
//! spaces and `$` arrive literally. Commas are in the safe set: an argument
//! containing one is split by the receiving task.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Any character that needs a backslash.
static UNSAFE_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-.,:+/@\n]").expect("valid escape pattern"));

/// Escapes `word` with a backslash before every unsafe character.
///
/// Newlines become `'\n'` and the empty string becomes `''`, so neither
/// disappears when the receiving side unescapes the string.
pub fn escape(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }

    let escaped = UNSAFE_CHAR.replace_all(word, r"\$0");
    if escaped.contains('\n') {
        Cow::Owned(escaped.replace('\n', "'\n'"))
    } else {
        escaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_words_pass_through() {
        assert_eq!(escape("arg1"), "arg1");
        assert_eq!(escape("evaluation:my_task"), "evaluation:my_task");
        assert_eq!(escape("a-b_c.d,e+f/g@h"), "a-b_c.d,e+f/g@h");
        assert!(matches!(escape("openai"), Cow::Borrowed(_)));
    }

    #[test]
    fn backslashes_each_unsafe_character() {
        assert_eq!(escape("$complex"), r"\$complex");
        assert_eq!(escape(r#""argu", "ments""#), r#"\"argu\",\ \"ments\""#);
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape("it's"), r"it\'s");
    }

    #[test]
    fn empty_word_becomes_empty_quotes() {
        assert_eq!(escape(""), "''");
    }

    #[test]
    fn newline_is_wrapped_in_quotes() {
        assert_eq!(escape("a\nb c"), "a'\n'b\\ c");
    }
}
