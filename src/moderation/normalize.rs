// Text normalization: the case-folded copy of the input that rules scan.
//
// Match offsets are computed against the normalized text and then used to
// slice the original, so normalization must never change byte length.
// Only per-character case folding is done, and a character is folded only
// when its lower-case form is one character of the same UTF-8 width.

use std::borrow::Cow;

/// Produce the scan copy of `text`. Returned unchanged when case-sensitive.
pub fn normalize(text: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive || !text.chars().any(|c| fold_char(c) != c) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(fold_char).collect())
}

fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_ascii() {
        assert_eq!(normalize("I WILL Kill You", false), "i will kill you");
    }

    #[test]
    fn test_case_sensitive_is_identity() {
        let out = normalize("Hello World", true);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn test_preserves_byte_length() {
        // U+0130 lower-cases to two chars ("i" + combining dot) and the
        // Kelvin sign lower-cases to a narrower 'k'; both are kept as-is.
        let text = "İstanbul \u{212A}elvin ÀÉÎ Straße";
        let out = normalize(text, false);
        assert_eq!(out.len(), text.len());
        assert!(out.contains("àéî"));
        assert!(out.starts_with('İ'));
    }

    #[test]
    fn test_char_boundaries_line_up() {
        let text = "ÉCOLE de Ünïcode";
        let out = normalize(text, false);
        for (i, _) in text.char_indices() {
            assert!(out.is_char_boundary(i));
        }
    }

    #[test]
    fn test_titlecase_folds_on_its_own() {
        // U+01C5 is titlecase, not uppercase
        assert_eq!(normalize("\u{01C5}", false), "\u{01C6}");
        assert_eq!(normalize("A\u{01C5}", false), "a\u{01C6}");
    }
}
