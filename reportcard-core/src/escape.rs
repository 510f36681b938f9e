//! LaTeX escaping for untrusted slot values.
//!
//! [`RULES`] is applied as a single left fold, top to bottom. The backslash
//! rule must stay first: every later replacement introduces a backslash that
//! would otherwise be doubled.

/// Ordered `(pattern, replacement)` table.
pub const RULES: &[(char, &str)] = &[
    ('\\', "\\\\"),
    ('{', "\\{"),
    ('}', "\\}"),
    ('_', "\\_"),
    ('^', "\\^"),
    ('#', "\\#"),
    ('&', "\\&"),
    ('$', "\\$"),
    ('%', "\\%"),
    ('~', "\\~"),
];

/// Escape LaTeX special characters: `\ { } _ ^ # & $ % ~`.
pub fn escape(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_owned(), |acc, (pattern, replacement)| {
            acc.replace(*pattern, replacement)
        })
}

/// Escape every string in `values`, preserving order and length.
pub fn escape_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| escape(v.as_ref())).collect()
}

/// Inverse of [`escape`]: replays [`RULES`] backwards.
///
/// Only meaningful for strings produced by [`escape`].
pub fn unescape(text: &str) -> String {
    RULES
        .iter()
        .rev()
        .fold(text.to_owned(), |acc, (pattern, replacement)| {
            acc.replace(replacement, &pattern.to_string())
        })
}

/// `true` if `text` contains none of the characters in [`RULES`].
pub fn is_plain(text: &str) -> bool {
    !text.chars().any(|c| RULES.iter().any(|(p, _)| *p == c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn backslash_rule_comes_first() {
        assert_eq!(RULES[0].0, '\\');
        let order: String = RULES.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, "\\{}_^#&$%~");
    }

    #[test]
    fn backslash_then_brace_is_not_double_escaped() {
        assert_eq!(escape("\\{"), "\\\\\\{");
    }

    #[rstest]
    #[case("50% done", "50\\% done")]
    #[case("snake_case", "snake\\_case")]
    #[case("a & b", "a \\& b")]
    #[case("$x^2$", "\\$x\\^2\\$")]
    #[case("#1 ~ {x}", "\\#1 \\~ \\{x\\}")]
    fn escapes_single_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("plain text, nothing special.")]
    #[case("/tmp/img.png")]
    #[case("日本語 émoji 🚀 [brackets] (parens) <angle>")]
    fn plain_text_is_unchanged(#[case] input: &str) {
        assert!(is_plain(input));
        assert_eq!(escape(input), input);
    }

    #[test]
    fn all_ten_characters_round_trip() {
        let input = "\\{}_^#&$%~ mixed \\\\{{_}} end%";
        let escaped = escape(input);
        assert_eq!(unescape(&escaped), input);

        // every special character is now preceded by a backslash
        let chars: Vec<char> = escaped.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] == '\\' {
                i += 2;
                continue;
            }
            let c = chars[i];
            assert!(is_plain(&c.to_string()), "unescaped {c:?} in {escaped}");
            i += 1;
        }
    }

    #[test]
    fn escape_all_preserves_order_and_length() {
        let out = escape_all(&["a_b", "", "c%"]);
        assert_eq!(out, vec!["a\\_b".to_string(), String::new(), "c\\%".to_string()]);
    }
}
