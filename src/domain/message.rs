/// Longest message kept before the ellipsis is appended.
pub const MAX_MESSAGE_CHARS: usize = 100;
const ELLIPSIS: &str = "...";

/// Flatten a commit message onto one line and cap its length.
pub fn sanitize(message: &str) -> String {
    let flat = message.replace(['\n', '\r'], " ");
    let collapsed = collapse_whitespace(&flat);

    if collapsed.chars().count() > MAX_MESSAGE_CHARS {
        let mut cut: String = collapsed.chars().take(MAX_MESSAGE_CHARS).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        collapsed
    }
}

/// Join whitespace-separated words with single spaces.
///
/// The ASCII file/group/record/unit separators (U+001C..=U+001F) count as
/// whitespace too.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn flattens_multiline_messages() {
        let msg = "feat: add walker\r\n\r\n  Walks first parents\tonly.\n";
        assert_eq!(sanitize(msg), "feat: add walker Walks first parents only.");
    }

    #[test]
    fn keeps_short_messages() {
        assert_eq!(sanitize("fix typo"), "fix typo");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n\r\t "), "");
    }

    #[test]
    fn information_separators_split_words() {
        assert_eq!(sanitize("fix\x1fbug\x1c\x1dnow"), "fix bug now");
        assert_eq!(sanitize("\x1e lead and trail \x1f"), "lead and trail");
    }

    #[test]
    fn unicode_whitespace_splits_words() {
        assert_eq!(sanitize("a\u{a0}b\u{85}c\u{2003}d\x0b\x0ce"), "a b c d e");
    }

    #[test]
    fn exactly_one_hundred_chars_is_untouched() {
        let msg = "a".repeat(100);
        assert_eq!(sanitize(&msg), msg);
    }

    #[test]
    fn truncates_long_messages_with_ellipsis() {
        let msg = "b".repeat(150);
        let out = sanitize(&msg);
        assert_eq!(out.len(), 103);
        assert_eq!(&out[..100], &msg[..100]);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let msg = "é".repeat(101);
        let out = sanitize(&msg);
        assert_eq!(out.chars().count(), 103);
        assert!(out.starts_with(&"é".repeat(100)));
    }

    proptest! {
        #[test]
        fn idempotent(msg in "[a-z\\t\\r\\n\\x0b\\x0c\\x1c-\\x1f \u{a0}\u{85}\u{2003}é]{0,300}") {
            let once = sanitize(&msg);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn never_longer_than_limit_plus_ellipsis(msg in "\\PC{0,400}") {
            prop_assert!(sanitize(&msg).chars().count() <= MAX_MESSAGE_CHARS + ELLIPSIS.len());
        }

        #[test]
        fn short_single_line_only_collapses(msg in "[a-zA-Z0-9 \\t\\x1c-\\x1f]{0,100}") {
            prop_assert_eq!(sanitize(&msg), collapse_whitespace(&msg));
        }
    }
}
