//! Whitespace collapsing for text runs.

use std::borrow::Cow;

/// Collapse runs of spaces and tabs in `text`.
///
/// The first space or tab of a run is kept as written; the rest of the run
/// is dropped. When `trim_leading` is set on entry, leading whitespace is
/// dropped entirely, since the previous sibling already ended in whitespace.
/// On return `trim_leading` reports whether `text` ended in whitespace, so the
/// flag can be threaded through consecutive siblings.
///
/// Returns the input unchanged (borrowed) when nothing had to be removed.
///
/// ```
/// use mdtb_render::collapse_whitespace;
///
/// let mut trim = false;
/// assert_eq!(collapse_whitespace(&mut trim, "a  \t b "), "a b ");
/// assert!(trim);
/// assert_eq!(collapse_whitespace(&mut trim, "  c"), "c");
/// assert!(!trim);
/// ```
pub fn collapse_whitespace<'a>(trim_leading: &mut bool, text: &'a str) -> Cow<'a, str> {
    let mut in_whitespace = *trim_leading;
    let mut collapsed: Option<String> = None;

    for (index, ch) in text.char_indices() {
        let is_space = ch == ' ' || ch == '\t';
        if is_space && in_whitespace {
            collapsed.get_or_insert_with(|| text[..index].to_owned());
        } else if let Some(out) = collapsed.as_mut() {
            out.push(ch);
        }
        in_whitespace = is_space;
    }

    *trim_leading = in_whitespace;
    collapsed.map_or(Cow::Borrowed(text), Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collapse(trim: bool, text: &str) -> (String, bool) {
        let mut trim = trim;
        let out = collapse_whitespace(&mut trim, text).into_owned();
        (out, trim)
    }

    #[test]
    fn test_keeps_single_spaces() {
        assert_eq!(collapse(false, "a b c"), ("a b c".to_owned(), false));
    }

    #[test]
    fn test_keeps_first_char_of_run() {
        assert_eq!(collapse(false, "a\t  b"), ("a\tb".to_owned(), false));
    }

    #[test]
    fn test_pending_trim_drops_leading() {
        assert_eq!(collapse(true, "   x"), ("x".to_owned(), false));
        assert_eq!(collapse(false, "   x"), (" x".to_owned(), false));
    }

    #[test]
    fn test_sets_trim_on_trailing_whitespace() {
        assert_eq!(collapse(false, "x  "), ("x ".to_owned(), true));
    }

    #[test]
    fn test_whitespace_only_with_pending_trim() {
        assert_eq!(collapse(true, " \t "), (String::new(), true));
    }

    #[test]
    fn test_newlines_are_not_collapsed() {
        assert_eq!(collapse(false, "a\n\nb"), ("a\n\nb".to_owned(), false));
    }

    #[test]
    fn test_empty_text_keeps_trim_state() {
        assert_eq!(collapse(true, ""), (String::new(), true));
        assert_eq!(collapse(false, ""), (String::new(), false));
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for input in ["a   b", "  lead", "trail \t ", "x\t\ty  z", " ", ""] {
            for trim in [false, true] {
                let (once, trim_once) = collapse(trim, input);
                let (twice, trim_twice) = collapse(trim, &once);
                assert_eq!(once, twice, "input {input:?} trim {trim}");
                assert_eq!(trim_once, trim_twice, "input {input:?} trim {trim}");
            }
        }
    }

    #[test]
    fn test_borrows_when_unchanged() {
        let mut trim = false;
        assert!(matches!(
            collapse_whitespace(&mut trim, "no runs here"),
            Cow::Borrowed(_)
        ));
    }
}
