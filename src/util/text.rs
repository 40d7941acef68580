use std::borrow::Cow;

/// Ellipsis appended when text is cut off
const ELLIPSIS: &str = "...";

/// Truncates a string to a maximum number of characters.
///
/// If truncation is necessary, trailing whitespace at the cut is dropped and
/// "..." is appended. The cap counts `char`s, not bytes, so multi-byte text
/// never splits mid-codepoint.
///
/// Returns `Cow::Borrowed` (no allocation) when the string already fits.
///
/// # Examples
///
/// ```
/// use newsdeck::util::truncate_chars;
///
/// assert_eq!(truncate_chars("Short", 10), "Short");
/// assert_eq!(truncate_chars("Hello world", 5), "Hello...");
/// assert_eq!(truncate_chars("Hello world", 6), "Hello...");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((byte_idx, _)) => {
            let mut out = s[..byte_idx].trim_end().to_string();
            out.push_str(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}
