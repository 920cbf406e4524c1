//! Input text normalization.

/// Normalize free-text input: trim, collapse runs of whitespace to a single
/// space, and cap the length in characters.
///
/// Every user-supplied text field (names, emails, service categories,
/// message bodies, search queries) passes through this before validation or
/// storage, so stored values never carry leading/trailing or doubled
/// whitespace.
///
/// ## Examples
///
/// ```
/// use sanad_core::normalize_text;
///
/// assert_eq!(normalize_text("  hello   world \n", 120), "hello world");
/// assert_eq!(normalize_text("abcdef", 3), "abc");
/// assert_eq!(normalize_text("   ", 10), "");
/// ```
#[must_use]
pub fn normalize_text(value: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(value.len().min(max_chars));
    let mut chars = 0;

    for word in value.split_whitespace() {
        if chars >= max_chars {
            break;
        }

        if chars > 0 {
            out.push(' ');
            chars += 1;
        }

        for c in word.chars() {
            if chars >= max_chars {
                break;
            }
            out.push(c);
            chars += 1;
        }
    }

    // A trailing space can be left behind when the cap lands between words
    while out.ends_with(' ') {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(normalize_text("  a  b\t\nc ", 100), "a b c");
    }

    #[test]
    fn test_caps_length_in_chars() {
        assert_eq!(normalize_text("abcdefgh", 5), "abcde");
        // Multi-byte characters count as one
        assert_eq!(normalize_text("ééééé", 3), "ééé");
    }

    #[test]
    fn test_cap_does_not_leave_trailing_space() {
        assert_eq!(normalize_text("ab cd", 3), "ab");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize_text(" \t\n ", 10), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text("", 10), "");
    }
}
