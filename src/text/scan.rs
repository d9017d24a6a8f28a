//! Quote-aware scanning. Double-quoted runs may contain any structural
//! delimiter verbatim; a backslash escapes the next character inside quotes.

/// Byte offset of the first `pat` outside quotes and outside parentheses.
pub(crate) fn find_top_level(text: &str, pat: &str) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
            continue;
        }
        if depth == 0 && text[i..].starts_with(pat) {
            return Some(i);
        }
        match c {
            '"' => in_quote = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Byte offset of the first `target` outside quotes.
pub(crate) fn find_unquoted(text: &str, target: char) -> Option<usize> {
    let mut in_quote = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quote = false,
                _ => {}
            }
        } else if c == target {
            return Some(i);
        } else if c == '"' {
            in_quote = true;
        }
    }
    None
}

/// Strip all whitespace, the normal form of `label:name` references.
pub(crate) fn reference_key(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_top_level_skips_quotes_and_parens() {
        assert_eq!(find_top_level("a = b", "="), Some(2));
        assert_eq!(find_top_level("a = String(\"x=y\")", "="), Some(2));
        assert_eq!(find_top_level("String(a=b)", "="), None);
        assert_eq!(find_top_level("s = String(\"//\") // c", "//"), Some(17));
        assert_eq!(find_top_level("u = String(http://x)", "//"), None);
    }

    #[test]
    fn test_find_unquoted() {
        assert_eq!(find_unquoted("\"[x]\" [y]", '['), Some(6));
        assert_eq!(find_unquoted("\"a\\\"[\" [", '['), Some(8));
        assert_eq!(find_unquoted("\"[\"", '['), None);
    }

    #[test]
    fn test_reference_key() {
        assert_eq!(reference_key(" label1 : my name "), "label1:myname");
    }
}
