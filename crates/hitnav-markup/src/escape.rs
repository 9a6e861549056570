//! Query escaping for the backend's reserved syntax.

use hitnav_core::types::{QueryKind, FIELD_TEXT_EXACT};

/// Characters with reserved meaning in the backend query syntax.
const RESERVED: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/',
];

/// Escape `raw` for use in a backend query. Total over any input string.
///
/// Literal queries are escaped unconditionally. Pattern queries are left
/// untouched when they already carry an explicit `text_exact:` qualifier:
/// escaping a compound query again would corrupt the qualifier.
pub fn escape_query(raw: &str, kind: QueryKind) -> String {
    match kind {
        QueryKind::Literal => escape_reserved(raw),
        QueryKind::Pattern => {
            let qualifier = format!("{}:", FIELD_TEXT_EXACT);
            if raw.contains(&qualifier) {
                raw.to_string()
            } else {
                escape_reserved(raw)
            }
        }
    }
}

fn escape_reserved(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_escapes_reserved_characters() {
        assert_eq!(escape_query("a+b:c", QueryKind::Literal), "a\\+b\\:c");
        assert_eq!(escape_query(r"dir\file", QueryKind::Literal), r"dir\\file");
        assert_eq!(escape_query("plain words", QueryKind::Literal), "plain words");
    }

    #[test]
    fn pattern_without_qualifier_is_escaped() {
        assert_eq!(escape_query("foo*", QueryKind::Pattern), "foo\\*");
    }

    #[test]
    fn pattern_with_qualifier_is_untouched() {
        let compound = "text_exact:\"foo*\"";
        assert_eq!(escape_query(compound, QueryKind::Pattern), compound);
    }

    #[test]
    fn literal_with_qualifier_is_still_escaped() {
        assert_eq!(
            escape_query("text_exact:foo", QueryKind::Literal),
            "text_exact\\:foo"
        );
    }
}
