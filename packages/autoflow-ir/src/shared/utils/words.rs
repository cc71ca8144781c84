//! Identifier-like word scanning over raw source text

/// Whether `c` can appear inside a TypeScript identifier
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Split raw text into identifier-like words (`a.b(c_1)` → `a`, `b`, `c_1`)
pub fn ident_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_ident_char(c))
        .filter(|word| !word.is_empty())
}

/// Whether `name` is a plain identifier (`foo`, `_async`, `$x`)
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(is_ident_char)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_words() {
        let words: Vec<_> = ident_words("{ a, b: c_1 } = $x.y").collect();
        assert_eq!(words, vec!["a", "b", "c_1", "$x", "y"]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("modelFlow"));
        assert!(is_identifier("_async"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
