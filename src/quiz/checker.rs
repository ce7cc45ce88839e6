//! Free-text answer checking.
//!
//! Both sides are lowercased, trimmed and have whitespace runs collapsed to a
//! single space. There is no fuzzy tolerance: after normalization the answer
//! must equal one of the accepted spellings exactly.

const ALTERNATIVE_SEPARATORS: [char; 2] = ['/', ','];

pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepted spellings encoded in `spec`. Empty alternatives are dropped, so an
/// empty spec yields nothing.
pub fn alternatives(spec: &str) -> impl Iterator<Item = String> + '_ {
    spec.split(ALTERNATIVE_SEPARATORS)
        .map(normalize)
        .filter(|alternative| !alternative.is_empty())
}

pub fn matches(input: &str, spec: &str) -> bool {
    let input = normalize(input);
    alternatives(spec).any(|alternative| alternative == input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_alternative_ignoring_case() {
        assert!(matches("Went", "go/went"));
        assert!(matches("GO", "go/went"));
        assert!(matches("burnt", "burned, burnt"));
    }

    #[test]
    fn collapses_whitespace() {
        assert!(matches(" went  ", "went"));
        assert!(matches("get \t up", "get up"));
        assert!(matches("got", "  got / gotten "));
    }

    #[test]
    fn no_fuzzy_tolerance() {
        assert!(!matches("wnet", "went"));
        assert!(!matches("wen", "went"));
        assert!(!matches("went gone", "went/gone"));
    }

    #[test]
    fn empty_spec_never_matches() {
        assert!(!matches("", ""));
        assert!(!matches("anything", ""));
        assert!(!matches("", " / , "));
        assert!(!matches("  ", "go/"));
    }

    #[test]
    fn alternatives_are_normalized() {
        let found: Vec<String> = alternatives(" Dreamed /DREAMT,").collect();
        assert_eq!(found, vec!["dreamed", "dreamt"]);
    }
}
