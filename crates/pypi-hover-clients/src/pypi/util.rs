/**
    Normalizes a `PyPI` package name per PEP 503:
    lowercase, with runs of `[-_.]` replaced by a single `-`.

    The normalized name is used both as the cache key and in
    registry URLs, so every lookup path agrees on one spelling.
*/
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());

    for ch in name.chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !result.ends_with('-') {
                result.push('-');
            }
        } else {
            result.push(ch.to_ascii_lowercase());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases() {
        assert_eq!(normalize_name("Django"), "django");
    }

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_name("foo__bar..baz"), "foo-bar-baz");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
    }

    #[test]
    fn normalize_keeps_normalized_names() {
        assert_eq!(normalize_name("requests"), "requests");
    }
}
