//! Regexes shared by every shaping call. Built on first use and read-only afterwards.

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Tag keys containing any of these characters are dropped. `\s` already covers the
/// ideographic space U+3000.
pub static PROBLEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"[=+/&<>;'"?%#$@,.\s]"#));

/// `street:name` style sub-keys under `addr:`.
pub static LOWER_COLON: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-z_]*:[a-z_]*$"));

/// Parenthesized remarks like `(Kyoto)` and stray `yes` values.
pub static ADDR_PROBLEM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\(.*\)|yes"));

/// From the first `;` to the very end, newlines included.
pub static ADDR_SEMICOLON: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s);.*"));

pub static ADDR_SPACE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\s+"));

/// `123-4567`
pub static POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[0-9]{3}-[0-9]{4}$"));

/// `075-123-4567` or `81 751234567`
pub static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^0[0-9]{2}-[0-9]{3}-[0-9]{4}$|^81\s[0-9]+$"));

/// `***市`, not crossing a prefecture (府).
pub static CITY: LazyLock<Regex> =
    LazyLock::new(|| compile("[^府]+市"));

/// `***区` and whatever follows it, not crossing a city (市).
pub static WARD: LazyLock<Regex> =
    LazyLock::new(|| compile("[^市]+区.*"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_chars() {
        for key in ["addr:street name", "a=b", "name.en", "k\u{3000}", "a,b", "x@y", "a\tb"] {
            assert!(PROBLEM_CHARS.is_match(key), "{key}");
        }
        for key in ["addr:street", "railway:position", "name_en", "building"] {
            assert!(!PROBLEM_CHARS.is_match(key), "{key}");
        }
    }

    #[test]
    fn lower_colon_only_matches_two_lowercase_segments() {
        assert!(LOWER_COLON.is_match("street:en"));
        assert!(LOWER_COLON.is_match("block_number:ja"));
        assert!(!LOWER_COLON.is_match("street"));
        assert!(!LOWER_COLON.is_match("street:EN"));
        assert!(!LOWER_COLON.is_match("a:b:c"));
    }

    #[test]
    fn phone_numbers() {
        assert!(PHONE_NUMBER.is_match("075-123-4567"));
        assert!(PHONE_NUMBER.is_match("81 751234567"));
        assert!(!PHONE_NUMBER.is_match("175-123-4567"));
        assert!(!PHONE_NUMBER.is_match("8175123"));
    }

    #[test]
    fn city_and_ward() {
        assert_eq!(CITY.find("京都府京都市").map(|m| m.as_str()), Some("京都市"));
        assert_eq!(WARD.find("京都市中京区三条").map(|m| m.as_str()), Some("中京区三条"));
        assert!(WARD.find("京都市").is_none());
    }
}
