use std::sync::LazyLock;

use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};

static NFKC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfkc);

/// NFKC: full-width letters and digits become ASCII, circled numerals become plain digits.
pub fn normalize(text: &str) -> String {
    NFKC.normalize(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_width_and_circled_digits() {
        assert_eq!(normalize("１２３－４５６７"), "123-4567");
        assert_eq!(normalize("①丁目"), "1丁目");
        assert_eq!(normalize("ＡＢＣ"), "ABC");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(normalize("京都市"), "京都市");
        assert_eq!(normalize("restaurant"), "restaurant");
        assert_eq!(normalize(""), "");
    }

    proptest! {
        #[test]
        fn idempotent(s in "\\PC{0,200}") {
            let once = normalize(&s);
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
