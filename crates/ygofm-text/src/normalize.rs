//! Display normalisation of decoded text.

/// How decoded text is tidied before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Trim surrounding whitespace only.
    Trim,
    /// Trim, then title-case every word.
    #[default]
    TitleCase,
}

impl Normalization {
    /// Apply this normalisation.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Normalization::Trim => text.trim().to_string(),
            Normalization::TitleCase => title_case(text.trim()),
        }
    }
}

/// Title-case a string.
///
/// A letter is upper-cased when the character before it is not a cased
/// letter, and lower-cased otherwise. Digits, punctuation and spaces all
/// start a new word, so `"blue-eyes"` becomes `"Blue-Eyes"` and `"3rd"`
/// becomes `"3Rd"`. Characters without case pass through unchanged.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("dark magician"), "Dark Magician");
        assert_eq!(title_case("BLUE-EYES WHITE DRAGON"), "Blue-Eyes White Dragon");
        assert_eq!(title_case("Already Titled"), "Already Titled");
    }

    #[test]
    fn test_title_case_boundaries() {
        assert_eq!(title_case("mother's grave"), "Mother'S Grave");
        assert_eq!(title_case("3rd"), "3Rd");
        assert_eq!(title_case("?[0xfc]"), "?[0Xfc]");
    }

    #[test]
    fn test_title_case_symbols_only() {
        assert_eq!(title_case("#&?!"), "#&?!");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(Normalization::Trim.apply("  a b  "), "a b");
        assert_eq!(Normalization::TitleCase.apply("  a b  "), "A B");
    }
}
