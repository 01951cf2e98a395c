// src/punctuation.rs

use std::ops::RangeInclusive;

use unicode_general_category::{get_general_category, GeneralCategory};

/// Non-letter, non-digit ASCII code points. Characters such as `^`, `$` and
/// `` ` `` are not in the Unicode punctuation classes but count as punctuation.
const ASCII_PUNCT_RANGES: [RangeInclusive<u32>; 4] = [33..=47, 58..=64, 91..=96, 123..=126];

/// Variation selectors 1-16: presentation styling glyphs (text vs emoji, skin tone hints).
pub const VARIATION_SELECTORS: RangeInclusive<char> = '\u{FE00}'..='\u{FE0F}';

pub fn is_punctuation(ch: char) -> bool {
    let cp = ch as u32;
    if ASCII_PUNCT_RANGES.iter().any(|range| range.contains(&cp)) {
        return true;
    }
    matches!(
        get_general_category(ch),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// True only when `value` is exactly one punctuation code point.
pub fn is_single_punctuation(value: &str) -> bool {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => is_punctuation(ch),
        _ => false,
    }
}

pub fn is_variation_selector(ch: char) -> bool {
    VARIATION_SELECTORS.contains(&ch)
}

/// General category `Mn`, the combining accents left behind by NFD.
pub fn is_nonspacing_mark(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::NonspacingMark
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_symbols_count_as_punctuation() {
        for ch in ['!', '$', '^', '`', '~', '@', '/'] {
            assert!(is_punctuation(ch), "{:?}", ch);
        }
        for ch in ['a', 'Z', '0', ' '] {
            assert!(!is_punctuation(ch), "{:?}", ch);
        }
    }

    #[test]
    fn test_unicode_punctuation() {
        assert!(is_punctuation('\u{2019}'));
        assert!(is_punctuation('。'));
        assert!(is_punctuation('«'));
        assert!(!is_punctuation('£'));
    }

    #[test]
    fn test_single_punctuation_needs_exactly_one_char() {
        assert!(is_single_punctuation(","));
        assert!(!is_single_punctuation(",,"));
        assert!(!is_single_punctuation(""));
        assert!(!is_single_punctuation("12"));
    }

    #[test]
    fn test_variation_selectors_and_marks() {
        assert!(is_variation_selector('\u{FE0F}'));
        assert!(!is_variation_selector('\u{FE10}'));
        assert!(is_nonspacing_mark('\u{0301}'));
        assert!(!is_nonspacing_mark('e'));
    }
}
