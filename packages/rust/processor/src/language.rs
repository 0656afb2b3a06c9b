//! Hangul-ratio language detection.

use trendpress_shared::Language;

/// Above this share of Hangul characters the text is Korean.
const KOREAN_RATIO: f64 = 0.3;

/// Below this share of Hangul characters, text with Latin letters is English.
const ENGLISH_MAX_KOREAN_RATIO: f64 = 0.1;

/// Classify text by the share of Hangul among its non-whitespace characters.
///
/// - more than 30% Hangul → [`Language::Korean`]
/// - otherwise, any Latin letter and less than 10% Hangul → [`Language::English`]
/// - anything else (including empty text) → [`Language::Mixed`]
pub fn detect_language(text: &str) -> Language {
    let mut total = 0usize;
    let mut hangul = 0usize;
    let mut has_latin = false;

    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        if is_hangul(c) {
            hangul += 1;
        } else if c.is_ascii_alphabetic() {
            has_latin = true;
        }
    }

    if total == 0 {
        return Language::Mixed;
    }

    let ratio = hangul as f64 / total as f64;
    if ratio > KOREAN_RATIO {
        Language::Korean
    } else if has_latin && ratio < ENGLISH_MAX_KOREAN_RATIO {
        Language::English
    } else {
        Language::Mixed
    }
}

fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}'   // syllables
        | '\u{1100}'..='\u{11FF}' // jamo
        | '\u{3130}'..='\u{318F}' // compatibility jamo
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_with_some_latin() {
        assert_eq!(detect_language("안녕하세요 reactjs"), Language::Korean);
    }

    #[test]
    fn plain_english() {
        assert_eq!(
            detect_language("This is an English sentence about technology"),
            Language::English
        );
    }

    #[test]
    fn balanced_mix_is_mixed() {
        // 3 Hangul of 16 non-whitespace chars: neither rule applies.
        assert_eq!(detect_language("한국어 and english mix"), Language::Mixed);
    }

    #[test]
    fn no_letters_is_mixed() {
        assert_eq!(detect_language(""), Language::Mixed);
        assert_eq!(detect_language("12345 !!!"), Language::Mixed);
    }

    #[test]
    fn compatibility_jamo_counts_as_hangul() {
        assert_eq!(detect_language("ㅋㅋㅋ ok"), Language::Korean);
    }
}
