//! Script-based language guess
//!
//! Used by providers that expose no detection endpoint. Only scripts that
//! map to a single dominant language are recognised with high confidence;
//! Latin text falls back to English with a low one.

/// Input is truncated to this many chars before scanning.
const MAX_INPUT_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptGuess {
    pub language: &'static str,
    /// Fraction in `[0, 1]`.
    pub confidence: f64,
}

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))
}

const HAN: &[(char, char)] = &[('\u{4E00}', '\u{9FFF}'), ('\u{3400}', '\u{4DBF}')];
const KANA: &[(char, char)] = &[('\u{3040}', '\u{309F}'), ('\u{30A0}', '\u{30FF}')];
const HANGUL: &[(char, char)] = &[('\u{AC00}', '\u{D7AF}'), ('\u{1100}', '\u{11FF}')];
const ARABIC: &[(char, char)] = &[('\u{0600}', '\u{06FF}'), ('\u{0750}', '\u{077F}')];
const CYRILLIC: &[(char, char)] = &[('\u{0400}', '\u{04FF}')];
const ARMENIAN: &[(char, char)] = &[('\u{0530}', '\u{058F}')];
const THAI: &[(char, char)] = &[('\u{0E00}', '\u{0E7F}')];
const DEVANAGARI: &[(char, char)] = &[('\u{0900}', '\u{097F}')];

/// Guess the language of `text` from the scripts it uses.
pub fn detect_language(text: &str) -> Option<ScriptGuess> {
    let sample: Vec<char> = text
        .chars()
        .take(MAX_INPUT_CHARS)
        .filter(|c| c.is_alphabetic())
        .collect();
    if sample.is_empty() {
        return None;
    }

    let has = |ranges: &[(char, char)]| sample.iter().any(|c| in_ranges(*c, ranges));

    let guess = |language, confidence| Some(ScriptGuess { language, confidence });

    // Kana before Han: Japanese text mixes both.
    if has(KANA) {
        guess("ja", 0.9)
    } else if has(HAN) {
        guess("zh", 0.85)
    } else if has(HANGUL) {
        guess("ko", 0.95)
    } else if has(ARMENIAN) {
        guess("hy", 0.95)
    } else if has(THAI) {
        guess("th", 0.95)
    } else if has(DEVANAGARI) {
        guess("hi", 0.7)
    } else if has(ARABIC) {
        guess("ar", 0.6)
    } else if has(CYRILLIC) {
        guess("ru", 0.6)
    } else {
        guess("en", 0.3)
    }
}
