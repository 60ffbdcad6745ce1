//! Text helpers shared by every matching and ordering routine.
//!
//! [`normalize`] produces the comparison key used by alias lookups,
//! [`title_case`] the display form of free-text tokens, and [`compare_cs`]
//! the Czech ordering used for every user-facing sorted list.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks block stripped after NFD decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercases, decomposes, strips combining diacritics and trims.
///
/// `"  Anděl "` becomes `"andel"`. Idempotent: applying it twice yields the
/// same key as applying it once.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trims, then upper-cases the first character and lower-cases the rest.
///
/// Returns an empty string for blank input.
#[must_use]
pub fn title_case(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Compares two strings the way a Czech reader expects a list to be ordered.
///
/// Primary order is by letter, where `č`, `ř`, `š`, `ž` follow their base
/// letter and the digraph `ch` follows `h`. Other accents (`á`, `ě`, `ů`, ...)
/// and letter case only break ties.
#[must_use]
pub fn compare_cs(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(&primary_weights(b))
        .then_with(|| normalize(a).cmp(&normalize(b)))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn primary_weights(input: &str) -> Vec<u32> {
    let lower = input.to_lowercase();
    let mut weights = Vec::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();

    while let Some(c) = chars.next() {
        if c == 'c' && chars.peek() == Some(&'h') {
            chars.next();
            weights.push(letter_weight('h') + 2);
            continue;
        }
        weights.push(char_weight(c));
    }

    weights
}

fn char_weight(c: char) -> u32 {
    match c {
        'č' => letter_weight('c') + 1,
        'ř' => letter_weight('r') + 1,
        'š' => letter_weight('s') + 1,
        'ž' => letter_weight('z') + 1,
        _ => {
            let base = c
                .nfd()
                .find(|d| !COMBINING_MARKS.contains(d))
                .unwrap_or(c);
            letter_weight(base)
        }
    }
}

fn letter_weight(c: char) -> u32 {
    u32::from(c) * 4
}
