//! Slovenian collation for alphabetical ordering of question text.
//!
//! Strings are compared in three passes: base letters in Slovenian alphabet
//! order (č, ć, đ, š and ž are letters of their own), then any remaining
//! accents, then case with lowercase first. Whitespace and punctuation sort
//! before digits, digits before letters.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const CARON: char = '\u{030C}';
const ACUTE: char = '\u{0301}';

const ALPHABET: &str = "abcčćdđefghijklmnopqrsštuvwxyzž";

const SPACE_WEIGHT: u32 = 1;
const PUNCT_BASE: u32 = 0x0010_0000;
const DIGIT_BASE: u32 = 0x0020_0000;
const LETTER_BASE: u32 = 0x0030_0000;
const OTHER_BASE: u32 = 0x0040_0000;

/// Precomputed comparison key for one string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

/// Build the collation key for `text`.
pub fn sort_key(text: &str) -> CollationKey {
    let mut key = CollationKey {
        primary: Vec::with_capacity(text.len()),
        secondary: Vec::with_capacity(text.len()),
        tertiary: Vec::with_capacity(text.len()),
    };

    let decomposed: Vec<char> = text.nfd().collect();
    let mut i = 0;
    while i < decomposed.len() {
        let base = decomposed[i];
        let mut end = i + 1;
        while end < decomposed.len() && is_combining_mark(decomposed[end]) {
            end += 1;
        }
        push_cluster(&mut key, base, &decomposed[i + 1..end]);
        i = end;
    }

    key
}

/// Compare two strings under Slovenian collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn push_cluster(key: &mut CollationKey, base: char, marks: &[char]) {
    let case = u8::from(base.is_uppercase());
    for lower in base.to_lowercase() {
        let (letter, consumed) = tailor(lower, marks);
        key.primary.push(primary_weight(letter));
        key.secondary.push(
            marks
                .iter()
                .filter(|&&m| Some(m) != consumed)
                .fold(0, |acc, &m| acc.wrapping_mul(31).wrapping_add(m as u32)),
        );
        key.tertiary.push(case);
    }
}

/// Fold a base letter and its first matching mark into a Slovenian letter.
fn tailor(base: char, marks: &[char]) -> (char, Option<char>) {
    for &mark in marks {
        let letter = match (base, mark) {
            ('c', CARON) => 'č',
            ('c', ACUTE) => 'ć',
            ('s', CARON) => 'š',
            ('z', CARON) => 'ž',
            _ => continue,
        };
        return (letter, Some(mark));
    }
    (base, None)
}

fn primary_weight(c: char) -> u32 {
    if c.is_whitespace() {
        return SPACE_WEIGHT;
    }
    if let Some(d) = c.to_digit(10) {
        return DIGIT_BASE + d;
    }
    if let Some(rank) = ALPHABET.chars().position(|a| a == c) {
        return LETTER_BASE + rank as u32;
    }
    if c.is_alphabetic() {
        return OTHER_BASE + c as u32;
    }
    PUNCT_BASE + c as u32
}
