//! Excel-style cell addressing.
//!
//! All indexes here are 1-based, matching the way sheet authors talk about cells
//! (`A1` is row 1, column 1).

use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)(\d+)$").expect("Hardcode regex pattern"));

/// Converts column letters to a 1-based column number.
///
/// A = 1, B = 2, ..., Z = 26, AA = 27, AB = 28, ..., AZ = 52, BA = 53, ...
/// Returns None for an empty string or any non-letter character.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|letter| letter.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .chars()
        .map(|letter| letter as usize - 'A' as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))
}

/// Parses a row number string. Row 0 does not exist.
pub fn row_to_index(number: &str) -> Option<usize> {
    number.parse().ok().filter(|row: &usize| *row > 0)
}

/// Converts a 1-based column number to its letters (1 -> "A", 27 -> "AA").
pub fn column_letter(col: usize) -> String {
    let mut column = col;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32(65 + (column % 26) as u32).expect("Hardcode letters");
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}

/// Returns the Excel-style reference (e.g. "D6") of a 1-based position.
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letter(col), row)
}

/// Parses a single-cell reference such as "D6" into `(row, col)`.
pub fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.trim().to_ascii_uppercase();
    let captures = REFERENCE_PATTERN.captures(reference.as_str())?;
    let col = col_to_index(captures.get(1)?.as_str())?;
    let row = row_to_index(captures.get(2)?.as_str())?;
    Some((row, col))
}
