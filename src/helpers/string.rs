//! Text normalization utilities shared by the header and marker heuristics.

/// Lower-cases text and collapses every run of whitespace (including line
/// breaks) into a single space.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns the first line of a possibly multi-line cell, trimmed.
pub(crate) fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

/// Upper-cases the first character and lower-cases the rest ("qUOTED" -> "Quoted").
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Title-cases text: every letter that follows a non-letter is upper-cased,
/// every other letter lower-cased ("quoted cost/pc" -> "Quoted Cost/Pc").
pub(crate) fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for character in text.chars() {
        if character.is_alphabetic() {
            if previous_is_letter {
                titled.extend(character.to_lowercase());
            } else {
                titled.extend(character.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            titled.push(character);
            previous_is_letter = false;
        }
    }
    titled
}
