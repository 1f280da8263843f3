//! City-name normalization.
//!
//! [`canonicalize`] produces the comparison form used to match a client's city
//! against the municipality directory. [`title_case`] is a display helper only
//! and never takes part in matching.

use unidecode::unidecode;

/// Linking particles that stay lowercase in [`title_case`], e.g. "Rio de Janeiro".
pub const LOWERCASE_PARTICLES: [&str; 5] = ["da", "de", "di", "do", "du"];

/// Replace accented characters with their closest ASCII equivalent ("São" -> "Sao").
pub fn fold_diacritics(raw: &str) -> String {
    unidecode(raw)
}

/// Comparison form of a municipality name: diacritics folded, lowercased,
/// runs of whitespace collapsed to a single space.
///
/// Empty input yields an empty string; deciding that nothing matched is up to the resolver.
pub fn canonicalize(raw: &str) -> String {
    fold_diacritics(raw)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form: diacritics folded, each word capitalized, linking particles lowercase.
pub fn title_case(raw: &str) -> String {
    fold_diacritics(raw)
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            if LOWERCASE_PARTICLES.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
