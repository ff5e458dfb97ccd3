//! Store-size label classification.
//!
//! Bracket tables are keyed by a small set of canonical store-size keys.
//! The four standard categories share one bracket table; "extra large"
//! stores have their own; anything else passes through as a custom key.

/// Canonical key for the four standard store sizes, which share one
/// bracket table.
pub const STANDARD_SIZES_KEY: &str = "GRANDE-MEDIANA-PEQUEÑA-EXPRESS";

/// Canonical key for extra-large stores.
pub const EXTRA_LARGE_KEY: &str = "EXTRA - GRANDE";

/// Normalizes a free-text store-size label into a bracket-table key.
///
/// The label is stripped of diacritics, uppercased, and trimmed. If it is
/// exactly one of the four standard sizes, or mentions all four, the shared
/// [`STANDARD_SIZES_KEY`] is returned. A label mentioning both `EXTRA` and
/// `GRANDE` maps to [`EXTRA_LARGE_KEY`]. Anything else is returned
/// unchanged so custom categories keep their own bracket tables.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::{classify_store_size, STANDARD_SIZES_KEY, EXTRA_LARGE_KEY};
///
/// assert_eq!(classify_store_size("MEDIANA"), STANDARD_SIZES_KEY);
/// assert_eq!(classify_store_size("pequeña "), STANDARD_SIZES_KEY);
/// assert_eq!(classify_store_size("EXTRA GRANDE"), EXTRA_LARGE_KEY);
/// assert_eq!(classify_store_size("OUTLET"), "OUTLET");
/// ```
pub fn classify_store_size(label: &str) -> String {
    let normalized = strip_diacritics(label.trim());

    const STANDARD_TOKENS: [&str; 4] = ["GRANDE", "MEDIANA", "PEQUENA", "EXPRESS"];

    let is_standard = STANDARD_TOKENS.contains(&normalized.as_str())
        || STANDARD_TOKENS.iter().all(|t| normalized.contains(t));
    if is_standard {
        return STANDARD_SIZES_KEY.to_string();
    }

    if normalized.contains("EXTRA") && normalized.contains("GRANDE") {
        return EXTRA_LARGE_KEY.to_string();
    }

    label.to_string()
}

/// Uppercases and replaces Spanish accented characters with their ASCII
/// base letters.
fn strip_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ä' | 'á' | 'à' | 'â' | 'ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' | 'é' | 'è' | 'ê' | 'ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' | 'í' | 'ì' | 'î' | 'ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'ó' | 'ò' | 'ô' | 'ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' | 'ú' | 'ù' | 'û' | 'ü' => 'U',
            'Ñ' | 'ñ' => 'N',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
