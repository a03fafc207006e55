//! Translation map and lookup utilities.

use std::collections::HashMap;

/// Translation map: dot-notation key -> translated string.
pub type TranslationMap = HashMap<String, String>;

/// What: Look up a translation with fallback to English.
///
/// Inputs:
/// - `key`: Dot-notation key
/// - `translations`: Primary translation map
/// - `fallback_translations`: Fallback translation map (usually English)
///
/// Output:
/// - Translated string (from primary or fallback, or key itself if both missing)
///
/// Details:
/// - Returns the key itself if neither map has it, so missing strings stay visible.
pub fn translate_with_fallback(
    key: &str,
    translations: &TranslationMap,
    fallback_translations: &TranslationMap,
) -> String {
    if let Some(translation) = translations.get(key) {
        return translation.clone();
    }
    if let Some(translation) = fallback_translations.get(key) {
        tracing::debug!(key, "translation missing in primary locale, using fallback");
        return translation.clone();
    }
    tracing::debug!(key, "missing translation key; returning key as-is");
    key.to_string()
}

/// What: Fill `{}` placeholders in order.
///
/// Inputs:
/// - `template`: Text with `{}` placeholders
/// - `args`: Replacement values
///
/// Output:
/// - Template with the first `args.len()` placeholders replaced
///
/// Details:
/// - The template is scanned once, so `{}` inside an argument is written as-is.
/// - Placeholders without a matching argument are kept.
pub fn fill_placeholders(template: &str, args: &[&dyn std::fmt::Display]) -> String {
    use std::fmt::Write;

    let mut result = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut pieces = template.split("{}");
    if let Some(first) = pieces.next() {
        result.push_str(first);
    }
    for piece in pieces {
        match args.next() {
            Some(arg) => {
                let _ = write!(result, "{arg}");
            }
            None => result.push_str("{}"),
        }
        result.push_str(piece);
    }
    result
}
