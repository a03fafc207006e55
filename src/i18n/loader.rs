//! Locale file parsing for the bundled locales.

use std::collections::HashMap;

use crate::i18n::translations::TranslationMap;

/// Locales compiled into the binary: `(code, yaml)`.
const BUNDLED_LOCALES: &[(&str, &str)] = &[
    ("en-US", include_str!("../../config/locales/en-US.yml")),
    ("ar", include_str!("../../config/locales/ar.yml")),
];

/// Locale used when the requested one is unknown, and as lookup fallback.
pub const DEFAULT_LOCALE: &str = "en-US";

/// What: Validate locale code format.
///
/// Inputs:
/// - `locale`: Locale code to validate
///
/// Output:
/// - `true` if format looks valid, `false` otherwise
fn is_valid_locale_format(locale: &str) -> bool {
    if locale.is_empty() || locale.len() > 20 {
        return false;
    }
    locale.chars().all(|c| c.is_alphanumeric() || c == '-')
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && !locale.contains("--")
}

/// What: Resolve a requested locale to a bundled one.
///
/// Inputs:
/// - `requested`: Locale code from settings (e.g. `ar-SA`, `en`).
///
/// Output:
/// - Bundled locale code: exact match, then language-only match, then `en-US`.
#[must_use]
pub fn resolve_locale(requested: &str) -> &'static str {
    let requested = requested.trim();
    if !is_valid_locale_format(requested) {
        if !requested.is_empty() {
            tracing::warn!(locale = requested, "invalid locale code; using default");
        }
        return DEFAULT_LOCALE;
    }
    if let Some((code, _)) = BUNDLED_LOCALES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(requested))
    {
        return *code;
    }
    let lang = requested.split('-').next().unwrap_or(requested);
    BUNDLED_LOCALES
        .iter()
        .find(|(code, _)| {
            code.split('-')
                .next()
                .is_some_and(|l| l.eq_ignore_ascii_case(lang))
        })
        .map_or(DEFAULT_LOCALE, |(code, _)| *code)
}

/// What: Load a bundled locale into a `TranslationMap`.
///
/// Inputs:
/// - `locale`: Bundled locale code.
///
/// Output:
/// - `Ok(TranslationMap)`; `Err` with a message when the locale is not bundled or its YAML is invalid.
///
/// # Errors
/// - Returns `Err` when the locale is unknown or the YAML content cannot be parsed
pub fn load_bundled_locale(locale: &str) -> Result<TranslationMap, String> {
    let (_, yaml) = BUNDLED_LOCALES
        .iter()
        .find(|(code, _)| *code == locale)
        .ok_or_else(|| format!("Locale not bundled: '{locale}'"))?;
    parse_locale_yaml(yaml).map_err(|e| format!("Failed to parse locale '{locale}': {e}"))
}

/// What: Parse YAML content into a `TranslationMap`.
///
/// Inputs:
/// - `yaml_content`: YAML file content as string
///
/// Output:
/// - `Result<TranslationMap, String>` containing parsed translations
///
/// # Errors
/// - Returns `Err` when the YAML content cannot be parsed
///
/// Details:
/// - Expects top-level key matching locale code (e.g., "ar:")
/// - Flattens nested structure into dot-notation keys
pub fn parse_locale_yaml(yaml_content: &str) -> Result<TranslationMap, String> {
    let doc: serde_norway::Value =
        serde_norway::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {e}"))?;

    let mut translations = HashMap::new();
    if let Some(locale_obj) = doc.as_mapping() {
        for (_locale_key, locale_value) in locale_obj {
            flatten_yaml_value(locale_value, "", &mut translations);
        }
    }
    Ok(translations)
}

/// What: Recursively flatten YAML structure into dot-notation keys.
///
/// Inputs:
/// - `value`: Current YAML value
/// - `prefix`: Current key prefix (e.g., "app.errors")
/// - `translations`: Map to populate
fn flatten_yaml_value(
    value: &serde_norway::Value,
    prefix: &str,
    translations: &mut TranslationMap,
) {
    match value {
        serde_norway::Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key_str) = key.as_str() {
                    let new_prefix = if prefix.is_empty() {
                        key_str.to_string()
                    } else {
                        format!("{prefix}.{key_str}")
                    };
                    flatten_yaml_value(val, &new_prefix, translations);
                }
            }
        }
        serde_norway::Value::String(s) => {
            translations.insert(prefix.to_string(), s.clone());
        }
        serde_norway::Value::Number(n) => {
            translations.insert(prefix.to_string(), n.to_string());
        }
        serde_norway::Value::Bool(b) => {
            translations.insert(prefix.to_string(), b.to_string());
        }
        _ => {}
    }
}
