//! Localised user-facing strings.
//!
//! Locale files live in `config/locales/{locale}.yml` and are compiled into
//! the binary. Each file has one top-level key (the locale code) and a nested
//! structure flattened into dot keys:
//!
//! ```yaml
//! en-US:
//!   app:
//!     errors:
//!       fetch_failed: "Something went wrong while loading."
//! ```
//!
//! becomes `app.errors.fetch_failed`.
//!
//! The active locale is chosen once with [`init`]; until then lookups use
//! English. Missing keys fall back to English, then to the key itself.

mod loader;
pub mod translations;

pub use loader::{DEFAULT_LOCALE, load_bundled_locale, parse_locale_yaml, resolve_locale};
pub use translations::{TranslationMap, fill_placeholders, translate_with_fallback};

use std::sync::{LazyLock, RwLock};

/// Active translations plus the English fallback.
struct Catalog {
    /// Resolved locale code.
    locale: &'static str,
    /// Strings for the active locale.
    primary: TranslationMap,
    /// English strings.
    fallback: TranslationMap,
}

impl Catalog {
    /// What: Build a catalog for a requested locale.
    ///
    /// Inputs:
    /// - `requested`: Locale code from settings.
    ///
    /// Output:
    /// - Catalog; load failures degrade to an empty map and are logged.
    fn for_locale(requested: &str) -> Self {
        let fallback = load_bundled_locale(DEFAULT_LOCALE).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load default locale");
            TranslationMap::new()
        });
        let locale = resolve_locale(requested);
        let primary = if locale == DEFAULT_LOCALE {
            fallback.clone()
        } else {
            load_bundled_locale(locale).unwrap_or_else(|e| {
                tracing::warn!(locale, error = %e, "failed to load locale; using English");
                TranslationMap::new()
            })
        };
        Self {
            locale,
            primary,
            fallback,
        }
    }
}

static CATALOG: LazyLock<RwLock<Catalog>> =
    LazyLock::new(|| RwLock::new(Catalog::for_locale(DEFAULT_LOCALE)));

/// What: Select the locale used by [`t`].
///
/// Inputs:
/// - `requested`: Locale code (e.g. from `settings.conf`).
///
/// Output:
/// - Locale code actually in use after resolution.
pub fn init(requested: &str) -> &'static str {
    let catalog = Catalog::for_locale(requested);
    let locale = catalog.locale;
    match CATALOG.write() {
        Ok(mut guard) => *guard = catalog,
        Err(poisoned) => *poisoned.into_inner() = catalog,
    }
    tracing::info!(locale, "locale initialized");
    locale
}

/// What: Get the translation for a dot key in the active locale.
///
/// Inputs:
/// - `key`: Dot-notation key (e.g., "app.errors.fetch_failed")
///
/// Output:
/// - Translated string, or the key itself if no locale has it
pub fn t(key: &str) -> String {
    let guard = CATALOG
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    translate_with_fallback(key, &guard.primary, &guard.fallback)
}

/// What: Get a translation with a single format argument.
///
/// Inputs:
/// - `key`: Dot-notation key
/// - `arg`: Value for the first `{}`
///
/// Output:
/// - Formatted translated string
pub fn t_fmt1<T: std::fmt::Display>(key: &str, arg: T) -> String {
    fill_placeholders(&t(key), &[&arg])
}

/// What: Get a translation with several format arguments.
///
/// Inputs:
/// - `key`: Dot-notation key
/// - `args`: Values for the `{}` placeholders, in order
///
/// Output:
/// - Formatted translated string
pub fn t_fmt(key: &str, args: &[&dyn std::fmt::Display]) -> String {
    fill_placeholders(&t(key), args)
}
