//! Settings file and on-disk locations.

/// Path resolution for config directories.
mod paths;
/// Settings parsing and access.
mod settings;
/// Settings type definitions.
mod types;

pub use paths::{config_dir, ensured_subdir, lists_dir, logs_dir};
pub use settings::{
    API_URL_ENV, load_settings, load_settings_from, normalize, parse_settings, settings,
};
pub use types::{DEFAULT_API_BASE_URL, Settings};
