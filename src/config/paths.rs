use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the user's config base.
const APP_DIR: &str = "storefront";

/// Determine the settings file path, searching HOME first and then `XDG_CONFIG_HOME`.
/// Returns the first candidate that exists.
pub(crate) fn resolve_settings_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(h) = home.as_deref() {
        candidates.push(Path::new(h).join(".config").join(APP_DIR).join("settings.conf"));
    }
    if let Some(xdg) = xdg_config.as_deref() {
        candidates.push(Path::new(xdg).join(APP_DIR).join("settings.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Ensure `<base>/<sub>` exists and return it.
///
/// Inputs:
/// - `base`: Parent directory.
/// - `sub`: Child directory name.
///
/// Output:
/// - Joined path; creation failures are ignored so callers can still attempt their own I/O.
pub fn ensured_subdir(base: &Path, sub: &str) -> PathBuf {
    let dir = base.join(sub);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Config directory: `$HOME/.config/storefront`, falling back to `XDG_CONFIG_HOME` (ensured to exist).
pub fn config_dir() -> PathBuf {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    ensured_subdir(&base, APP_DIR)
}

/// Logs directory under config: `$HOME/.config/storefront/logs` (ensured to exist)
pub fn logs_dir() -> PathBuf {
    ensured_subdir(&config_dir(), "logs")
}

/// Lists directory under config: `$HOME/.config/storefront/lists` (ensured to exist)
pub fn lists_dir() -> PathBuf {
    ensured_subdir(&config_dir(), "lists")
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Sub-directories are created on demand under the given base.
    ///
    /// - Input: Temporary base directory
    /// - Output: `logs` and `lists` exist afterwards
    fn ensured_subdir_creates_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let logs = super::ensured_subdir(tmp.path(), "logs");
        let lists = super::ensured_subdir(tmp.path(), "lists");
        assert!(logs.is_dir());
        assert!(lists.is_dir());
        assert!(logs.ends_with("logs"));
    }
}
