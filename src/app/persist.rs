use std::fs;
use std::path::{Path, PathBuf};

use super::favorites;

/// File name of the persisted favorites list inside the lists directory.
const FAVORITES_FILE: &str = "favorites.json";

/// What: Default location of the persisted favorites.
///
/// Output:
/// - `favorites.json` inside the lists directory.
#[must_use]
pub fn favorites_path() -> PathBuf {
    crate::config::lists_dir().join(FAVORITES_FILE)
}

/// What: Persist the favorites cache to disk if marked dirty.
///
/// Inputs:
/// - `path`: Destination JSON file
///
/// Output:
/// - Writes the sorted favorite ids as a JSON array and clears the dirty flag.
///
/// Details:
/// - The flag is cleared even when the write fails, to avoid retrying on every tick.
pub fn maybe_flush_favorites(path: &Path) {
    if !favorites::take_dirty() {
        return;
    }
    let ids = favorites::favorite_ids();
    if let Ok(s) = serde_json::to_string(&ids) {
        tracing::debug!(
            path = %path.display(),
            count = ids.len(),
            "[Persist] Writing favorites to disk"
        );
        match fs::write(path, &s) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "[Persist] Favorites persisted");
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "[Persist] Failed to write favorites"
                );
            }
        }
    }
}

/// What: Re-hydrate the favorites cache from disk.
///
/// Inputs:
/// - `path`: JSON file written by [`maybe_flush_favorites`]
///
/// Output:
/// - Number of ids loaded; `0` when the file is missing or unreadable.
///
/// Details:
/// - Loading does not mark the cache dirty.
pub fn load_favorites(path: &Path) -> usize {
    let Ok(s) = fs::read_to_string(path) else {
        tracing::debug!(path = %path.display(), "[Persist] No favorites file");
        return 0;
    };
    match serde_json::from_str::<Vec<String>>(&s) {
        Ok(ids) => {
            let count = ids.len();
            favorites::replace_all(ids);
            favorites::take_dirty();
            tracing::info!(path = %path.display(), count, "[Persist] Favorites loaded");
            count
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "[Persist] Ignoring malformed favorites file"
            );
            0
        }
    }
}
