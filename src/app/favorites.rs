//! Process-wide cache of favorited listing ids.
//!
//! Screens never keep their own favorite flags; they ask this cache. The
//! only remote-changing operation is [`toggle_favorite`], which flips the
//! cached flag first and undoes it if the server rejects the change.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::sources::{ApiClient, Result};

/// Cached ids plus the persistence dirty flag.
#[derive(Default)]
struct FavoritesCache {
    /// Favorited listing ids.
    ids: HashSet<String>,
    /// Changed since the last flush to disk.
    dirty: bool,
}

/// Favorites shared by every screen of the process.
static FAVORITES: LazyLock<Mutex<FavoritesCache>> =
    LazyLock::new(|| Mutex::new(FavoritesCache::default()));

/// Lock the cache; a poisoned lock still holds a usable set.
fn cache() -> MutexGuard<'static, FavoritesCache> {
    FAVORITES.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What: Check whether a listing is favorited.
///
/// Inputs:
/// - `id`: Listing id.
///
/// Output:
/// - `true` when the id is cached as favorite.
#[must_use]
pub fn is_favorite(id: &str) -> bool {
    cache().ids.contains(id)
}

/// What: Snapshot of all favorited ids.
///
/// Output:
/// - Ids sorted ascending, for stable output and persistence.
#[must_use]
pub fn favorite_ids() -> Vec<String> {
    let mut ids: Vec<String> = cache().ids.iter().cloned().collect();
    ids.sort_unstable();
    ids
}

/// What: Replace the whole cache, e.g. after fetching the server's id list.
///
/// Inputs:
/// - `ids`: New favorite ids; duplicates collapse.
pub fn replace_all<I>(ids: I)
where
    I: IntoIterator<Item = String>,
{
    let mut guard = cache();
    guard.ids = ids.into_iter().collect();
    guard.dirty = true;
}

/// What: Set one listing's cached flag.
///
/// Inputs:
/// - `id`: Listing id.
/// - `favorite`: New flag.
///
/// Output:
/// - Previous flag.
pub fn set(id: &str, favorite: bool) -> bool {
    let mut guard = cache();
    let previous = if favorite {
        !guard.ids.insert(id.to_string())
    } else {
        guard.ids.remove(id)
    };
    if previous != favorite {
        guard.dirty = true;
    }
    previous
}

/// Forget every cached favorite (e.g. on sign-out).
pub fn clear() {
    let mut guard = cache();
    if !guard.ids.is_empty() {
        guard.ids.clear();
        guard.dirty = true;
    }
}

/// What: Read and reset the dirty flag.
///
/// Output:
/// - `true` when the cache changed since the previous call.
pub fn take_dirty() -> bool {
    std::mem::take(&mut cache().dirty)
}

/// Server side of a favorite toggle.
pub trait FavoriteRemote: Sync {
    /// What: Persist a favorite flag remotely.
    ///
    /// Inputs:
    /// - `id`: Listing id.
    /// - `favorite`: Flag to store.
    ///
    /// Output:
    /// - `Ok(())` when the remote accepted the change.
    fn set_favorite(&self, id: &str, favorite: bool) -> impl Future<Output = Result<()>> + Send;
}

impl FavoriteRemote for ApiClient {
    fn set_favorite(&self, id: &str, favorite: bool) -> impl Future<Output = Result<()>> + Send {
        crate::sources::set_favorite(self, id, favorite)
    }
}

/// What: Flip a listing's favorite flag, optimistically.
///
/// Inputs:
/// - `id`: Listing id.
/// - `remote`: Where the change is persisted.
///
/// Output:
/// - `Ok(new_flag)` once the remote accepted the change.
///
/// # Errors
/// - The remote's error, after the cached flag has been restored.
///
/// Details:
/// - The cache reflects the new flag while the remote call is in flight.
/// - On failure the inverse mutation is applied before the error is returned, so the
///   caller only needs to revert its own display state.
pub async fn toggle_favorite<R: FavoriteRemote>(id: &str, remote: &R) -> Result<bool> {
    let target = {
        let mut guard = cache();
        let target = !guard.ids.contains(id);
        if target {
            guard.ids.insert(id.to_string());
        } else {
            guard.ids.remove(id);
        }
        guard.dirty = true;
        target
    };
    tracing::debug!(listing_id = id, favorite = target, "optimistic favorite toggle");
    match remote.set_favorite(id, target).await {
        Ok(()) => Ok(target),
        Err(e) => {
            set(id, !target);
            tracing::warn!(listing_id = id, error = %e, "favorite toggle rejected; rolled back");
            Err(e)
        }
    }
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// Serialise tests that replace or clear the process-wide cache.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Remote that records calls and optionally rejects them.
    struct FakeRemote {
        /// Reject every call.
        fail: bool,
        /// Calls received, in order.
        calls: StdMutex<Vec<(String, bool)>>,
    }

    impl FakeRemote {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: StdMutex::new(Vec::new()),
            }
        }
    }

    impl FavoriteRemote for FakeRemote {
        fn set_favorite(
            &self,
            id: &str,
            favorite: bool,
        ) -> impl Future<Output = Result<()>> + Send {
            let observed = is_favorite(id);
            self.calls
                .lock()
                .expect("calls lock")
                .push((id.to_string(), favorite));
            let fail = self.fail;
            async move {
                assert_eq!(observed, favorite, "cache must be flipped before the call");
                if fail {
                    Err("server rejected".into())
                } else {
                    Ok(())
                }
            }
        }
    }

    #[test]
    /// What: Basic cache mutations and the dirty flag.
    ///
    /// - Input: replace_all with duplicates, set on/off, clear
    /// - Output: Sorted unique ids; dirty only after real changes
    fn cache_mutations_track_dirty() {
        let _guard = test_mutex()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        replace_all(vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(favorite_ids(), vec!["a", "b"]);
        assert!(take_dirty());
        assert!(!take_dirty());

        assert!(set("a", true));
        assert!(!take_dirty());
        assert!(!set("c", true));
        assert!(is_favorite("c"));
        assert!(take_dirty());

        clear();
        assert!(favorite_ids().is_empty());
        assert!(take_dirty());
    }

    #[tokio::test]
    #[allow(clippy::await_holding_lock)]
    /// What: A successful toggle keeps the new flag.
    ///
    /// - Input: Unfavorited id, accepting remote
    /// - Output: `Ok(true)`, cached as favorite, remote called with `true`
    async fn toggle_success_keeps_flag() {
        let _guard = test_mutex()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let remote = FakeRemote::new(false);
        let id = "toggle-success-listing";
        set(id, false);
        assert!(toggle_favorite(id, &remote).await.expect("toggle ok"));
        assert!(is_favorite(id));
        assert!(!toggle_favorite(id, &remote).await.expect("toggle ok"));
        assert!(!is_favorite(id));
        let calls = remote.calls.lock().expect("calls lock").clone();
        assert_eq!(
            calls,
            vec![(id.to_string(), true), (id.to_string(), false)]
        );
    }

    #[tokio::test]
    #[allow(clippy::await_holding_lock)]
    /// What: A rejected toggle restores the previous flag and reports the error.
    ///
    /// - Input: Favorited id, rejecting remote
    /// - Output: `Err`, still cached as favorite
    async fn toggle_failure_rolls_back() {
        let _guard = test_mutex()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let remote = FakeRemote::new(true);
        let id = "toggle-failure-listing";
        set(id, true);
        let err = toggle_favorite(id, &remote).await.expect_err("rejected");
        assert_eq!(err.to_string(), "server rejected");
        assert!(is_favorite(id));
    }
}
