//! Favorite toggling against a mock backend, plus on-disk persistence.

use tokio::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront::app::favorites;
use storefront::app::persist::{load_favorites, maybe_flush_favorites};
use storefront::config::Settings;
use storefront::sources::ApiClient;

/// The favorites cache is process-wide; these tests take turns.
static CACHE_LOCK: Mutex<()> = Mutex::const_new(());

#[tokio::test]
/// What: An accepted toggle flips the cache and reports the new state.
///
/// - Input: Unfavorited `L1`; server accepts POST
/// - Output: `Ok(true)` and `is_favorite("L1")`
async fn toggle_success_flips_cache() {
    let _guard = CACHE_LOCK.lock().await;
    favorites::clear();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kenz/listings/L1/favorite"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let api = ApiClient::new(&server.uri(), &Settings::default()).expect("client");

    assert!(favorites::toggle_favorite("L1", &api).await.expect("toggle"));
    assert!(favorites::is_favorite("L1"));
    favorites::clear();
}

#[tokio::test]
/// What: A rejected toggle restores the previous flag.
///
/// - Input: Favorited `L2`; server answers 500 to DELETE
/// - Output: `Err` and `L2` still favorite
async fn toggle_failure_rolls_back() {
    let _guard = CACHE_LOCK.lock().await;
    favorites::clear();
    favorites::set("L2", true);
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/kenz/listings/L2/favorite"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let api = ApiClient::new(&server.uri(), &Settings::default()).expect("client");

    let err = favorites::toggle_favorite("L2", &api)
        .await
        .expect_err("server rejected");
    assert_eq!(err.to_string(), "Server responded with status 500");
    assert!(favorites::is_favorite("L2"));
    favorites::clear();
}

#[tokio::test]
/// What: Favorites written to disk come back after a cache reset.
///
/// - Input: `a` and `b` favorited, flushed, cache cleared, file reloaded
/// - Output: Two ids restored
async fn favorites_survive_restart() {
    let _guard = CACHE_LOCK.lock().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("favorites.json");
    favorites::clear();
    favorites::replace_all(["a".to_string(), "b".to_string()]);
    maybe_flush_favorites(&file);
    assert!(file.exists());

    favorites::clear();
    assert_eq!(load_favorites(&file), 2);
    assert_eq!(favorites::favorite_ids(), ["a", "b"]);
    favorites::clear();
}
