//! Loader behavior against an in-memory page source.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use storefront::logic::Loader;
use storefront::sources::{PageFetcher, PageRequest, Result};
use storefront::state::{Cursor, Identified, Page};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Item(String);

impl Identified for Item {
    fn id(&self) -> &str {
        &self.0
    }
}

/// Replays canned pages and counts fetches.
struct Canned {
    pages: Mutex<VecDeque<std::result::Result<Page<Item>, String>>>,
    cursors: Mutex<Vec<Option<String>>>,
}

impl Canned {
    fn new(pages: Vec<std::result::Result<Page<Item>, String>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            cursors: Mutex::new(Vec::new()),
        }
    }

    fn fetches(&self) -> usize {
        self.cursors.lock().expect("lock").len()
    }
}

impl PageFetcher for Canned {
    type Item = Item;
    type Filters = ();

    fn fetch_page(
        &self,
        request: PageRequest<()>,
    ) -> impl Future<Output = Result<Page<Item>>> + Send {
        self.cursors
            .lock()
            .expect("lock")
            .push(request.cursor.map(|c| c.as_str().to_string()));
        let next = self.pages.lock().expect("lock").pop_front();
        async move {
            match next {
                Some(Ok(page)) => Ok(page),
                Some(Err(msg)) => Err(msg.into()),
                None => Err("no more canned pages".into()),
            }
        }
    }
}

fn items(ids: &[&str]) -> Vec<Item> {
    ids.iter().map(|id| Item((*id).to_string())).collect()
}

fn ids(loader: &Loader<Canned>) -> Vec<&str> {
    loader.items().iter().map(|i| i.0.as_str()).collect()
}

#[tokio::test]
/// What: `[A,B]`+`c1`, then `[C]` without cursor accumulates and exhausts.
///
/// - Input: Two canned pages, then an extra `load_more`
/// - Output: `[A,B,C]`, exhausted, the extra call performs no fetch
async fn accumulate_then_exhaust() {
    let mut loader = Loader::new(
        Canned::new(vec![
            Ok(Page::new(items(&["A", "B"]), Cursor::new("c1"))),
            Ok(Page::bare(items(&["C"]))),
        ]),
        (),
        None,
    );
    assert!(loader.first_load().await);
    assert!(loader.load_more().await);
    assert_eq!(ids(&loader), ["A", "B", "C"]);
    assert!(loader.collection().is_exhausted());

    assert!(!loader.load_more().await);
    assert!(!loader.load_more().await);
    assert_eq!(loader.fetcher().fetches(), 2);
    assert!(loader.collection().is_exhausted());
}

#[tokio::test]
/// What: A bare first page exhausts the collection immediately.
///
/// - Input: First page without cursor
/// - Output: Exhausted, `can_load_more` false, no further fetch
async fn bare_first_page_is_terminal() {
    let mut loader = Loader::new(Canned::new(vec![Ok(Page::bare(items(&["A"])))]), (), None);
    assert!(loader.first_load().await);
    assert!(loader.collection().is_exhausted());
    assert!(!loader.collection().can_load_more());
    assert!(!loader.load_more().await);
    assert_eq!(loader.fetcher().fetches(), 1);
}

#[tokio::test]
/// What: First load failure, then refresh recovers.
///
/// - Input: Error, then `[A]`
/// - Output: Empty with error and idle flags; after refresh `[A]` and no error
async fn failure_then_refresh() {
    let mut loader = Loader::new(
        Canned::new(vec![
            Err("Could not reach the server".to_string()),
            Ok(Page::bare(items(&["A"]))),
        ]),
        (),
        None,
    );
    assert!(!loader.first_load().await);
    let c = loader.collection();
    assert!(c.is_empty());
    assert_eq!(c.error(), Some("Could not reach the server"));
    assert!(!c.is_loading() && !c.is_loading_more());

    assert!(loader.refresh().await);
    assert_eq!(ids(&loader), ["A"]);
    assert!(loader.collection().error().is_none());
}

#[tokio::test]
/// What: A failed append keeps accumulated items and allows a retry at the same cursor.
///
/// - Input: `[A]`+`c1`, failed append, then `[B]`
/// - Output: `[A]` with error, then `[A,B]`; the retry reuses `c1`
async fn failed_append_keeps_items() {
    let mut loader = Loader::new(
        Canned::new(vec![
            Ok(Page::new(items(&["A"]), Cursor::new("c1"))),
            Err("timeout".to_string()),
            Ok(Page::bare(items(&["B"]))),
        ]),
        (),
        None,
    );
    loader.first_load().await;
    assert!(!loader.load_more().await);
    assert_eq!(ids(&loader), ["A"]);
    assert_eq!(loader.collection().error(), Some("timeout"));
    assert!(!loader.collection().is_exhausted());

    assert!(loader.load_more().await);
    assert_eq!(ids(&loader), ["A", "B"]);
    let cursors = loader.fetcher().cursors.lock().expect("lock").clone();
    assert_eq!(
        cursors,
        vec![None, Some("c1".to_string()), Some("c1".to_string())]
    );
}

#[tokio::test]
/// What: Removing an item never changes paging state or triggers a fetch.
///
/// - Input: `[A,B]`+`c1`; remove `B` twice
/// - Output: Length drops by one then stays; cursor kept; one fetch total
async fn remove_is_local() {
    let mut loader = Loader::new(
        Canned::new(vec![Ok(Page::new(items(&["A", "B"]), Cursor::new("c1")))]),
        (),
        None,
    );
    loader.first_load().await;
    assert!(loader.remove_item("B").is_some());
    assert!(loader.remove_item("B").is_none());
    assert_eq!(ids(&loader), ["A"]);
    assert_eq!(loader.collection().cursor().map(Cursor::as_str), Some("c1"));
    assert_eq!(loader.fetcher().fetches(), 1);
}
