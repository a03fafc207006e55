//! Backend sources against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront::config::Settings;
use storefront::logic::Loader;
use storefront::sources::{
    ApiClient, ListingFilters, ListingSort, ListingsFetcher, MessageFilters, PageRequest,
    fetch_favorite_ids, fetch_listings, fetch_messages, fetch_promotions, set_favorite,
};
use storefront::state::Discount;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), &Settings::default()).expect("client")
}

fn listing(id: &str) -> serde_json::Value {
    json!({ "id": id, "title": format!("Listing {id}"), "price": 1_000, "currency": "SAR" })
}

#[tokio::test]
/// What: Loader walks an enveloped listings endpoint until the cursor runs out.
///
/// - Input: First page `{items:[A,B], nextCursor:"c1"}`, cursor page `{data:[C]}`
/// - Output: `[A,B,C]`, exhausted, second request carries `cursor=c1`
async fn loader_follows_envelope_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .and(query_param("cursor", "c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [listing("C")] })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [listing("A"), listing("B")],
            "nextCursor": "c1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut loader = Loader::new(
        ListingsFetcher {
            api: client(&server),
        },
        ListingFilters::default(),
        Some(2),
    );
    assert!(loader.first_load().await);
    assert!(loader.load_more().await);
    let ids: Vec<&str> = loader.items().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C"]);
    assert!(loader.collection().is_exhausted());
    assert!(!loader.load_more().await);
}

#[tokio::test]
/// What: A bare array response is a single terminal page.
///
/// - Input: `[A]` with no envelope
/// - Output: One item, no cursor
async fn bare_array_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listing("A")])))
        .mount(&server)
        .await;

    let page = fetch_listings(&client(&server), &PageRequest::default())
        .await
        .expect("page");
    assert_eq!(page.items.len(), 1);
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
/// What: Filters and limit reach the query string.
///
/// - Input: Search, city, sort and limit 20
/// - Output: The mock only matches when every parameter is present
async fn filters_become_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .and(query_param("search", "bike"))
        .and(query_param("city", "Riyadh"))
        .and(query_param("sort", "price_asc"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PageRequest {
        cursor: None,
        limit: Some(20),
        filters: ListingFilters {
            search: Some("bike".to_string()),
            category: None,
            city: Some("Riyadh".to_string()),
            sort: Some(ListingSort::PriceAsc),
        },
    };
    let page = fetch_listings(&client(&server), &request)
        .await
        .expect("page");
    assert!(page.items.is_empty());
}

#[tokio::test]
/// What: Non-success statuses surface as readable messages in the collection.
///
/// - Input: 404, then 500 on refresh
/// - Output: Not-found text, then the generic status text; items stay empty
async fn status_errors_are_readable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kenz/listings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut loader = Loader::new(
        ListingsFetcher {
            api: client(&server),
        },
        ListingFilters::default(),
        None,
    );
    assert!(!loader.first_load().await);
    assert_eq!(
        loader.collection().error(),
        Some("The requested items could not be found")
    );
    assert!(!loader.refresh().await);
    assert_eq!(
        loader.collection().error(),
        Some("Server responded with status 500")
    );
    assert!(loader.items().is_empty());
}

#[tokio::test]
/// What: Favorite ids accept both a bare array and an envelope.
///
/// - Input: `{items:["a","b"]}`
/// - Output: `["a","b"]`
async fn favorite_ids_from_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kenz/favorites/ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": ["a", "b"] })))
        .mount(&server)
        .await;

    let ids = fetch_favorite_ids(&client(&server)).await.expect("ids");
    assert_eq!(ids, ["a", "b"]);
}

#[tokio::test]
/// What: Favoriting uses POST, unfavoriting uses DELETE.
///
/// - Input: `set_favorite(true)` then `set_favorite(false)` for the same listing
/// - Output: Both succeed and each verb is hit exactly once
async fn set_favorite_verbs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kenz/listings/L1/favorite"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/kenz/listings/L1/favorite"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    set_favorite(&api, "L1", true).await.expect("post");
    set_favorite(&api, "L1", false).await.expect("delete");
}

#[tokio::test]
/// What: Promotions decode both discount kinds.
///
/// - Input: Percentage (snake and camel keys) and fixed promotions
/// - Output: Three promotions with the expected discounts
async fn promotions_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/promotions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "p1", "title": "Ten", "discount": { "type": "percentage", "basis_points": 1000 } },
            { "id": "p2", "title": "Camel", "discount": { "type": "percentage", "basisPoints": 500 }, "maxDiscount": 2000 },
            { "id": "p3", "title": "Flat", "discount": { "type": "fixed", "amount": 1500 }, "min_order": 5000 }
        ])))
        .mount(&server)
        .await;

    let promotions = fetch_promotions(&client(&server)).await.expect("promotions");
    assert_eq!(promotions.len(), 3);
    assert_eq!(
        promotions[0].discount,
        Discount::Percentage { basis_points: 1_000 }
    );
    assert_eq!(promotions[1].max_discount, Some(2_000));
    assert_eq!(promotions[2].discount, Discount::Fixed { amount: 1_500 });
    assert_eq!(promotions[2].min_order, Some(5_000));
}

#[tokio::test]
/// What: Ids typed by the user travel as one encoded path segment.
///
/// - Input: Unfavorite `L1?x=` and `a/b`; messages of conversation `c#frag`
/// - Output: Requests hit `/kenz/listings/{id}/favorite` and `/chat/conversations/{id}/messages`
///   with the id percent-encoded; nothing else is requested
async fn ids_are_encoded_as_single_segments() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/kenz/listings/L1%3Fx=/favorite"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/kenz/listings/a%2Fb/favorite"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/chat/conversations/c%23frag/messages"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    set_favorite(&api, "L1?x=", false).await.expect("question mark id");
    set_favorite(&api, "a/b", false).await.expect("slash id");
    let request = PageRequest {
        cursor: None,
        limit: Some(5),
        filters: MessageFilters {
            conversation_id: "c#frag".to_string(),
        },
    };
    let page = fetch_messages(&api, &request).await.expect("messages");
    assert!(page.items.is_empty());

    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 3);
}
