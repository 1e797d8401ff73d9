//! Tests for pagination module

use super::*;
use crate::cache::{Cache, MemoryCache};
use crate::error::Error;
use crate::request::{RequestParams, ResponseCallback, ResponseInfo};
use crate::spec::Operation;
use crate::types::Method;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue, EXPIRES};
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_str(value).unwrap());
    }
    map
}

fn orders_op() -> Arc<Operation> {
    Arc::new(Operation {
        operation_id: "get_markets_region_id_orders".to_string(),
        name: "get_markets_region_id_orders".to_string(),
        resource: "Market".to_string(),
        method: Method::GET,
        path: "/markets/{region_id}/orders/".to_string(),
        params: Vec::new(),
        summary: String::new(),
        deprecated: false,
        require_authorization: false,
        paginated: true,
    })
}

fn iterator(server: &MockServer, cache: Option<Arc<dyn Cache>>) -> PageIterator {
    let params = RequestParams::new(
        Method::GET,
        format!("{}/markets/10000002/orders/", server.uri()),
    );
    PageIterator::new(Client::new(), params, Some(orders_op()), Vec::new(), None, cache)
}

fn http_date(offset: ChronoDuration) -> String {
    (Utc::now() + offset).to_rfc2822()
}

async fn mount_pages(server: &MockServer, total: u32) {
    for page in 1..=total {
        Mock::given(method("GET"))
            .and(path("/markets/10000002/orders/"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Pages", total.to_string().as_str())
                    .set_body_json(json!([{"order_id": page}])),
            )
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// Header Parsing Tests
// ============================================================================

#[test_case(&[("x-pages", "3")], 3 ; "present")]
#[test_case(&[("x-pages", " 12 ")], 12 ; "whitespace")]
#[test_case(&[], 1 ; "absent")]
#[test_case(&[("x-pages", "many")], 1 ; "unparseable")]
fn test_parse_num_pages(pairs: &[(&'static str, &str)], expected: u32) {
    assert_eq!(parse_num_pages(&headers(pairs)), expected);
}

#[test]
fn test_parse_expires_rfc2822() {
    let map = headers(&[("expires", "Thu, 01 Jan 2026 12:30:00 GMT")]);
    let expected = Utc.with_ymd_and_hms(2026, 1, 1, 12, 30, 0).unwrap();
    assert_eq!(parse_expires(&map), Some(expected));
}

#[test]
fn test_parse_expires_converts_offset() {
    let map = headers(&[("expires", "Thu, 01 Jan 2026 14:30:00 +0200")]);
    let expected = Utc.with_ymd_and_hms(2026, 1, 1, 12, 30, 0).unwrap();
    assert_eq!(parse_expires(&map), Some(expected));
}

#[test]
fn test_parse_expires_missing_or_invalid() {
    assert_eq!(parse_expires(&HeaderMap::new()), None);
    assert_eq!(parse_expires(&headers(&[("expires", "0")])), None);
}

// ============================================================================
// Error Mapping Tests
// ============================================================================

#[test]
fn test_classify_server_error_and_bad_request() {
    let err = classify_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    assert!(err.is_esi());
    assert!(err.message().unwrap().contains("boom"));

    let err = classify_error(StatusCode::BAD_REQUEST, "{\"error\":\"bad\"}");
    assert!(err.is_esi());
    assert!(err.message().unwrap().starts_with("400"));
}

#[test_case("{\"error\":\"Character not found\"}", "Character not found" ; "error field")]
#[test_case("{\"detail\":\"x\"}", NOT_FOUND_FALLBACK ; "object without error")]
fn test_classify_not_found(body: &str, expected: &str) {
    let err = classify_error(StatusCode::NOT_FOUND, body);
    assert!(err.is_not_found());
    assert_eq!(err.message(), Some(expected));
}

#[test]
fn test_classify_not_found_non_json() {
    let err = classify_error(StatusCode::NOT_FOUND, "<html>nope</html>");
    assert!(err.is_not_found());
    let message = err.message().unwrap();
    assert!(!message.is_empty());
    assert_ne!(message, NOT_FOUND_FALLBACK);
}

#[test]
fn test_classify_forbidden() {
    let err = classify_error(StatusCode::FORBIDDEN, "{\"error\":\"token is expired\"}");
    assert!(err.is_forbidden());
    assert_eq!(err.message(), Some(crate::error::ACCESS_DENIED));
}

#[test]
fn test_classify_other_status() {
    let err = classify_error(StatusCode::BAD_GATEWAY, "upstream");
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

// ============================================================================
// Iterator Tests
// ============================================================================

#[tokio::test]
async fn test_iterates_every_reported_page() {
    let server = MockServer::start().await;
    mount_pages(&server, 3).await;

    let mut pages = iterator(&server, None);
    assert!(pages.has_next());

    let mut seen = Vec::new();
    while let Some(page) = pages.next_page().await.unwrap() {
        seen.push(page);
    }

    assert_eq!(
        seen,
        vec![
            json!([{"order_id": 1}]),
            json!([{"order_id": 2}]),
            json!([{"order_id": 3}]),
        ]
    );
    assert_eq!(pages.num_pages(), 3);
    assert!(!pages.has_next());
    assert!(pages.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_single_page_without_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .expect(1)
        .mount(&server)
        .await;

    let pages = iterator(&server, None).collect_pages().await.unwrap();
    assert_eq!(pages, vec![json!([1, 2])]);
}

#[tokio::test]
async fn test_collect_items_flattens() {
    let server = MockServer::start().await;
    mount_pages(&server, 2).await;

    let items = iterator(&server, None).collect_items().await.unwrap();
    assert_eq!(items, vec![json!({"order_id": 1}), json!({"order_id": 2})]);
}

#[tokio::test]
async fn test_into_stream() {
    let server = MockServer::start().await;
    mount_pages(&server, 2).await;

    let pages: Vec<_> = iterator(&server, None)
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(pages.len(), 2);
}

#[tokio::test]
async fn test_error_page_keeps_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
        .mount(&server)
        .await;

    let mut pages = iterator(&server, None);
    let err = pages.next_page().await.unwrap_err();
    assert!(err.is_esi());
    assert_eq!(pages.page(), 1);
    assert!(pages.has_next());
}

#[tokio::test]
async fn test_not_found_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Type not found"})),
        )
        .mount(&server)
        .await;

    let err = iterator(&server, None).get().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), Some("Type not found"));
}

#[tokio::test]
async fn test_response_callbacks_invoked() {
    let server = MockServer::start().await;
    mount_pages(&server, 2).await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let callback: ResponseCallback = Arc::new(move |info: &ResponseInfo, op: &Operation| {
        assert_eq!(info.status, 200);
        assert_eq!(op.name, "get_markets_region_id_orders");
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let params = RequestParams::new(
        Method::GET,
        format!("{}/markets/10000002/orders/", server.uri()),
    );
    let pages = PageIterator::new(
        Client::new(),
        params,
        Some(orders_op()),
        vec![callback],
        None,
        None,
    );
    pages.collect_pages().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Cache Tests
// ============================================================================

#[tokio::test]
async fn test_cached_page_served_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(EXPIRES.as_str(), http_date(ChronoDuration::minutes(5)).as_str())
                .set_body_json(json!([{"order_id": 1}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let shared: Arc<dyn Cache> = cache.clone();

    let first = iterator(&server, Some(Arc::clone(&shared)))
        .collect_pages()
        .await
        .unwrap();
    assert_eq!(cache.len(), 1);

    let second = iterator(&server, Some(shared))
        .collect_pages()
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_expires_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let cache = Arc::new(MemoryCache::new());
    let shared: Arc<dyn Cache> = cache.clone();

    for _ in 0..2 {
        let value = iterator(&server, Some(Arc::clone(&shared)))
            .get()
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
    }
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_expired_response_not_reused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(EXPIRES.as_str(), http_date(-ChronoDuration::minutes(5)).as_str())
                .set_body_json(json!([])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let shared: Arc<dyn Cache> = Arc::new(MemoryCache::new());
    for _ in 0..2 {
        iterator(&server, Some(Arc::clone(&shared)))
            .get()
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_cache_key_depends_on_page() {
    let server = MockServer::start().await;
    mount_pages(&server, 2).await;

    let mut pages = iterator(&server, None);
    pages.next_page().await.unwrap();
    let first = pages.cache_key();
    pages.next_page().await.unwrap();
    assert_ne!(first, pages.cache_key());
}
