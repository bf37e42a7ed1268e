//! Cursor pagination of the bulk article endpoint over HTTP.

mod support;

use futures::StreamExt;
use model::{ApiError, ArticleQuery, Cursor};
use support::{client, cursor_page};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, cursor: Option<&str>, body: serde_json::Value) {
    let mock = Mock::given(method("GET"))
        .and(path("/api/v1/bulk/articles/"))
        .and(query_param("page_size", "2"))
        .and(query_param("domain", "civil"));
    let mock = match cursor {
        Some(cursor) => mock.and(query_param("cursor", cursor)),
        None => mock.and(query_param_is_missing("cursor")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn params() -> ArticleQuery {
    ArticleQuery {
        page_size: Some(2),
        domain: Some("civil".into()),
        ..ArticleQuery::default()
    }
}

#[tokio::test]
async fn test_paginator_follows_cursor_chain_with_unchanged_params() {
    let (server, client) = client().await;
    mount_page(&server, None, cursor_page(&["a1", "a2"], Some("c2"))).await;
    mount_page(&server, Some("c2"), cursor_page(&["a3", "a4"], Some("c3"))).await;
    mount_page(&server, Some("c3"), cursor_page(&["a5"], None)).await;

    let mut paginator = client.bulk().articles(params());
    let mut batches = Vec::new();
    while let Some(batch) = paginator.next_batch().await {
        let batch = batch.expect("page should load");
        batches.push(batch.iter().map(|a| a.id.to_string()).collect::<Vec<_>>());
    }

    assert_eq!(batches, vec![vec!["a1", "a2"], vec!["a3", "a4"], vec!["a5"]]);
    assert_eq!(paginator.pages_fetched(), 3);
    assert!(paginator.is_exhausted());
}

#[tokio::test]
async fn test_paginator_stops_on_empty_page_despite_cursor() {
    let (server, client) = client().await;
    mount_page(&server, None, cursor_page(&["a1", "a2"], Some("c2"))).await;
    mount_page(&server, Some("c2"), cursor_page(&[], Some("c3"))).await;

    let items = client
        .bulk()
        .articles(params())
        .collect_all()
        .await
        .expect("walk should succeed");
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_paginator_resumes_from_given_cursor() {
    let (server, client) = client().await;
    mount_page(&server, Some("c3"), cursor_page(&["a5"], None)).await;

    let mut start = params();
    start.cursor = Cursor::new("c3");
    let items = client
        .bulk()
        .articles(start)
        .collect_all()
        .await
        .expect("walk should succeed");
    assert_eq!(items[0].id.as_str(), "a5");
}

#[tokio::test]
async fn test_paginator_stream_ends_after_error() {
    let (server, client) = client().await;
    mount_page(&server, None, cursor_page(&["a1", "a2"], Some("c2"))).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/bulk/articles/"))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let results: Vec<_> = client.bulk().articles(params()).into_stream().collect().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().map(Vec::len).ok(), Some(2));
    assert!(matches!(
        results[1],
        Err(ApiError::Http { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_single_page_fetch() {
    let (server, client) = client().await;
    mount_page(&server, None, cursor_page(&["a1"], Some("c2"))).await;

    let page = client
        .bulk()
        .article_page(&params())
        .await
        .expect("page should load");
    assert_eq!(page.next_cursor, Cursor::new("c2"));
    assert!(!page.is_last());
}
