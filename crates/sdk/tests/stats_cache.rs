//! StatsCache freshness and request sharing.

mod support;

use std::time::Duration;

use sdk::StatsCache;
use support::{client, stats};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_concurrent_misses_share_one_request() {
    let (server, client) = client().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(stats())
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cache = StatsCache::new(Duration::from_secs(60));
    let (a, b) = tokio::join!(cache.get_or_fetch(&client), cache.get_or_fetch(&client));
    assert_eq!(a.unwrap(), b.unwrap());

    cache.get_or_fetch(&client).await.expect("cached stats");
}

#[tokio::test]
async fn test_expired_entry_is_refetched() {
    let (server, client) = client().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats()))
        .expect(2)
        .mount(&server)
        .await;

    let cache = StatsCache::new(Duration::from_millis(50));
    cache.get_or_fetch(&client).await.expect("first fetch");
    tokio::time::sleep(Duration::from_millis(120)).await;
    cache.get_or_fetch(&client).await.expect("second fetch");
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let (server, client) = client().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats()))
        .expect(2)
        .mount(&server)
        .await;

    let cache = StatsCache::default();
    cache.get_or_fetch(&client).await.expect("first fetch");
    cache.invalidate().await;
    cache.get_or_fetch(&client).await.expect("second fetch");
}

#[tokio::test]
async fn test_errors_are_not_cached() {
    let (server, client) = client().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats()))
        .expect(1)
        .mount(&server)
        .await;

    let cache = StatsCache::new(Duration::from_secs(60));
    assert!(cache.get_or_fetch(&client).await.is_err());
    let fresh = cache.get_or_fetch(&client).await.expect("retry after failure");
    assert_eq!(fresh.total_laws, 12000);
}
