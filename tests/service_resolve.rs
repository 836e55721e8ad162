mod common;

use chrono::Duration;
use shortreg::error::AppError;

#[tokio::test]
async fn test_resolve_end_to_end_ttl_scenario() {
    let env = common::create_test_env();

    let record = env
        .registry
        .shorten("https://example.com/a", Some(1), None)
        .await
        .unwrap();

    // Immediately resolvable, counting one visit.
    let resolved = env.registry.resolve(&record.shortcode).await.unwrap();
    assert_eq!(resolved.long_url, "https://example.com/a");
    assert_eq!(resolved.visits, 1);

    // Two minutes later the window has elapsed.
    env.clock.advance(Duration::minutes(2));
    let result = env.registry.resolve(&record.shortcode).await;
    assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));

    // The failed resolution left the counter alone.
    let entries = env.registry.list_all().await.unwrap();
    assert_eq!(entries[0].record.visits, 1);
    assert!(entries[0].is_expired);
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let env = common::create_test_env();

    let result = env.registry.resolve("nosuch").await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_visits_increase_by_exactly_one_per_resolution() {
    let env = common::create_test_env();

    let record = env
        .registry
        .shorten("https://example.com", Some(60), None)
        .await
        .unwrap();

    for expected in 1..=5 {
        let resolved = env.registry.resolve(&record.shortcode).await.unwrap();
        assert_eq!(resolved.visits, expected);
    }

    let entries = env.registry.list_all().await.unwrap();
    assert_eq!(entries[0].record.visits, 5);
}

#[tokio::test]
async fn test_resolve_fails_at_exact_expiry_instant() {
    let env = common::create_test_env();

    let record = env
        .registry
        .shorten("https://example.com", Some(10), None)
        .await
        .unwrap();

    // One tick before expiry still resolves.
    env.clock.advance(Duration::minutes(10) - Duration::seconds(1));
    assert!(env.registry.resolve(&record.shortcode).await.is_ok());

    // At exactly created_at + validity the window is closed.
    env.clock.advance(Duration::seconds(1));
    let result = env.registry.resolve(&record.shortcode).await;
    assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
}

#[tokio::test]
async fn test_resolve_after_deactivate() {
    let env = common::create_test_env();

    let record = env
        .registry
        .shorten("https://example.com", Some(60), None)
        .await
        .unwrap();
    env.registry.resolve(&record.shortcode).await.unwrap();

    env.registry.deactivate(&record.shortcode).await.unwrap();

    let result = env.registry.resolve(&record.shortcode).await;
    assert!(matches!(result.unwrap_err(), AppError::Inactive { .. }));

    // No visit was recorded for the refused resolution.
    let entries = env.registry.list_all().await.unwrap();
    assert_eq!(entries[0].record.visits, 1);
}

#[tokio::test]
async fn test_expired_record_is_not_purged() {
    let env = common::create_test_env();

    let record = env
        .registry
        .shorten("https://example.com", Some(1), None)
        .await
        .unwrap();

    env.clock.advance(Duration::minutes(5));
    let _ = env.registry.resolve(&record.shortcode).await;

    // Lazy expiry: the record stays in storage, merely unresolvable.
    let entries = env.registry.list_all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_expired);
}
