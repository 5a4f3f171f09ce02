mod common;

use chrono::Duration;
use common::{markets, search_payload, server_error, setup};
use serde_json::json;

#[tokio::test(start_paused = true)]
async fn test_search_filters_locally() {
    let (cw, transport, _) = setup();
    transport.set("/search", Ok(search_payload()));

    let found = cw.search_coins_intelligent("wrapped").await.unwrap();
    assert_eq!(found.results.len(), 1);
    assert_eq!(found.results[0].id, "wrapped-bitcoin");
    assert!(found.suggestions.is_empty());
    assert_eq!(found.query, "wrapped");
}

#[tokio::test(start_paused = true)]
async fn test_query_is_normalized_before_caching() {
    let (cw, transport, _) = setup();
    transport.set("/search", Ok(search_payload()));

    let a = cw.search_coins_intelligent("  BitCoin ").await.unwrap();
    let b = cw.search_coins_intelligent("bitcoin").await.unwrap();

    assert_eq!(a.results, b.results);
    assert_eq!(a.results.len(), 3);
    assert_eq!(transport.call_count("/search"), 1);
    let call = &transport.calls()[0];
    assert_eq!(call.options.query, vec![("query".to_string(), "bitcoin".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_no_match_returns_top_coin_suggestions() {
    let (cw, transport, _) = setup();
    transport.set("/search", Ok(search_payload()));
    transport.set("/coins/markets", Ok(markets()));

    let found = cw.search_coins_intelligent("zzz").await.unwrap();
    assert!(found.results.is_empty());
    assert_eq!(found.suggestions.len(), 5);
    assert_eq!(found.suggestions[0].symbol, "BTC");
    assert_eq!(found.suggestions[0].thumb.as_deref(), Some("https://img.test/bitcoin.png"));

    let markets_call = transport
        .calls()
        .into_iter()
        .find(|c| c.path == "/coins/markets")
        .unwrap();
    assert!(markets_call
        .options
        .query
        .contains(&("per_page".to_string(), "10".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_suggestion_failure_is_not_an_error() {
    let (cw, transport, _) = setup();
    transport.set("/search", Ok(json!({"coins": []})));
    transport.set("/coins/markets", server_error());

    let found = cw.search_coins_intelligent("zzz").await.unwrap();
    assert!(found.results.is_empty());
    assert!(found.suggestions.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_makes_no_call() {
    let (cw, transport, _) = setup();

    let found = cw.search_coins_intelligent("   ").await.unwrap();
    assert!(found.results.is_empty());
    assert!(found.suggestions.is_empty());
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_raw_search_is_uncached() {
    let (cw, transport, _) = setup();
    transport.set("/search", Ok(search_payload()));

    let raw = cw.search_coins("bit").await.unwrap();
    cw.search_coins("bit").await.unwrap();

    assert_eq!(raw.coins.len(), 3);
    assert_eq!(transport.call_count("/search"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_search_served_from_fallback_is_flagged_stale() {
    let (cw, transport, clock) = setup();
    transport.set("/search", Ok(search_payload()));

    let live = cw.search_coins_intelligent("bitcoin").await.unwrap();
    assert!(!live.is_fallback);

    clock.advance(Duration::minutes(5));
    transport.set("/search", server_error());

    let stale = cw.search_coins_intelligent("bitcoin").await.unwrap();
    assert!(stale.is_fallback);
    assert_eq!(stale.results, live.results);
    assert_eq!(transport.call_count("/search"), 2);

    let json = serde_json::to_value(&stale).unwrap();
    assert_eq!(json["isFallback"], true);
}
