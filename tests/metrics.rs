//! Scraping node metrics.

use creditcoin_cli::observability::{fetch_metrics, find_sample};

mod common;

const HASH_COUNT: &str = "creditcoin_node_hash_count";

#[tokio::test]
async fn test_hash_count_from_fixture() {
    let addr = common::start_metrics_fixture(common::render_node_metrics(1234)).await;

    let text = fetch_metrics(&format!("http://{}", addr)).await.unwrap();
    assert_eq!(find_sample(&text, HASH_COUNT, &[("chain", "dev")]), Some(1234));
    assert_eq!(
        find_sample(&text, "substrate_block_height", &[("status", "best"), ("chain", "dev")]),
        Some(42)
    );
}

#[tokio::test]
async fn test_fixture_missing_route() {
    let addr = common::start_metrics_fixture(String::new()).await;
    // Only /metrics is routed.
    let err = fetch_metrics(&format!("http://{}/nested/", addr)).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
#[ignore = "requires a running dev node exposing Prometheus metrics"]
async fn test_node_hash_count_is_positive() {
    let config = common::network_config();
    let text = fetch_metrics(&config.observability.metrics_url).await.unwrap();

    let count = find_sample(&text, HASH_COUNT, &[("chain", "dev")])
        .expect("creditcoin_node_hash_count{chain=\"dev\"} present");
    assert!(count > 0);
}
