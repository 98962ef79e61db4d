//! The facade exposes every layer under one name.

use oti::bulk::{BulkScanConfig, BulkScanner, UrlNormalizer};
use oti::{codes, Operation, OtiClient};

#[test]
fn test_client_and_scanner_compose() {
    let client = OtiClient::builder("key")
        .base_url("http://127.0.0.1:9/api")
        .build()
        .unwrap();
    let scanner = BulkScanner::new(client, BulkScanConfig::default());
    assert_eq!(scanner.config().retries, 10);
}

#[test]
fn test_reexports() {
    assert_eq!(Operation::UrlScan.path(), "/oti/v1/url/scan");
    assert!(codes::is_quota(7066));
    assert_eq!(
        UrlNormalizer::default().normalize("Example.COM", "http").as_deref(),
        Some("http://example.com/")
    );
}
