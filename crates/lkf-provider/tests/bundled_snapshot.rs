//! The snapshot shipped in `data/` must load and classify as expected.

use lkf_common::{AlertLevel, Trend};
use lkf_provider::{create_provider, DataProvider, ProviderConfig, SnapshotProvider};

const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/snapshot.json");

#[tokio::test]
async fn test_bundled_snapshot_loads() {
    let provider = SnapshotProvider::from_file(BUNDLED).unwrap();

    let stations = provider.stations().await.unwrap();
    assert_eq!(stations.len(), 10);
    assert!(stations.iter().all(|s| s.current_level.is_some()));

    let basins = provider.basins().await.unwrap();
    assert_eq!(basins.len(), 8);
    assert!(basins.iter().all(|b| b.area_km2.is_some()));
}

#[tokio::test]
async fn test_bundled_snapshot_alerts() {
    let provider = SnapshotProvider::from_file(BUNDLED).unwrap();
    let alerts = provider.alerts().await.unwrap();

    let order: Vec<(&str, AlertLevel)> = alerts
        .iter()
        .map(|a| (a.station_id.as_str(), a.alert_type))
        .collect();
    assert_eq!(
        order,
        vec![
            ("nagalagam-street", AlertLevel::Critical),
            ("ratnapura", AlertLevel::Danger),
            ("baddegama", AlertLevel::Warning),
            ("hanwella", AlertLevel::Warning),
        ]
    );
}

#[tokio::test]
async fn test_bundled_snapshot_trends() {
    let provider = create_provider(&ProviderConfig {
        snapshot_path: BUNDLED.into(),
        ..ProviderConfig::default()
    })
    .unwrap();

    let rising = provider.level("ratnapura").await.unwrap().unwrap();
    assert_eq!(rising.trend, Trend::Rising);

    // 3.9 -> 3.92 is within tolerance
    let steady = provider.level("thimbolketiya").await.unwrap().unwrap();
    assert_eq!(steady.trend, Trend::Stable);

    let history = provider.station_history("hanwella", 2).await.unwrap().unwrap();
    assert_eq!(history.len(), 3);
}
