//! Offline tests for ytharvest-db pool configuration and row types.
//! These tests do not require a live database connection.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use ytharvest_core::{AppConfig, Environment};
use ytharvest_db::{PoolConfig, StagedIngestionRow, WarehouseCounts};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        youtube_api_key: "key".to_string(),
        youtube_api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
        request_timeout_secs: 30,
        inter_request_delay_ms: 0,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`StagedIngestionRow`] has all
/// expected fields with the correct types. No database required.
#[test]
fn staged_ingestion_row_has_expected_fields() {
    let row = StagedIngestionRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        document: json!({ "channels": [], "videos": [], "comments": [] }),
        staged_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert!(row.document["channels"].is_array());
    assert!(row.document["videos"].is_array());
    assert!(row.document["comments"].is_array());
}

#[test]
fn warehouse_counts_compare_by_value() {
    let a = WarehouseCounts {
        channels: 1,
        videos: 3,
        comments: 12,
    };
    let b = a;
    assert_eq!(a, b);
}
