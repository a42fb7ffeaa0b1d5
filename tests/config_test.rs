//! 設定ファイルテスト

use photo_gallery::config::Config;
use photo_gallery::error::GalleryError;
use std::time::Duration;
use tempfile::tempdir;

/// ファイルがなければデフォルト
#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.page_size, 24);
    assert_eq!(config.endpoint, None);
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_endpoint("http://localhost:8080".to_string()).unwrap();
    config.set_page_size(12).unwrap();
    config.timeout_seconds = None;
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.timeout(), None);
}

/// 欠けたフィールドはデフォルトで補う
#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"endpoint": "https://photos.example.com/"}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.endpoint.as_deref(), Some("https://photos.example.com/"));
    assert_eq!(config.page_size, 24);
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn test_set_endpoint_rejects_invalid_url() {
    let mut config = Config::default();
    let result = config.set_endpoint("localhost".to_string());

    assert!(matches!(result, Err(GalleryError::InvalidUrl(_))));
    assert_eq!(config.endpoint, None);
}

#[test]
fn test_set_page_size_rejects_zero() {
    let mut config = Config::default();
    assert!(matches!(config.set_page_size(0), Err(GalleryError::Config(_))));
    assert_eq!(config.page_size, 24);
}

#[test]
fn test_zero_timeout_means_none() {
    let config = Config {
        timeout_seconds: Some(0),
        ..Default::default()
    };
    assert_eq!(config.timeout(), None);
}
