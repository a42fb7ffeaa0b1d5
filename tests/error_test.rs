//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use photo_gallery::config::Config;
use photo_gallery::error::GalleryError;
use photo_gallery::HttpPhotoSource;

/// 不正なエンドポイント
#[test]
fn test_invalid_endpoint() {
    let result = HttpPhotoSource::new("photos.example.com", None);
    assert!(matches!(result, Err(GalleryError::InvalidUrl(_))));
}

/// エンドポイント未設定
#[test]
fn test_missing_endpoint_message() {
    let err = GalleryError::MissingEndpoint;
    let display = format!("{}", err);

    assert!(display.contains("エンドポイント"));
    assert!(display.contains("photo-gallery config"));
}

/// GalleryErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        GalleryError::Config("テスト設定エラー".to_string()),
        GalleryError::MissingEndpoint,
        GalleryError::PhotoNotFound("img001".to_string()),
        GalleryError::PageOutOfRange { requested: 9, total: 3 },
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

#[test]
fn test_page_out_of_range_message() {
    let err = GalleryError::PageOutOfRange { requested: 9, total: 3 };
    let display = format!("{}", err);
    assert!(display.contains('9'));
    assert!(display.contains('3'));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GalleryError = io_err.into();

    assert!(matches!(err, GalleryError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: GalleryError = json_err.into();

    assert!(matches!(err, GalleryError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_is_transparent() {
    let common_err = photo_gallery_common::Error::Endpoint("HTTP 502 Bad Gateway".to_string());
    let err: GalleryError = common_err.into();

    assert!(matches!(err, GalleryError::Common(_)));
    assert_eq!(format!("{}", err), "Endpoint error: HTTP 502 Bad Gateway");
}

/// 壊れた設定ファイルはJSONエラー
#[test]
fn test_corrupted_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(GalleryError::JsonParse(_))));
}
