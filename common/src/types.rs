//! ギャラリーの型定義
//!
//! ネイティブとWeb(WASM)で共有される型:
//! - PageRequest: 1回のフェッチで要求するページ
//! - PageResult: エンドポイントから返った1ページ分の結果
//! - PhotoRef: サムネイルとフルサイズ画像への参照

use serde::{Deserialize, Serialize};

/// 1ページあたりのデフォルト件数
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// フェッチ1回分の要求（フェッチごとに不変）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page_index: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// `page_size` が0の場合は1に切り上げる
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// `page=..&size=..` 形式のクエリ文字列
    pub fn query_string(&self) -> String {
        format!("page={}&size={}", self.page_index, self.page_size)
    }
}

/// 写真への参照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    /// エンドポイントが返すID（単体取得に使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub thumbnail_url: String,

    pub full_size_url: String,

    /// 表示用ラベル（ワイヤ上は `filename`）
    #[serde(rename = "filename", default)]
    pub label: String,
}

/// 1ページ分の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    pub items: Vec<PhotoRef>,
    pub current_page_index: u32,
    pub total_pages: u32,
    /// 全件数（エンドポイントが返した場合のみ）
    pub total_elements: Option<u64>,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_query_string() {
        let request = PageRequest::new(3, 24);
        assert_eq!(request.query_string(), "page=3&size=24");
    }

    #[test]
    fn test_page_request_zero_size_is_clamped() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page_size, 1);
    }

    #[test]
    fn test_photo_ref_uses_filename_on_the_wire() {
        let json = r#"{"thumbnailUrl": "/t/1", "fullSizeUrl": "/f/1", "filename": "beach.jpg"}"#;
        let photo: PhotoRef = serde_json::from_str(json).unwrap();
        assert_eq!(photo.label, "beach.jpg");
        assert_eq!(photo.id, None);

        let back = serde_json::to_value(&photo).unwrap();
        assert_eq!(back["filename"], "beach.jpg");
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_photo_ref_label_defaults_to_empty() {
        let json = r#"{"id": "abc", "thumbnailUrl": "/t", "fullSizeUrl": "/f"}"#;
        let photo: PhotoRef = serde_json::from_str(json).unwrap();
        assert_eq!(photo.label, "");
        assert_eq!(photo.id.as_deref(), Some("abc"));
    }
}
