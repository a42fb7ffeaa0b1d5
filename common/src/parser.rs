//! 写真APIレスポンスパーサー
//!
//! `/api/photos` のJSONを読み取り、PageResult / PhotoRef に変換する。
//! `totalPages` の欠落・0と空の `photos` 配列は許容し、
//! `photos` 自体の欠落やURLのない写真は MalformedResponse とする。

use crate::error::{Error, Result};
use crate::types::{PageRequest, PageResult, PhotoRef};
use serde::Deserialize;

/// ワイヤ上のページ
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePage {
    photos: Option<Vec<WirePhoto>>,
    page: Option<i64>,
    total_pages: Option<i64>,
    total_elements: Option<i64>,
}

/// ワイヤ上の写真
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePhoto {
    id: Option<String>,
    filename: Option<String>,
    thumbnail_url: Option<String>,
    full_size_url: Option<String>,
}

impl WirePhoto {
    fn into_photo_ref(self, position: usize) -> Result<PhotoRef> {
        let thumbnail_url = self.thumbnail_url.ok_or_else(|| {
            Error::MalformedResponse(format!("photos[{}]: thumbnailUrl がありません", position))
        })?;
        let full_size_url = self.full_size_url.ok_or_else(|| {
            Error::MalformedResponse(format!("photos[{}]: fullSizeUrl がありません", position))
        })?;

        Ok(PhotoRef {
            id: self.id,
            thumbnail_url,
            full_size_url,
            label: self.filename.unwrap_or_default(),
        })
    }
}

/// 負の値は0として扱う
fn non_negative(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// ページレスポンスをパース
///
/// # Arguments
/// * `body` - レスポンスボディ
/// * `request` - このレスポンスを要求したPageRequest（`page` 欠落時の補完に使用）
///
/// # Returns
/// * `Ok(PageResult)` - パース成功
/// * `Err(Error::MalformedResponse)` - JSONが不正、または必須フィールドの欠落
pub fn parse_page_response(body: &str, request: &PageRequest) -> Result<PageResult> {
    let wire: WirePage = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("ページJSONパースエラー: {}", e)))?;

    let photos = wire
        .photos
        .ok_or_else(|| Error::MalformedResponse("photos がありません".into()))?;

    let items = photos
        .into_iter()
        .enumerate()
        .map(|(i, p)| p.into_photo_ref(i))
        .collect::<Result<Vec<_>>>()?;

    Ok(PageResult {
        items,
        current_page_index: wire.page.map_or(request.page_index, non_negative),
        total_pages: wire.total_pages.map_or(0, non_negative),
        total_elements: wire.total_elements.map(|n| n.max(0) as u64),
    })
}

/// 単体の写真レスポンスをパース
///
/// `GET /api/photos/{id}` の結果
pub fn parse_photo_response(body: &str) -> Result<PhotoRef> {
    let wire: WirePhoto = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("写真JSONパースエラー: {}", e)))?;
    wire.into_photo_ref(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page_index: u32) -> PageRequest {
        PageRequest::new(page_index, 24)
    }

    // =============================================
    // parse_page_response テスト
    // =============================================

    #[test]
    fn test_parse_page_response() {
        let body = r#"{
  "photos": [
    {"id": "a1", "filename": "sunset.jpg", "thumbnailUrl": "/api/photos/a1/thumbnail", "fullSizeUrl": "/api/photos/a1/full"},
    {"id": "b2", "filename": "harbor.jpg", "thumbnailUrl": "/api/photos/b2/thumbnail", "fullSizeUrl": "/api/photos/b2/full"}
  ],
  "page": 1,
  "size": 24,
  "totalPages": 5,
  "totalElements": 110
}"#;

        let result = parse_page_response(body, &request(1)).unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].label, "sunset.jpg");
        assert_eq!(result.items[0].id.as_deref(), Some("a1"));
        assert_eq!(result.items[1].full_size_url, "/api/photos/b2/full");
        assert_eq!(result.current_page_index, 1);
        assert_eq!(result.total_pages, 5);
        assert_eq!(result.total_elements, Some(110));
    }

    #[test]
    fn test_parse_page_response_empty_photos() {
        let body = r#"{"photos": [], "page": 0, "totalPages": 0}"#;

        let result = parse_page_response(body, &request(0)).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_parse_page_response_missing_total_pages() {
        let body = r#"{"photos": [{"thumbnailUrl": "/t", "fullSizeUrl": "/f"}]}"#;

        let result = parse_page_response(body, &request(4)).unwrap();
        assert_eq!(result.total_pages, 0);
        // page が無い場合は要求したページを採用
        assert_eq!(result.current_page_index, 4);
        assert_eq!(result.items[0].label, "");
    }

    #[test]
    fn test_parse_page_response_negative_numbers() {
        let body = r#"{"photos": [], "page": -1, "totalPages": -3}"#;

        let result = parse_page_response(body, &request(0)).unwrap();
        assert_eq!(result.current_page_index, 0);
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_parse_page_response_missing_photos() {
        let body = r#"{"page": 0, "totalPages": 3}"#;

        let result = parse_page_response(body, &request(0));
        match result {
            Err(Error::MalformedResponse(msg)) => assert!(msg.contains("photos")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_page_response_photo_without_url() {
        let body = r#"{"photos": [{"filename": "x.jpg", "thumbnailUrl": "/t"}], "totalPages": 1}"#;

        let result = parse_page_response(body, &request(0));
        match result {
            Err(Error::MalformedResponse(msg)) => assert!(msg.contains("fullSizeUrl")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_page_response_not_json() {
        let result = parse_page_response("<html>502 Bad Gateway</html>", &request(0));
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    // =============================================
    // parse_photo_response テスト
    // =============================================

    #[test]
    fn test_parse_photo_response() {
        let body = r#"{"id": "a1", "filename": "sunset.jpg", "thumbnailUrl": "/t/a1", "fullSizeUrl": "/f/a1"}"#;

        let photo = parse_photo_response(body).unwrap();
        assert_eq!(photo.id.as_deref(), Some("a1"));
        assert_eq!(photo.thumbnail_url, "/t/a1");
    }

    #[test]
    fn test_parse_photo_response_error() {
        assert!(parse_photo_response("{}").is_err());
    }
}
