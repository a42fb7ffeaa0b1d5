//! HTTP経由の写真API
//!
//! - 一覧: `GET {endpoint}/api/photos?page={i}&size={n}`
//! - 単体: `GET {endpoint}/api/photos/{id}`

use super::PhotoSource;
use crate::error::{GalleryError, Result};
use photo_gallery_common::{
    parse_page_response, parse_photo_response, Error, PageRequest, PageResult, PhotoRef,
};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

const PHOTOS_PATH: &str = "api/photos";

#[derive(Debug, Clone)]
pub struct HttpPhotoSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpPhotoSource {
    /// `timeout` は応答が返らない場合の外側の打ち切り（コアにはタイムアウトがない）
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base = Url::parse(endpoint)?;
        if base.cannot_be_a_base() {
            return Err(GalleryError::Config(format!(
                "ベースURLとして使えません: {}",
                endpoint
            )));
        }
        // join で最後のセグメントが置き換わらないように末尾を / にする
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn page_url(&self, request: &PageRequest) -> Result<Url> {
        let mut url = self.base.join(PHOTOS_PATH)?;
        url.query_pairs_mut()
            .append_pair("page", &request.page_index.to_string())
            .append_pair("size", &request.page_size.to_string());
        Ok(url)
    }

    pub fn photo_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base.join(PHOTOS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| GalleryError::Config(format!("ベースURLが不正です: {}", self.base)))?
            .push(id);
        Ok(url)
    }

    /// 写真1件のメタデータを取得
    pub async fn fetch_photo(&self, id: &str) -> Result<PhotoRef> {
        let url = self.photo_url(id)?;
        log::info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Endpoint(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GalleryError::PhotoNotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(Error::Endpoint(format!("HTTP {}", status)).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Endpoint(e.to_string()))?;
        Ok(parse_photo_response(&body)?)
    }
}

impl PhotoSource for HttpPhotoSource {
    async fn fetch_page(&self, request: &PageRequest) -> photo_gallery_common::Result<PageResult> {
        let url = self
            .page_url(request)
            .map_err(|e| Error::Endpoint(e.to_string()))?;
        log::info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Endpoint(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Endpoint(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Endpoint(e.to_string()))?;
        parse_page_response(&body, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 1回だけ決まった応答を返すローカルサーバーを立て、そのURLを返す
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    fn source_for(endpoint: &str) -> HttpPhotoSource {
        HttpPhotoSource::new(endpoint, Some(Duration::from_secs(5))).unwrap()
    }

    // =============================================
    // 応答の変換
    // =============================================

    #[tokio::test]
    async fn test_fetch_page_success() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"photos":[{"id":"a","filename":"a.jpg","thumbnailUrl":"/t/a","fullSizeUrl":"/f/a"}],"page":0,"totalPages":1,"totalElements":1}"#,
        )
        .await;

        let page = source_for(&endpoint)
            .fetch_page(&PageRequest::new(0, 24))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].full_size_url, "/f/a");
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, Some(1));
    }

    #[tokio::test]
    async fn test_fetch_page_server_error_is_endpoint_error() {
        let endpoint = serve_once("500 Internal Server Error", "{}").await;

        let result = source_for(&endpoint).fetch_page(&PageRequest::new(0, 24)).await;
        match result {
            Err(Error::Endpoint(message)) => assert!(message.contains("500")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_missing_photos_is_malformed() {
        let endpoint = serve_once("200 OK", r#"{"page":0}"#).await;

        let result = source_for(&endpoint).fetch_page(&PageRequest::new(0, 24)).await;
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_fetch_photo_not_found() {
        let endpoint = serve_once("404 Not Found", "{}").await;

        let result = source_for(&endpoint).fetch_photo("missing").await;
        match result {
            Err(GalleryError::PhotoNotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_endpoint_error() {
        // 一度bindして閉じたポートには誰もいない
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = source_for(&format!("http://{}", addr));
        let result = source.fetch_page(&PageRequest::new(0, 24)).await;
        assert!(matches!(result, Err(Error::Endpoint(_))));
    }

    // =============================================
    // URL組み立て
    // =============================================

    #[test]
    fn test_page_url() {
        let source = HttpPhotoSource::new("http://localhost:8080", None).unwrap();
        let url = source.page_url(&PageRequest::new(2, 24)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/photos?page=2&size=24");
    }

    #[test]
    fn test_page_url_keeps_base_path() {
        let source = HttpPhotoSource::new("https://example.com/gallery", None).unwrap();
        assert_eq!(source.base().as_str(), "https://example.com/gallery/");

        let url = source.page_url(&PageRequest::new(0, 12)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/gallery/api/photos?page=0&size=12");
    }

    #[test]
    fn test_photo_url_escapes_id() {
        let source = HttpPhotoSource::new("http://localhost:8080/", None).unwrap();
        let url = source.photo_url("summer trip").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/photos/summer%20trip");
    }

    #[test]
    fn test_invalid_endpoint() {
        let result = HttpPhotoSource::new("not a url", None);
        assert!(matches!(result, Err(GalleryError::InvalidUrl(_))));
    }

    #[test]
    fn test_non_base_endpoint() {
        let result = HttpPhotoSource::new("mailto:someone@example.com", None);
        assert!(matches!(result, Err(GalleryError::Config(_))));
    }
}
