mod http;

pub use http::HttpPhotoSource;

use photo_gallery_common::{PageRequest, PageResult};
use std::future::Future;

/// 写真一覧を返す外部エンドポイント
///
/// 失敗は `Endpoint`（通信・ステータス）か `MalformedResponse`（ペイロード）で返す。
pub trait PhotoSource {
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = photo_gallery_common::Result<PageResult>> + Send;
}
