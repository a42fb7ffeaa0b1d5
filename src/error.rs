use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("エンドポイントが設定されていません。`photo-gallery config --set-endpoint URL` で設定するか PHOTO_GALLERY_ENDPOINT を指定してください")]
    MissingEndpoint,

    #[error("URLが不正です: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("写真が見つかりません: {0}")]
    PhotoNotFound(String),

    #[error("ページ番号が範囲外です: {requested}（全{total}ページ）")]
    PageOutOfRange { requested: u32, total: u32 },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_gallery_common::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
