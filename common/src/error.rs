//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 通信失敗または非2xxステータス
    #[error("Endpoint error: {0}")]
    Endpoint(String),

    /// レスポンスに必須フィールドがない、またはJSONとして読めない
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// 画面に出すための短いメッセージ
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::Endpoint(_) => "Error loading photos",
            Error::MalformedResponse(_) => "Unexpected response from photo service",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedResponse(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
