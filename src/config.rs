use crate::error::{GalleryError, Result};
use photo_gallery_common::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "PHOTO_GALLERY_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 写真APIのベースURL（例: https://photos.example.com/）
    pub endpoint: Option<String>,
    pub page_size: u32,
    /// 未設定ならタイムアウトなし（応答が来るまで次の読み込みは起きない）
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: Some(30),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        log::debug!("config loaded from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GalleryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-gallery").join("config.json"))
    }

    pub fn get_endpoint(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                return Ok(endpoint);
            }
        }

        self.endpoint.clone().ok_or(GalleryError::MissingEndpoint)
    }

    /// URLとして解釈できることを確認してから設定
    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        url::Url::parse(&endpoint)?;
        self.endpoint = Some(endpoint);
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        if page_size == 0 {
            return Err(GalleryError::Config("ページサイズは1以上にしてください".into()));
        }
        self.page_size = page_size;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }
}
