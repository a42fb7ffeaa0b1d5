//! Photo Gallery
//!
//! 写真APIをページ単位で読み込むネイティブ側のドライバとCLI。
//! 状態機械そのものは photo_gallery_common にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod source;

pub use error::{GalleryError, Result};
pub use gallery::Gallery;
pub use source::{HttpPhotoSource, PhotoSource};
