//! UIコンポーネント

pub mod header;
pub mod pagination;
pub mod photo_grid;
pub mod photo_overlay;
