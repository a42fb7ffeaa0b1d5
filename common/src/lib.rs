//! Photo Gallery Common Library
//!
//! ネイティブとWeb(WASM)で共有されるギャラリー読み込みの中核:
//! - PageLoader: ページ送り/無限スクロールの状態機械
//! - OverlaySync: フルサイズ表示と履歴スタックの同期

pub mod types;
pub mod error;
pub mod parser;
pub mod loader;
pub mod overlay;
pub mod scroll;

pub use types::{PageRequest, PageResult, PhotoRef, DEFAULT_PAGE_SIZE};
pub use error::{Error, Result};
pub use parser::{parse_page_response, parse_photo_response};
pub use loader::{
    FetchKind, FetchTicket, LoadMode, LoaderState, PageLoader, PaginationControls,
    RenderInstruction, ViewStatus,
};
pub use overlay::{
    MemoryHistory, NavigationEvent, NavigationHistory, NavigationOutcome, OverlayEntry,
    OverlayState, OverlaySync,
};
pub use scroll::{ScrollTrigger, DEFAULT_SCROLL_THRESHOLD};
