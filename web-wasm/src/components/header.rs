//! ヘッダーコンポーネント

use leptos::prelude::*;
use photo_gallery_common::LoadMode;

/// タイトルと読み込み状況（方式・表示件数/総件数）
#[component]
pub fn Header(mode: LoadMode, loaded: Signal<usize>, total: Memo<Option<u64>>) -> impl IntoView {
    let mode_label = match mode {
        LoadMode::InfiniteScroll => "スクロール",
        LoadMode::Paged => "ページ送り",
    };

    let count = move || match total.get() {
        Some(total) => format!("{} / 全{}件", loaded.get(), total),
        None => format!("{}件", loaded.get()),
    };

    view! {
        <header class="header">
            <h1>"Photo Gallery"</h1>
            <span class="gallery-mode">{mode_label}</span>
            <span class="gallery-count">{count}</span>
        </header>
    }
}
