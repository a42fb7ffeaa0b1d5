//! ページ送りボタン

use leptos::prelude::*;
use photo_gallery_common::PaginationControls;

#[component]
pub fn Pagination<FG>(
    controls: Memo<PaginationControls>,
    is_loading: Memo<bool>,
    on_go: FG,
) -> impl IntoView
where
    FG: Fn(u32) + 'static + Clone + Send,
{
    let on_prev = on_go.clone();
    let on_next = on_go;

    view! {
        <nav class="pagination">
            <button
                class="btn"
                disabled=move || !controls.get().prev_enabled || is_loading.get()
                on:click=move |_| {
                    let current = controls.get_untracked().current;
                    if current > 0 {
                        on_prev(current - 1);
                    }
                }
            >
                "< 前へ"
            </button>
            <span class="page-indicator">
                {move || {
                    let c = controls.get();
                    format!("{} / {}", c.current + 1, c.total.max(1))
                }}
            </span>
            <button
                class="btn"
                disabled=move || !controls.get().next_enabled || is_loading.get()
                on:click=move |_| on_next(controls.get_untracked().current + 1)
            >
                "次へ >"
            </button>
        </nav>
    }
}
