//! フルサイズ表示のオーバーレイ

use leptos::prelude::*;

/// `url` が `Some` の間だけ表示。背景と閉じるボタンで `on_close`
#[component]
pub fn PhotoOverlay<FC>(url: Memo<Option<String>>, on_close: FC) -> impl IntoView
where
    FC: Fn() + 'static + Clone + Send + Sync,
{
    let on_backdrop = on_close.clone();

    view! {
        <Show when=move || url.get().is_some()>
            <div class="overlay" on:click={
                let on_backdrop = on_backdrop.clone();
                move |_| on_backdrop()
            }>
                // 中身のクリックは背景まで伝えない
                <div class="overlay-content" on:click=|ev| ev.stop_propagation()>
                    <button class="overlay-close" on:click={
                        let on_close = on_close.clone();
                        move |_| on_close()
                    }>"×"</button>
                    <img src=move || url.get().unwrap_or_default() alt="" />
                </div>
            </div>
        </Show>
    }
}
