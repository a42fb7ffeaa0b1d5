//! メインアプリケーションコンポーネント
//!
//! PageLoader / OverlaySync をシグナルに載せ、DOMイベントとフェッチをつなぐ。

use crate::api;
use crate::components::{
    header::Header,
    pagination::Pagination,
    photo_grid::PhotoGrid,
    photo_overlay::PhotoOverlay,
};
use crate::history::{state_from_event, BrowserHistory};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photo_gallery_common::{
    FetchTicket, LoadMode, OverlaySync, PageLoader, RenderInstruction, ScrollTrigger, ViewStatus,
    DEFAULT_PAGE_SIZE,
};

/// `?mode=paged` ならページボタン方式、それ以外は無限スクロール
pub fn mode_from_location() -> LoadMode {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    mode_from_query(&search)
}

/// クエリ文字列（先頭の `?` はあってもなくてもよい）から読み込み方式を決める
pub fn mode_from_query(search: &str) -> LoadMode {
    let mode = web_sys::UrlSearchParams::new_with_str(search)
        .ok()
        .and_then(|params| params.get("mode"));
    match mode.as_deref() {
        Some("paged") => LoadMode::Paged,
        _ => LoadMode::InfiniteScroll,
    }
}

/// チケットを実行し、結果をローダーへ戻す
fn dispatch(loader: RwSignal<PageLoader>, ticket: Option<FetchTicket>) {
    let Some(ticket) = ticket else {
        return;
    };
    spawn_local(async move {
        let result = api::fetch_page(ticket.request()).await;
        let instruction = loader.try_update(|l| l.complete(ticket, result));
        // 追記後も画面が埋まらなければ続けて読む
        if let Some(RenderInstruction::Replace(_) | RenderInstruction::Append(_)) = instruction {
            load_more_if_near_bottom(loader);
        }
    });
}

/// スクロール位置を見て、必要なら次ページを要求
fn load_more_if_near_bottom(loader: RwSignal<PageLoader>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(0.0);

    if !ScrollTrigger::default().should_load(viewport_height, scroll_y, document_height) {
        return;
    }
    let ticket = loader
        .try_update(|l| l.request_next())
        .flatten();
    dispatch(loader, ticket);
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App(mode: LoadMode) -> impl IntoView {
    let loader = RwSignal::new(PageLoader::new(mode, DEFAULT_PAGE_SIZE));
    let overlay = RwSignal::new(OverlaySync::new(BrowserHistory));

    // 起動時の読み込み
    dispatch(loader, loader.try_update(|l| l.request_initial_load()).flatten());

    // スクロール/リサイズ（無限スクロールのみ）
    if mode == LoadMode::InfiniteScroll {
        let _ = window_event_listener(ev::scroll, move |_| load_more_if_near_bottom(loader));
        let _ = window_event_listener(ev::resize, move |_| load_more_if_near_bottom(loader));
    }

    // 戻る/進む
    let _ = window_event_listener(ev::popstate, move |event| {
        let state = state_from_event(&event);
        overlay.update(|o| {
            o.handle_history_navigation(state.as_ref());
        });
    });

    // Escで閉じる
    let _ = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            overlay.update(|o| {
                o.close(false);
            });
        }
    });

    let status = Memo::new(move |_| loader.with(|l| l.status().clone()));
    // 追記の読み込み中もグリッドは作り直さない
    let shown = Memo::new(move |_| match status.get() {
        ViewStatus::LoadingMore => ViewStatus::Ready,
        other => other,
    });
    let items = Memo::new(move |_| loader.with(|l| l.items().to_vec()));
    let controls = Memo::new(move |_| loader.with(|l| l.controls()));
    let is_loading = Memo::new(move |_| loader.with(|l| l.is_loading()));
    let total_elements = Memo::new(move |_| loader.with(|l| l.total_elements()));
    let inline_error = Memo::new(move |_| {
        loader.with(|l| match (l.status(), l.last_error()) {
            (ViewStatus::Ready | ViewStatus::Empty, Some(e)) => Some(e.user_message()),
            _ => None,
        })
    });
    let overlay_url = Memo::new(move |_| overlay.with(|o| o.current_url().map(str::to_string)));

    let on_open = move |url: String| {
        overlay.update(|o| o.open(&url));
    };
    let on_close = move || {
        overlay.update(|o| {
            o.close(false);
        });
    };
    let on_retry = move || {
        dispatch(loader, loader.try_update(|l| l.retry()).flatten());
    };
    let on_go = move |index: u32| {
        dispatch(loader, loader.try_update(|l| l.request_page(index)).flatten());
    };

    let status_view = move || match shown.get() {
        ViewStatus::Idle | ViewStatus::Loading => {
            view! { <p class="gallery-status">"読み込み中..."</p> }.into_any()
        }
        ViewStatus::Empty => {
            view! { <p class="gallery-status text-muted">"写真がありません"</p> }.into_any()
        }
        ViewStatus::Error(error) => view! {
            <div class="gallery-error">
                <p>{error.user_message()}</p>
                <button class="btn" on:click=move |_| on_retry()>"再試行"</button>
            </div>
        }
        .into_any(),
        ViewStatus::Ready | ViewStatus::LoadingMore => {
            view! { <PhotoGrid photos=items on_open=on_open /> }.into_any()
        }
    };

    view! {
        <div class="container">
            <Header mode=mode loaded=Signal::derive(move || items.get().len()) total=total_elements />

            {status_view}

            <Show when=move || inline_error.get().is_some()>
                <div class="gallery-error inline">
                    <span>{move || inline_error.get().unwrap_or_default()}</span>
                    <button class="btn" on:click=move |_| on_retry()>"再試行"</button>
                </div>
            </Show>

            <Show when=move || status.get() == ViewStatus::LoadingMore>
                <p class="gallery-status">"さらに読み込み中..."</p>
            </Show>

            // 空ページに着いても戻れるようにボタンは残す
            <Show when=move || {
                mode == LoadMode::Paged
                    && matches!(status.get(), ViewStatus::Ready | ViewStatus::Empty)
                    && controls.get().total > 0
            }>
                <Pagination controls=controls is_loading=is_loading on_go=on_go />
            </Show>

            <PhotoOverlay url=overlay_url on_close=on_close />
        </div>
    }
}
