//! 写真グリッドコンポーネント

use leptos::prelude::*;
use photo_gallery_common::PhotoRef;

/// サムネイル一覧。クリックでフルサイズURLを `on_open` に渡す
#[component]
pub fn PhotoGrid<FO>(photos: Memo<Vec<PhotoRef>>, on_open: FO) -> impl IntoView
where
    FO: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class="photo-gallery">
            <For
                each=move || photos.get().into_iter().enumerate()
                // idがない写真もあるので位置とURLで識別
                key=|(index, photo)| (*index, photo.full_size_url.clone())
                children=move |(_, photo)| {
                    let on_open = on_open.clone();
                    view! { <PhotoCard photo=photo on_open=on_open /> }
                }
            />
        </div>
    }
}

#[component]
fn PhotoCard<FO>(photo: PhotoRef, on_open: FO) -> impl IntoView
where
    FO: Fn(String) + 'static + Clone + Send,
{
    let full_size_url = photo.full_size_url.clone();
    let alt = photo.label.clone();

    view! {
        <div class="photo-card" on:click=move |_| on_open(full_size_url.clone())>
            <img src=photo.thumbnail_url alt=alt loading="lazy" />
            <div class="photo-label">{photo.label}</div>
        </div>
    }
}
