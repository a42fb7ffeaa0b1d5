//! window.history を NavigationHistory として扱う

use photo_gallery_common::NavigationHistory;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::PopStateEvent;

/// ブラウザの履歴スタック
///
/// 状態は持たず、呼ばれるたびに `window.history` を引く。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

fn history() -> Option<web_sys::History> {
    web_sys::window()?.history().ok()
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// JSの値をstateとして読む。null/undefined や変換できない値は `None`
fn to_state(value: JsValue) -> Option<Value> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    serde_wasm_bindgen::from_value(value).ok()
}

/// popstate イベントの移動先のstate
pub fn state_from_event(event: &PopStateEvent) -> Option<Value> {
    to_state(event.state())
}

impl NavigationHistory for BrowserHistory {
    fn push(&mut self, state: Value) {
        let Some(history) = history() else {
            return;
        };
        // Map ではなく素のオブジェクトにする
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_state = match state.serialize(&serializer) {
            Ok(v) => v,
            Err(e) => {
                warn(&format!("history state の変換に失敗: {}", e));
                return;
            }
        };
        if let Err(e) = history.push_state_with_url(&js_state, "", None) {
            warn(&format!("pushState に失敗: {:?}", e));
        }
    }

    fn back(&mut self) -> bool {
        let Some(history) = history() else {
            return false;
        };
        match history.back() {
            Ok(()) => true,
            Err(e) => {
                warn(&format!("history.back に失敗: {:?}", e));
                false
            }
        }
    }

    fn current(&self) -> Option<Value> {
        to_state(history()?.state().ok()?)
    }
}
