//! オーバーレイと履歴の同期
//!
//! フルサイズ表示のオーバーレイ開閉をブラウザの履歴スタックと一致させる。
//!
//! | 現在 | イベント | 次 | 履歴操作 |
//! |---|---|---|---|
//! | Closed | open(u) | Open(u) | push |
//! | Open(u) | open(u2) | Open(u2) | push |
//! | Open(u) | ユーザーが閉じる | Closed | 先頭がオーバーレイ項目なら back |
//! | Open(u) | 戻る | Closed | なし |
//! | Closed | 進む(項目) | Open(項目のurl) | なし |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

/// 履歴に積むオーバーレイ項目
///
/// ワイヤ形式は `{"overlayOpen": true, "url": "..."}`。
/// 読み込み時は旧形式 `{"modalOpen": true, "imageUrl": "..."}` も受け付ける。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEntry {
    #[serde(rename = "overlayOpen", alias = "modalOpen")]
    overlay_open: bool,
    #[serde(alias = "imageUrl")]
    url: String,
}

impl OverlayEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            overlay_open: true,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn to_state(&self) -> Value {
        serde_json::json!({ "overlayOpen": true, "url": self.url })
    }

    /// 履歴のstateをオーバーレイ項目として解釈する
    ///
    /// 形が合わないものはすべて「オーバーレイ項目ではない」として `None`。
    pub fn from_state(state: &Value) -> Option<Self> {
        let entry: OverlayEntry = serde_json::from_value(state.clone()).ok()?;
        if entry.overlay_open && !entry.url.is_empty() {
            Some(entry)
        } else {
            None
        }
    }
}

/// 履歴スタックへの窓口
///
/// ブラウザでは `window.history`、テストやネイティブでは `MemoryHistory`。
pub trait NavigationHistory {
    /// 新しい項目を積む（`pushState`）
    fn push(&mut self, state: Value);

    /// 1つ戻る（`history.back()`）。完了はナビゲーションイベントとして届く
    ///
    /// 戻る操作を発行できなかった場合は `false`（イベントは届かない）。
    fn back(&mut self) -> bool;

    /// 現在の項目のstate（`history.state`）
    fn current(&self) -> Option<Value>;
}

/// オーバーレイの状態（OverlaySyncが専有）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open { url: String },
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        matches!(self, OverlayState::Open { .. })
    }

    pub fn current_url(&self) -> Option<&str> {
        match self {
            OverlayState::Open { url } => Some(url),
            OverlayState::Closed => None,
        }
    }
}

/// ナビゲーションイベント処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// 戻る操作でオーバーレイを閉じた
    Closed,
    /// 進む操作でオーバーレイを開き直した
    Reopened(String),
    /// 開いたまま別の項目へ移動した
    Switched(String),
    /// 何もしない
    Ignored,
}

/// オーバーレイと履歴の同期器
#[derive(Debug)]
pub struct OverlaySync<H: NavigationHistory> {
    history: H,
    state: OverlayState,
    /// close() が要求した back のうち、まだイベントが届いていない数
    pending_pops: u32,
}

impl<H: NavigationHistory> OverlaySync<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            state: OverlayState::Closed,
            pending_pops: 0,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.state.current_url()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// オーバーレイを開いて履歴項目を1つ積む
    ///
    /// 既に開いていても必ず積む。
    pub fn open(&mut self, url: &str) {
        log::debug!("overlay open: {}", url);
        self.state = OverlayState::Open { url: url.to_string() };
        self.history.push(OverlayEntry::new(url).to_state());
    }

    /// オーバーレイを閉じる
    ///
    /// ユーザー操作による close で履歴の先頭がオーバーレイ項目なら1つ戻る。
    /// 戻る操作が原因の close では履歴に触れない。
    ///
    /// 戻る操作を発行できた場合は `true`。
    pub fn close(&mut self, caused_by_history_nav: bool) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.state = OverlayState::Closed;

        if caused_by_history_nav {
            return false;
        }

        let top_is_overlay = self
            .history
            .current()
            .as_ref()
            .and_then(OverlayEntry::from_state)
            .is_some();
        if !top_is_overlay {
            return false;
        }

        log::debug!("overlay closed by user; popping its history entry");
        if !self.history.back() {
            log::warn!("history back was not issued; overlay entry left in place");
            return false;
        }
        self.pending_pops += 1;
        true
    }

    /// `popstate` 相当のイベントを処理する
    ///
    /// `state` は移動先の項目のstate。close() 自身が起こした back のイベントでは
    /// 閉じることはあっても開き直すことはない。
    pub fn handle_history_navigation(&mut self, state: Option<&Value>) -> NavigationOutcome {
        let target = state.and_then(OverlayEntry::from_state);
        let self_initiated = if self.pending_pops > 0 {
            self.pending_pops -= 1;
            true
        } else {
            false
        };

        match (self.state.is_open(), target) {
            (true, None) => {
                self.close(true);
                NavigationOutcome::Closed
            }
            (true, Some(entry)) => {
                if self.state.current_url() == Some(entry.url()) {
                    return NavigationOutcome::Ignored;
                }
                let url = entry.url;
                self.state = OverlayState::Open { url: url.clone() };
                NavigationOutcome::Switched(url)
            }
            (false, Some(entry)) if !self_initiated => {
                let url = entry.url;
                self.state = OverlayState::Open { url: url.clone() };
                NavigationOutcome::Reopened(url)
            }
            _ => NavigationOutcome::Ignored,
        }
    }
}

/// 履歴の移動イベント
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
    pub state: Option<Value>,
}

/// メモリ上の履歴スタック
///
/// ブラウザと同じく、push で進む側の項目を捨て、back/forward でカーソルを動かし、
/// 移動のたびにイベントをキューに積む。
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Option<Value>>,
    cursor: usize,
    events: VecDeque<NavigationEvent>,
    pushes: usize,
    backs: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHistory {
    /// state無しのページ項目1つから始める
    pub fn new() -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
            events: VecDeque::new(),
            pushes: 0,
            backs: 0,
        }
    }

    /// 任意のstateを持つ項目を積む（オーバーレイ以外の遷移の再現用）
    pub fn push_foreign(&mut self, state: Option<Value>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    /// 進む
    pub fn forward(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            self.emit();
        }
    }

    /// 溜まっているナビゲーションイベントを1つ取り出す
    pub fn next_event(&mut self) -> Option<NavigationEvent> {
        self.events.pop_front()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `push` の呼び出し回数
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    /// `back` の呼び出し回数
    pub fn back_count(&self) -> usize {
        self.backs
    }

    fn emit(&mut self) {
        let state = self.entries[self.cursor].clone();
        self.events.push_back(NavigationEvent { state });
    }
}

impl NavigationHistory for MemoryHistory {
    fn push(&mut self, state: Value) {
        self.push_foreign(Some(state));
        self.pushes += 1;
    }

    fn back(&mut self) -> bool {
        self.backs += 1;
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.emit();
        true
    }

    fn current(&self) -> Option<Value> {
        self.entries[self.cursor].clone()
    }
}
