//! インクリメンタル読み込みの状態機械
//!
//! 無限スクロールとページボタンの2方式を1つの `PageLoader` で扱う。
//! フェッチ自体は行わず、`FetchTicket` を発行して呼び出し側に実行させ、
//! 結果を `complete` に戻してもらう。
//!
//! - 同時に走るフェッチは常に1本まで（`is_loading` がガード）
//! - 発行済みチケット以外の完了は破棄する
//! - 失敗時は自動リトライしない（`retry` / 次のトリガーで再要求）

use crate::error::Error;
use crate::types::{PageRequest, PageResult, PhotoRef, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// 読み込み方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// スクロールで次ページを追記
    #[default]
    InfiniteScroll,
    /// ページボタンで表示ページを差し替え
    Paged,
}

/// フェッチ結果の反映方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    Append,
    Replace,
}

/// 発行済みフェッチの控え
///
/// 結果と一緒に `PageLoader::complete` へ戻す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
    kind: FetchKind,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }
}

/// ローダーの状態（PageLoaderが専有）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderState {
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub is_loading: bool,
    pub exhausted: bool,
}

/// 表示状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    /// まだ何も要求していない
    #[default]
    Idle,
    /// 初回読み込み中（アイテムなし）
    Loading,
    /// 表示中のアイテムの後ろに次ページを読み込み中
    LoadingMore,
    /// アイテム表示中
    Ready,
    /// 0件（エラーでも読み込み中でもない）
    Empty,
    /// 初回読み込みの失敗
    Error(Error),
}

/// ビュー層への描画指示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    /// 表示中のアイテムを差し替える
    Replace(Vec<PhotoRef>),
    /// 末尾に追記する
    Append(Vec<PhotoRef>),
    /// 「写真がありません」表示
    ShowEmpty,
    /// エラー表示。`inline` の場合は既存アイテムを残したまま表示する
    ShowError { error: Error, inline: bool },
    /// 古い完了なので何もしない
    Discarded,
}

/// ページボタンの有効/無効
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: u32,
    pub total: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    fn compute(page_index: u32, total_pages: u32) -> Self {
        Self {
            current: page_index,
            total: total_pages,
            prev_enabled: page_index > 0,
            next_enabled: page_index.saturating_add(1) < total_pages,
        }
    }
}

/// `total_pages` が0、または最終ページに到達しているか
fn is_last_page(page_index: u32, total_pages: u32) -> bool {
    total_pages == 0 || page_index.saturating_add(1) >= total_pages
}

/// ページングされたギャラリーの読み込み状態
#[derive(Debug, Clone)]
pub struct PageLoader {
    mode: LoadMode,
    state: LoaderState,
    items: Vec<PhotoRef>,
    status: ViewStatus,
    controls: PaginationControls,
    started: bool,
    next_seq: u64,
    in_flight: Option<FetchTicket>,
    failed: Option<FetchTicket>,
    last_error: Option<Error>,
    total_elements: Option<u64>,
}

impl Default for PageLoader {
    fn default() -> Self {
        Self::new(LoadMode::default(), DEFAULT_PAGE_SIZE)
    }
}

impl PageLoader {
    pub fn new(mode: LoadMode, page_size: u32) -> Self {
        Self {
            mode,
            state: LoaderState {
                page_index: 0,
                page_size: page_size.max(1),
                total_pages: 0,
                is_loading: false,
                exhausted: false,
            },
            items: Vec::new(),
            status: ViewStatus::Idle,
            controls: PaginationControls::default(),
            started: false,
            next_seq: 0,
            in_flight: None,
            failed: None,
            last_error: None,
            total_elements: None,
        }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn state(&self) -> &LoaderState {
        &self.state
    }

    /// 描画済みのアイテム
    pub fn items(&self) -> &[PhotoRef] {
        &self.items
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn controls(&self) -> PaginationControls {
        self.controls
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.exhausted
    }

    /// サーバーが報告した総件数（最後に成功した応答の値）
    pub fn total_elements(&self) -> Option<u64> {
        self.total_elements
    }

    /// 直近の失敗（成功すると消える）
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// 再試行できる失敗があるか
    pub fn can_retry(&self) -> bool {
        self.failed.is_some() && !self.state.is_loading
    }

    /// 初回読み込み
    ///
    /// 起動時に1回だけ有効。2回目以降は `None`（失敗時は `retry` を使う）。
    pub fn request_initial_load(&mut self) -> Option<FetchTicket> {
        if self.started || self.state.is_loading {
            log::debug!("initial load already requested; ignoring");
            return None;
        }
        self.started = true;
        self.state.page_index = 0;
        self.state.exhausted = false;
        self.items.clear();
        self.status = ViewStatus::Loading;

        Some(self.issue(0, FetchKind::Initial))
    }

    /// 次ページを追記で要求（無限スクロール）
    ///
    /// 読み込み中・末尾到達済みなら何もしない。何度呼んでも安全。
    /// 直前の追記が失敗していた場合は同じページを再要求する。
    pub fn request_next(&mut self) -> Option<FetchTicket> {
        if self.mode != LoadMode::InfiniteScroll {
            log::debug!("request_next ignored in paged mode");
            return None;
        }
        if !self.started || self.state.is_loading || self.state.exhausted {
            return None;
        }
        if self.failed.is_some() {
            return self.retry();
        }

        self.state.page_index += 1;
        Some(self.issue(self.state.page_index, FetchKind::Append))
    }

    /// 指定ページへ差し替え（ページボタン）
    ///
    /// 読み込み中、または `[0, total_pages - 1]` の範囲外なら何もしない。
    /// 既存アイテムは新しいページが届くまで表示したままにする。
    pub fn request_page(&mut self, target_index: u32) -> Option<FetchTicket> {
        if self.mode != LoadMode::Paged {
            log::debug!("request_page ignored in infinite-scroll mode");
            return None;
        }
        if self.state.is_loading {
            return None;
        }
        if target_index >= self.state.total_pages {
            log::debug!(
                "page {} out of range (total {}); ignoring",
                target_index,
                self.state.total_pages
            );
            return None;
        }

        self.state.page_index = target_index;
        Some(self.issue(target_index, FetchKind::Replace))
    }

    /// 直前に失敗したリクエストを同じパラメータで再発行
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.state.is_loading {
            return None;
        }
        let failed = self.failed.take()?;
        if failed.kind == FetchKind::Initial {
            self.status = ViewStatus::Loading;
        }
        Some(self.issue(failed.request.page_index, failed.kind))
    }

    fn issue(&mut self, page_index: u32, kind: FetchKind) -> FetchTicket {
        let ticket = FetchTicket {
            seq: self.next_seq,
            request: PageRequest::new(page_index, self.state.page_size),
            kind,
        };
        self.next_seq += 1;
        self.in_flight = Some(ticket);
        self.state.is_loading = true;
        if kind == FetchKind::Append {
            self.status = ViewStatus::LoadingMore;
        }
        log::debug!(
            "fetch #{} issued: {:?} {}",
            ticket.seq,
            kind,
            ticket.request.query_string()
        );
        ticket
    }

    /// フェッチ完了を反映する唯一の遷移
    ///
    /// 発行中のチケットと一致しない完了は `Discarded` を返し、状態を変えない。
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: crate::error::Result<PageResult>,
    ) -> RenderInstruction {
        if self.in_flight.map(|t| t.seq) != Some(ticket.seq) {
            log::debug!("fetch #{} is stale; discarding", ticket.seq);
            return RenderInstruction::Discarded;
        }
        self.in_flight = None;
        self.state.is_loading = false;

        match result {
            Ok(page) => self.apply_page(ticket, page),
            Err(error) => self.apply_error(ticket, error),
        }
    }

    fn apply_error(&mut self, ticket: FetchTicket, error: Error) -> RenderInstruction {
        log::warn!(
            "fetch #{} ({}) failed: {}",
            ticket.seq,
            ticket.request.query_string(),
            error
        );
        self.failed = Some(ticket);
        self.last_error = Some(error.clone());

        let inline = ticket.kind != FetchKind::Initial;
        match ticket.kind {
            FetchKind::Initial => self.status = ViewStatus::Error(error.clone()),
            FetchKind::Append => self.status = ViewStatus::Ready,
            FetchKind::Replace => {}
        }
        RenderInstruction::ShowError { error, inline }
    }

    fn apply_page(&mut self, ticket: FetchTicket, page: PageResult) -> RenderInstruction {
        self.failed = None;
        self.last_error = None;
        self.state.total_pages = page.total_pages;
        if page.total_elements.is_some() {
            self.total_elements = page.total_elements;
        }

        match ticket.kind {
            FetchKind::Initial => {
                self.state.exhausted = match self.mode {
                    LoadMode::InfiniteScroll => {
                        is_last_page(0, page.total_pages) || page.items.is_empty()
                    }
                    LoadMode::Paged => is_last_page(0, page.total_pages),
                };
                self.controls = PaginationControls::compute(0, page.total_pages);
                self.show_page(page.items)
            }
            FetchKind::Append => {
                let requested = ticket.request.page_index;
                if page.current_page_index != requested {
                    // サーバーが範囲外ページを丸めて返した: 重複を避けて終端扱い
                    log::warn!(
                        "requested page {} but endpoint returned page {}; treating as end of gallery",
                        requested,
                        page.current_page_index
                    );
                    self.state.exhausted = true;
                    self.status = ViewStatus::Ready;
                    return RenderInstruction::Append(Vec::new());
                }

                if is_last_page(requested, page.total_pages) || page.items.is_empty() {
                    self.state.exhausted = true;
                }
                self.items.extend(page.items.iter().cloned());
                self.status = ViewStatus::Ready;
                RenderInstruction::Append(page.items)
            }
            FetchKind::Replace => {
                if page.current_page_index != ticket.request.page_index {
                    log::warn!(
                        "requested page {} but endpoint returned page {}",
                        ticket.request.page_index,
                        page.current_page_index
                    );
                    self.state.page_index = page.current_page_index;
                }
                let index = self.state.page_index;
                self.state.exhausted = is_last_page(index, page.total_pages);
                self.controls = PaginationControls::compute(index, page.total_pages);
                self.show_page(page.items)
            }
        }
    }

    fn show_page(&mut self, items: Vec<PhotoRef>) -> RenderInstruction {
        if items.is_empty() {
            self.items.clear();
            self.status = ViewStatus::Empty;
            return RenderInstruction::ShowEmpty;
        }
        self.items = items.clone();
        self.status = ViewStatus::Ready;
        RenderInstruction::Replace(items)
    }
}
