//! ギャラリーの非同期ドライバ
//!
//! PageLoader が発行したチケットを PhotoSource で実行し、結果を戻す。
//! `&mut self` を取るので、1つの Gallery で同時に走るフェッチは常に1本。
//! 応答が返らない場合は読み込み中のまま止まる（HttpPhotoSource のタイムアウトで打ち切る）。

use crate::source::PhotoSource;
use photo_gallery_common::{Error, FetchTicket, LoadMode, PageLoader, RenderInstruction};

pub struct Gallery<S: PhotoSource> {
    source: S,
    loader: PageLoader,
}

impl<S: PhotoSource> Gallery<S> {
    pub fn new(source: S, mode: LoadMode, page_size: u32) -> Self {
        Self {
            source,
            loader: PageLoader::new(mode, page_size),
        }
    }

    pub fn loader(&self) -> &PageLoader {
        &self.loader
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 起動時の読み込み
    ///
    /// 戻り値が `None` ならトリガーは無視された。
    pub async fn load_initial(&mut self) -> Option<RenderInstruction> {
        let ticket = self.loader.request_initial_load();
        self.run(ticket).await
    }

    /// 次ページの追記（無限スクロール）
    pub async fn load_next(&mut self) -> Option<RenderInstruction> {
        let ticket = self.loader.request_next();
        self.run(ticket).await
    }

    /// ページの差し替え（ページ送り）
    pub async fn go_to_page(&mut self, index: u32) -> Option<RenderInstruction> {
        let ticket = self.loader.request_page(index);
        self.run(ticket).await
    }

    /// 直前の失敗を同じパラメータでやり直す
    pub async fn retry(&mut self) -> Option<RenderInstruction> {
        let ticket = self.loader.retry();
        self.run(ticket).await
    }

    /// 失敗した読み込みを同じページで最大 `retries` 回やり直す
    ///
    /// 回数は呼び出しごと（つまり1ページごと）。`on_retry` は再試行の直前に
    /// エラーと残り回数を受け取る。
    pub async fn with_retries<F>(
        &mut self,
        first: Option<RenderInstruction>,
        retries: u32,
        mut on_retry: F,
    ) -> Option<RenderInstruction>
    where
        F: FnMut(&Error, u32),
    {
        let mut instruction = first;
        let mut retries_left = retries;
        while let Some(RenderInstruction::ShowError { error, .. }) = &instruction {
            if retries_left == 0 {
                break;
            }
            retries_left -= 1;
            on_retry(error, retries_left);
            instruction = self.retry().await;
        }
        instruction
    }

    async fn run(&mut self, ticket: Option<FetchTicket>) -> Option<RenderInstruction> {
        let ticket = ticket?;
        let result = self.source.fetch_page(ticket.request()).await;
        Some(self.loader.complete(ticket, result))
    }
}
