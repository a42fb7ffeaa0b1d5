use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "ページング対応フォトギャラリーのローダー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 写真APIのベースURL（設定ファイルより優先）
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// 1ページあたりの件数（設定ファイルより優先）
    #[arg(long, global = true)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 無限スクロールと同じ順に、最後まで読み込んで一覧表示
    Browse {
        /// 読み込むページ数の上限（初回を含む）
        #[arg(short, long)]
        max_pages: Option<u32>,

        /// 失敗時に同じページを再試行する回数
        #[arg(long, default_value = "0")]
        retries: u32,
    },

    /// ページ送りで指定ページを表示
    Page {
        /// ページ番号（0始まり）
        #[arg(default_value = "0")]
        index: u32,
    },

    /// 写真1件のメタデータを表示
    Photo {
        /// 写真ID
        #[arg(required = true)]
        id: String,
    },

    /// 設定を表示/編集
    Config {
        /// エンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// ページサイズを設定
        #[arg(long)]
        set_page_size: Option<u32>,

        /// タイムアウト秒数を設定（0で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
