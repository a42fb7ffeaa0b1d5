use clap::Parser;
use indicatif::ProgressBar;
use photo_gallery::{cli, config, error, gallery, source};
use cli::{Cli, Commands};
use config::Config;
use error::{GalleryError, Result};
use gallery::Gallery;
use photo_gallery_common::{LoadMode, PaginationControls, PhotoRef, RenderInstruction};
use source::{HttpPhotoSource, PhotoSource};
use std::future::Future;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::load()?;
    let page_size = cli.page_size.unwrap_or(config.page_size).max(1);

    match cli.command {
        Commands::Browse { max_pages, retries } => {
            println!("🖼  photo-gallery - 一覧\n");

            let source = open_source(cli.endpoint, &config)?;
            let mut gallery = Gallery::new(source, LoadMode::InfiniteScroll, page_size);
            browse(&mut gallery, max_pages, retries).await?;
        }

        Commands::Page { index } => {
            println!("📖 photo-gallery - ページ表示\n");

            let source = open_source(cli.endpoint, &config)?;
            let mut gallery = Gallery::new(source, LoadMode::Paged, page_size);

            let first = with_spinner("1ページ目を読み込み中...", gallery.load_initial()).await;
            let instruction = if index == 0 {
                first
            } else {
                if let Some(RenderInstruction::ShowError { error, .. }) = first {
                    return Err(error.into());
                }
                let total = gallery.loader().state().total_pages;
                let message = format!("{}ページ目を読み込み中...", index + 1);
                match with_spinner(&message, gallery.go_to_page(index)).await {
                    Some(instruction) => Some(instruction),
                    None => return Err(GalleryError::PageOutOfRange { requested: index, total }),
                }
            };

            if let Some(RenderInstruction::ShowError { error, .. }) = instruction {
                return Err(error.into());
            }
            let loader = gallery.loader();
            print_items(loader.items(), 0);
            println!();
            print_controls(loader.controls());
            if let Some(total) = loader.total_elements() {
                println!("全{}件", total);
            }
        }

        Commands::Photo { id } => {
            let source = open_source(cli.endpoint, &config)?;
            let photo = with_spinner("取得中...", source.fetch_photo(&id)).await?;

            println!("写真:");
            println!("  ID: {}", photo.id.as_deref().unwrap_or(&id));
            println!("  ファイル名: {}", photo.label);
            println!("  サムネイル: {}", photo.thumbnail_url);
            println!("  フルサイズ: {}", photo.full_size_url);
        }

        Commands::Config { set_endpoint, set_page_size, set_timeout, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                changed = true;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(size) = set_page_size {
                config.set_page_size(size)?;
                changed = true;
                println!("✔ ページサイズを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.timeout_seconds = if seconds == 0 { None } else { Some(seconds) };
                changed = true;
                println!("✔ タイムアウトを設定しました");
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!(
                    "  エンドポイント: {}",
                    config.get_endpoint().unwrap_or_else(|_| "未設定".into())
                );
                println!("  ページサイズ: {}", config.page_size);
                match config.timeout_seconds {
                    Some(s) => println!("  タイムアウト: {}秒", s),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}

fn open_source(endpoint: Option<String>, config: &Config) -> Result<HttpPhotoSource> {
    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => config.get_endpoint()?,
    };
    HttpPhotoSource::new(&endpoint, config.timeout())
}

/// 末尾に到達するまで次ページを読み続ける
async fn browse<S: PhotoSource>(
    gallery: &mut Gallery<S>,
    max_pages: Option<u32>,
    retries: u32,
) -> Result<()> {
    let mut pages = 0u32;
    let first = with_spinner("読み込み中...", gallery.load_initial()).await;
    let mut next = gallery.with_retries(first, retries, report_retry).await;

    while let Some(instruction) = next {
        match instruction {
            RenderInstruction::ShowError { error, .. } => {
                println!("✖ {}: {}", error.user_message(), error);
                return Err(error.into());
            }
            RenderInstruction::ShowEmpty => {
                println!("写真がありません");
            }
            RenderInstruction::Replace(items) | RenderInstruction::Append(items) => {
                let start = gallery.loader().items().len() - items.len();
                print_items(&items, start);
                pages += 1;
            }
            RenderInstruction::Discarded => {}
        }

        if max_pages.is_some_and(|max| pages >= max) {
            break;
        }
        let more = with_spinner("さらに読み込み中...", gallery.load_next()).await;
        next = gallery.with_retries(more, retries, report_retry).await;
    }

    let loader = gallery.loader();
    println!(
        "\n✅ {}を表示（{}ページ読み込み{}）",
        count_label(loader.items().len(), loader.total_elements()),
        pages,
        if loader.is_exhausted() { "、最後まで到達" } else { "" }
    );
    Ok(())
}

fn report_retry(error: &photo_gallery_common::Error, retries_left: u32) {
    println!("✖ {}: {}", error.user_message(), error);
    println!("  同じページを再試行します（残り{}回）", retries_left);
}

async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = future.await;
    spinner.finish_and_clear();
    output
}

/// 「N件」または総件数が分かれば「N / 全M件」
fn count_label(shown: usize, total: Option<u64>) -> String {
    match total {
        Some(total) => format!("{} / 全{}件", shown, total),
        None => format!("{}件", shown),
    }
}

fn print_items(items: &[PhotoRef], start: usize) {
    for (i, photo) in items.iter().enumerate() {
        let label = if photo.label.is_empty() { "(無題)" } else { photo.label.as_str() };
        println!("{:>5}. {}  {}", start + i + 1, label, photo.full_size_url);
    }
}

fn print_controls(controls: PaginationControls) {
    let prev = if controls.prev_enabled { "[< 前へ]" } else { "        " };
    let next = if controls.next_enabled { "[次へ >]" } else { "" };
    println!(
        "{} {} / {} {}",
        prev,
        controls.current + 1,
        controls.total.max(1),
        next
    );
}
