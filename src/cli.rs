use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vpm")]
#[command(about = "Visual Product Matcher - find catalogue products that look like an image", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides PRODUCT_MATCHER_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像（またはフォルダ内の画像）で類似商品を検索
    Search {
        /// Image file, or folder whose images are searched one by one
        #[arg(required = true)]
        path: PathBuf,

        /// Print matches as JSON instead of cards
        #[arg(long)]
        json: bool,

        /// Also write the matches as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show at most N matches per image
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// バックエンドの稼働確認
    Status,

    /// 設定の表示・変更
    Config {
        /// Save the backend base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Save a request timeout in seconds (0 = transport default)
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Show the effective configuration
        #[arg(long)]
        show: bool,
    },
}
