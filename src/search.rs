//! 画像を1枚ずつ検索する（前の応答を待ってから次を送る）

use crate::error::{MatcherError, Result};
use crate::scanner::{load_upload, ImageInfo};
use indicatif::{ProgressBar, ProgressStyle};
use product_matcher_common::{Match, SearchClient};

pub struct QueryOutcome {
    pub query: String,
    pub result: Result<Vec<Match>>,
}

pub async fn search_images(client: &SearchClient, images: &[ImageInfo]) -> Vec<QueryOutcome> {
    let progress = (images.len() > 1).then(|| {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    });

    let mut outcomes = Vec::with_capacity(images.len());
    for info in images {
        if let Some(pb) = &progress {
            pb.set_message(info.file_name.clone());
        }

        let result = search_one(client, info).await;
        match &result {
            Ok(matches) => log::debug!("{}: {} matches", info.file_name, matches.len()),
            Err(err) => log::warn!("{}: {}", info.file_name, err),
        }
        outcomes.push(QueryOutcome {
            query: info.file_name.clone(),
            result,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    outcomes
}

async fn search_one(client: &SearchClient, info: &ImageInfo) -> Result<Vec<Match>> {
    let upload = load_upload(info)?;
    client.search(upload).await.map_err(MatcherError::from)
}
