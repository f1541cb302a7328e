use clap::Parser;
use product_matcher_common::{SearchClient, SEARCH_FAILED_MESSAGE};
use visual_product_matcher::{cli, config, error, output, scanner, search};
use cli::{Cli, Commands};
use config::Config;
use error::{MatcherError, Result};
use output::SearchReport;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = Config::load()?;

    match cli.command {
        Commands::Search { path, json, output, limit } => {
            let api = config.api_config(cli.api_url.as_deref())?;
            let client = SearchClient::with_timeout(api.clone(), config.timeout())?;

            if !json {
                println!("🔎 vpm - visual product search\n");
                println!("[1/2] Scanning {} ...", path.display());
            }
            let images = scanner::scan_path(&path)?;
            if images.is_empty() {
                return Err(MatcherError::NoImagesFound(path.display().to_string()));
            }
            if !json {
                println!("✔ {} image(s)\n", images.len());
                println!("[2/2] Searching {} ...", api.search_url());
            }

            let outcomes = search::search_images(&client, &images).await;

            let mut reports = Vec::new();
            let mut first_error = None;
            for outcome in outcomes {
                match outcome.result {
                    Ok(matches) => {
                        if !json {
                            println!("\n{}", outcome.query);
                            print!("{}", output::render_matches(&matches, &api, limit));
                        }
                        reports.push(SearchReport {
                            query: outcome.query,
                            matches,
                        });
                    }
                    Err(err) => {
                        eprintln!("\n{}: {}", outcome.query, user_message(&err));
                        log::debug!("{}: {}", outcome.query, err);
                        first_error.get_or_insert(err);
                    }
                }
            }

            let report_json = output::reports_to_json(&reports)?;
            if json {
                println!("{}", report_json);
            }
            if let Some(output) = output {
                std::fs::write(&output, &report_json)?;
                if !json {
                    println!("\n✔ Saved {}", output.display());
                }
            }

            // 1件も成功しなければ失敗として終了
            if reports.is_empty() {
                if let Some(err) = first_error {
                    return Err(err);
                }
            }
        }

        Commands::Status => {
            let api = config.api_config(cli.api_url.as_deref())?;
            let client = SearchClient::with_timeout(api.clone(), config.timeout())?;
            match client.status().await {
                Ok(status) => println!("✔ {} - {}", api.base_url(), status.status),
                Err(err) => {
                    eprintln!("{} - {}", api.base_url(), SEARCH_FAILED_MESSAGE);
                    return Err(err.into());
                }
            }
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_url(&url)?;
                println!("✔ API URL saved");
            }

            if let Some(secs) = set_timeout {
                config.set_timeout(secs)?;
                println!("✔ Timeout saved");
            }

            if show {
                let api = config.api_config(cli.api_url.as_deref())?;
                println!("Config:");
                println!("  File: {}", Config::config_path()?.display());
                println!("  API URL: {}", api.base_url());
                println!(
                    "  Timeout: {}",
                    config
                        .timeout()
                        .map(|t| format!("{}s", t.as_secs()))
                        .unwrap_or_else(|| "transport default".to_string())
                );
            }
        }
    }

    Ok(())
}

/// 検索失敗は固定メッセージ、それ以外（画像でない等）はそのまま表示
fn user_message(err: &MatcherError) -> String {
    match err {
        MatcherError::Search(search) => search.user_message().to_string(),
        other => other.to_string(),
    }
}
