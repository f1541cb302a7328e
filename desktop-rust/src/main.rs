mod app;
mod io;
mod model;

use app::{api_client, DesktopApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = api_client()?;
    log::info!("backend: {}", client.config().base_url());

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Visual Product Matcher",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(client))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
