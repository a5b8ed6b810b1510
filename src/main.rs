use anyhow::{Context, Result};
use log::{error, info};

use lipstudio::build_rocket;
use lipstudio::common::ROCKET_RUNTIME;
use lipstudio::config::AppConfig;
use lipstudio::workflow::provision::provision_tools;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;

    if let Err(err) = provision_tools(&config) {
        error!("Tool provisioning failed: {:#}", err);
        std::process::exit(1);
    }
    std::fs::create_dir_all(&config.work_dir)
        .context("Failed to create the scratch directory")?;

    info!("Tools ready under {}", config.tools_root.display());

    ROCKET_RUNTIME.block_on(async {
        let _ = build_rocket(config).launch().await?;
        Ok::<(), rocket::Error>(())
    })?;

    Ok(())
}
