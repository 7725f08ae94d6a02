use crate::config::cli::Args;
use crate::error::{ChartError, Result};
use clap::Parser;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

pub struct Config {
    pub args: Args,
    pub api_key: String,
    pub http_client: Client,
}

pub fn load_api_key(path: &Path) -> Result<String> {
    let api_key = std::fs::read_to_string(path)?.trim().to_string();
    if api_key.is_empty() {
        return Err(ChartError::Validation(format!(
            "API key file {} is empty",
            path.display()
        )));
    }
    Ok(api_key)
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();
        let api_key = load_api_key(&args.api_key_file)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("chartograf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            args,
            api_key,
            http_client,
        })
    }

    pub fn ensure_export_dir(&self) -> Result<()> {
        if let Some(dir) = &self.args.export_dir {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
            info!("Export dir exists");
        }
        Ok(())
    }
}
