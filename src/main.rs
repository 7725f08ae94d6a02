use crate::config::Config;
use crate::error::Result;
use crate::processor::ChartProcessor;
use tracing::info;

mod charts;
mod clients;
mod config;
mod error;
mod processor;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::new()?;
    let processor = ChartProcessor::new(config)?;
    processor.run().await?;

    info!("Chart calculation completed successfully!");
    Ok(())
}
