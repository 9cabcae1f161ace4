use std::path::PathBuf;

use clap::Parser;
use ingester::destinations::postgres::PostgresDestination;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct InitDb {
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub async fn run(cfg: &Config) -> Result<()> {
    let dest = PostgresDestination::connect(&(&cfg.db).into()).await?;
    dest.create_tables().await?;
    info!("schema ready in {}", cfg.db.name);

    Ok(())
}
