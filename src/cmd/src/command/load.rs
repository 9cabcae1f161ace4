use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ingester::destination::Destination;
use ingester::destinations::memory::MemoryDestination;
use ingester::destinations::postgres::PostgresDestination;
use ingester::pipeline;
use ingester::pipeline::Pipeline;
use ingester::pipeline::Summary;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct Load {
    /// Directory holding the CSV files
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Rows per upsert statement
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Load into memory only, leaving the database untouched
    #[arg(long)]
    pub dry_run: bool,
    /// TOML settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Load {
    pub fn pipeline_config(&self, cfg: &Config) -> pipeline::Config {
        pipeline::Config {
            data_dir: self.data.clone().unwrap_or_else(|| cfg.data.path.clone()),
            batch_size: self.batch_size.unwrap_or(cfg.load.batch_size),
        }
    }
}

pub async fn run(args: &Load, cfg: &Config) -> Result<Summary> {
    let pcfg = args.pipeline_config(cfg);
    if !pcfg.data_dir.is_dir() {
        return Err(Error::FileNotFound(format!(
            "data directory {:?} doesn't exist",
            pcfg.data_dir
        )));
    }

    let dest: Arc<dyn Destination> = if args.dry_run {
        info!("dry run, loading into memory");
        Arc::new(MemoryDestination::new())
    } else {
        Arc::new(PostgresDestination::connect(&(&cfg.db).into()).await?)
    };

    Ok(Pipeline::try_new(dest, pcfg)?.run().await?)
}
