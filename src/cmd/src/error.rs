use std::result;

use data_gen::error::DataGenError;
use ingester::error::IngesterError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("data generation: {0}")]
    DataGen(#[from] DataGenError),
    #[error("load: {0}")]
    Ingester(#[from] IngesterError),
    #[error("config: {0}")]
    Config(#[from] config::ConfigError),
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("tracing: {0}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
}
