use std::io;
use std::result;

use rand::distributions::WeightedError;
use thiserror::Error;

pub type Result<T> = result::Result<T, DataGenError>;

#[derive(Error, Debug)]
pub enum DataGenError {
    #[error("Internal: {0:?}")]
    Internal(String),
    #[error("InvalidConfig: {0:?}")]
    InvalidConfig(String),
    #[error("WeightedError: {0:?}")]
    WeightedError(#[from] WeightedError),
    #[error("CSVError: {0:?}")]
    CSVError(#[from] csv::Error),
    #[error("IOError: {0:?}")]
    IOError(#[from] io::Error),
}
