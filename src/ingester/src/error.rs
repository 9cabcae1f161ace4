use std::io;
use std::result;

use common::error::CommonError;
use thiserror::Error;

pub type Result<T> = result::Result<T, IngesterError>;

#[derive(Error, Debug)]
pub enum IngesterError {
    #[error("General: {0:?}")]
    General(String),
    #[error("{file}:{line}: column {column:?} value {value:?}: {source}")]
    Parse {
        file: String,
        line: u64,
        column: String,
        value: String,
        source: CommonError,
    },
    #[error("constraint violation on {table}: {message}")]
    ConstraintViolation { table: String, message: String },
    #[error("csv: {0:?}")]
    Csv(#[from] csv::Error),
    #[error("io: {0:?}")]
    Io(#[from] io::Error),
    #[error("database: {0:?}")]
    Database(#[from] sqlx::Error),
    #[error("query: {0:?}")]
    Query(#[from] sea_query::error::Error),
}
