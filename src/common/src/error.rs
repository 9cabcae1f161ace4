use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("invalid date {0:?}")]
    InvalidDate(String),
    #[error("invalid decimal {0:?}")]
    InvalidDecimal(String),
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),
    #[error("invalid boolean {0:?}")]
    InvalidBoolean(String),
    #[error("missing value")]
    MissingValue,
}
