pub mod aggregate;
pub mod decimal;
pub mod error;
pub mod guests;
pub mod metrics;
pub mod parse;
pub mod records;
pub mod types;

pub use types::MONEY_SCALE;
pub use types::RATE_SCALE;
