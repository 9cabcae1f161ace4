pub mod destination;
pub mod destinations;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod transformers;

pub use error::IngesterError;
pub use error::Result;
