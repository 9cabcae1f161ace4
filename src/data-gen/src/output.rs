use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Writes rows with a header derived from the record's field names.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;

    info!("generated {} with {} rows", path.display(), rows.len());

    Ok(rows.len())
}
