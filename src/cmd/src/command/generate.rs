use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct Generate {
    /// Directory the CSV files are written to
    #[arg(long, default_value = "data")]
    pub out: PathBuf,
    /// First day of the season
    #[arg(long, default_value = "2024-12-01")]
    pub from: NaiveDate,
    /// Last day of the season
    #[arg(long, default_value = "2025-04-30")]
    pub to: NaiveDate,
    #[arg(long, default_value = "500")]
    pub guests: usize,
    /// Upper bound on generated bookings
    #[arg(long, default_value = "800")]
    pub bookings: usize,
    #[arg(long, default_value = "100")]
    pub total_rooms: i32,
    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<&Generate> for data_gen::Config {
    fn from(args: &Generate) -> Self {
        data_gen::Config {
            from: args.from,
            to: args.to,
            guests: args.guests,
            bookings: args.bookings,
            total_rooms: args.total_rooms,
            seed: args.seed,
        }
    }
}

pub fn run(args: &Generate) -> Result<()> {
    info!(
        "generating season {} to {} into {}",
        args.from,
        args.to,
        args.out.display()
    );

    let dataset = data_gen::generate(&args.into())?;
    data_gen::write(&dataset, &args.out)?;

    Ok(())
}
