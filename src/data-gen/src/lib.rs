use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use common::guests as guest_stats;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::records::GuestProfile;
use common::records::MarketingPerformance;
use common::records::StayedLine;
use common::types::BookingStatus;
use common::types::FILE_BOOKINGS_WITH_CHARGES;
use common::types::FILE_DAILY_OCCUPANCY;
use common::types::FILE_GUEST_PROFILES;
use common::types::FILE_MARKETING_PERFORMANCE;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::bookings::BookingProvider;
use crate::error::DataGenError;
use crate::error::Result;

pub mod bookings;
pub mod dictionary;
pub mod error;
pub mod guests;
pub mod marketing;
pub mod occupancy;
pub mod output;
pub mod weather;

#[derive(Debug, Clone)]
pub struct Config {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub guests: usize,
    pub bookings: usize,
    pub total_rooms: i32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap_or_default(),
            guests: 500,
            bookings: 800,
            total_rooms: 100,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if (self.to - self.from).num_days() < 7 {
            return Err(DataGenError::InvalidConfig(format!(
                "season {} to {} must span at least a week",
                self.from, self.to
            )));
        }
        if self.guests == 0 {
            return Err(DataGenError::InvalidConfig("at least one guest is required".to_string()));
        }
        if self.total_rooms <= 0 {
            return Err(DataGenError::InvalidConfig(format!(
                "total rooms must be positive, got {}",
                self.total_rooms
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub guests: Vec<GuestProfile>,
    pub charge_lines: Vec<ChargeLine>,
    pub occupancy: Vec<DailyOccupancy>,
    pub marketing: Vec<MarketingPerformance>,
}

impl Dataset {
    pub fn bookings(&self) -> usize {
        self.charge_lines
            .iter()
            .map(|l| l.booking_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

pub fn generate(cfg: &Config) -> Result<Dataset> {
    cfg.validate()?;

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!("generating guest profiles");
    let mut guests = crate::guests::generate(&mut rng, cfg.guests)?;

    info!("generating bookings and charges");
    let charge_lines = BookingProvider::try_new()?.generate(&mut rng, cfg, &guests);

    let stayed: Vec<StayedLine> = charge_lines
        .iter()
        .filter(|l| BookingStatus::is_stayed(&l.booking_status))
        .map(StayedLine::from)
        .collect();
    let stats = guest_stats::lifetime_stats(&stayed);
    for guest in guests.iter_mut() {
        guest_stats::apply_stats(guest, stats.get(&guest.guest_id));
    }

    info!("generating daily occupancy");
    let occupancy = occupancy::generate(&mut rng, cfg, &charge_lines)?;

    info!("generating marketing performance");
    let marketing = marketing::generate(&mut rng, cfg, &charge_lines);

    Ok(Dataset {
        guests,
        charge_lines,
        occupancy,
        marketing,
    })
}

/// Writes the four CSV files into `dir`, creating it when absent.
pub fn write(dataset: &Dataset, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    output::write_csv(&dir.join(FILE_GUEST_PROFILES), &dataset.guests)?;
    output::write_csv(&dir.join(FILE_BOOKINGS_WITH_CHARGES), &dataset.charge_lines)?;
    output::write_csv(&dir.join(FILE_DAILY_OCCUPANCY), &dataset.occupancy)?;
    output::write_csv(&dir.join(FILE_MARKETING_PERFORMANCE), &dataset.marketing)?;

    info!(
        "generated {} guests, {} bookings",
        dataset.guests.len(),
        dataset.bookings()
    );

    Ok(())
}
