//! The load pipeline.
//!
//! Stages run in a fixed order inside one transaction: the channel dimension,
//! guests, charge lines, guests again (so lifetime stats see the freshly
//! loaded lines), occupancy, marketing, commit. A stage whose input file is
//! absent is skipped. Any failure rolls the whole load back.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use common::records::MarketingChannel;
use common::types::FILE_BOOKINGS_WITH_CHARGES;
use common::types::FILE_DAILY_OCCUPANCY;
use common::types::FILE_GUEST_PROFILES;
use common::types::FILE_MARKETING_PERFORMANCE;
use strum_macros::Display;
use tracing::error;
use tracing::info;

use crate::destination::Destination;
use crate::destination::Transaction;
use crate::error::IngesterError;
use crate::error::Result;
use crate::sources::csv;
use crate::transformers::guest_stats;

pub const DEFAULT_BATCH_SIZE: usize = 500;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Stage {
    DimensionsLoaded,
    GuestsLoaded,
    BookingsLoaded,
    GuestsReloaded,
    OccupancyLoaded,
    MarketingLoaded,
    Committed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Rows(usize),
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rows(n) => write!(f, "{n} rows"),
            Outcome::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub stages: Vec<(Stage, Outcome)>,
}

impl Summary {
    fn record(&mut self, stage: Stage, outcome: Outcome) {
        info!("{stage}: {outcome}");
        self.stages.push((stage, outcome));
    }

    pub fn outcome(&self, stage: Stage) -> Option<Outcome> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, o)| *o)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

pub struct Pipeline {
    destination: Arc<dyn Destination>,
    cfg: Config,
}

impl Pipeline {
    pub fn try_new(destination: Arc<dyn Destination>, cfg: Config) -> Result<Self> {
        if cfg.batch_size == 0 {
            return Err(IngesterError::General("batch size must be positive".to_string()));
        }

        Ok(Self { destination, cfg })
    }

    fn input(&self, file: &str) -> Option<PathBuf> {
        let path = self.cfg.data_dir.join(file);
        path.exists().then_some(path)
    }

    pub async fn run(&self) -> Result<Summary> {
        info!("loading from {}", self.cfg.data_dir.display());

        let mut tx = self.destination.begin().await?;
        let mut summary = match self.stages(tx.as_mut()).await {
            Ok(summary) => summary,
            Err(err) => {
                error!("load failed, rolling back: {err}");
                if let Err(rb) = tx.rollback().await {
                    error!("rollback failed: {rb}");
                }
                return Err(err);
            }
        };

        tx.commit().await?;
        let total = summary
            .stages
            .iter()
            .map(|(_, o)| match o {
                Outcome::Rows(n) => *n,
                Outcome::Skipped => 0,
            })
            .sum();
        summary.record(Stage::Committed, Outcome::Rows(total));

        Ok(summary)
    }

    async fn stages(&self, tx: &mut dyn Transaction) -> Result<Summary> {
        let mut summary = Summary::default();

        let channels = MarketingChannel::seed();
        for chunk in channels.chunks(self.cfg.batch_size) {
            tx.upsert_channels(chunk).await?;
        }
        summary.record(Stage::DimensionsLoaded, Outcome::Rows(channels.len()));

        let guests = self.input(FILE_GUEST_PROFILES);
        let bookings = self.input(FILE_BOOKINGS_WITH_CHARGES);

        let outcome = match &guests {
            Some(path) => Outcome::Rows(self.load_guests(tx, path).await?),
            None => Outcome::Skipped,
        };
        summary.record(Stage::GuestsLoaded, outcome);

        let outcome = match &bookings {
            Some(path) => {
                let rows = csv::read_charge_lines(path)?;
                for chunk in rows.chunks(self.cfg.batch_size) {
                    tx.upsert_charge_lines(chunk).await?;
                }
                Outcome::Rows(rows.len())
            }
            None => Outcome::Skipped,
        };
        summary.record(Stage::BookingsLoaded, outcome);

        let outcome = match (&guests, &bookings) {
            (Some(path), Some(_)) => Outcome::Rows(self.load_guests(tx, path).await?),
            _ => Outcome::Skipped,
        };
        summary.record(Stage::GuestsReloaded, outcome);

        let outcome = match self.input(FILE_DAILY_OCCUPANCY) {
            Some(path) => {
                let rows = csv::read_occupancy(&path)?;
                for chunk in rows.chunks(self.cfg.batch_size) {
                    tx.upsert_occupancy(chunk).await?;
                }
                Outcome::Rows(rows.len())
            }
            None => Outcome::Skipped,
        };
        summary.record(Stage::OccupancyLoaded, outcome);

        let outcome = match self.input(FILE_MARKETING_PERFORMANCE) {
            Some(path) => {
                let rows = csv::read_marketing(&path)?;
                for chunk in rows.chunks(self.cfg.batch_size) {
                    tx.upsert_marketing(chunk).await?;
                }
                Outcome::Rows(rows.len())
            }
            None => Outcome::Skipped,
        };
        summary.record(Stage::MarketingLoaded, outcome);

        Ok(summary)
    }

    async fn load_guests(&self, tx: &mut dyn Transaction, path: &Path) -> Result<usize> {
        let rows = csv::read_guests(path)?;
        let stayed = tx.stayed_lines().await?;
        let rows = guest_stats::recompute(rows, &stayed);
        for chunk in rows.chunks(self.cfg.batch_size) {
            tx.upsert_guests(chunk).await?;
        }

        Ok(rows.len())
    }
}
