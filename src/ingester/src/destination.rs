use async_trait::async_trait;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::records::GuestProfile;
use common::records::MarketingChannel;
use common::records::MarketingPerformance;
use common::records::StayedLine;

use crate::error::Result;

/// A relational store the pipeline loads into.
#[async_trait]
pub trait Destination: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn Transaction>>;
}

/// Writes made through a transaction become visible only on commit.
///
/// Each upsert call writes one batch. A batch carrying the same key twice is
/// a constraint violation.
#[async_trait]
pub trait Transaction: Send {
    /// Inserts channels that are not stored yet.
    async fn upsert_channels(&mut self, rows: &[MarketingChannel]) -> Result<()>;
    /// Inserts guests; a stored guest gets its lifetime columns refreshed.
    async fn upsert_guests(&mut self, rows: &[GuestProfile]) -> Result<()>;
    /// Inserts charge lines; a stored line is only touched.
    async fn upsert_charge_lines(&mut self, rows: &[ChargeLine]) -> Result<()>;
    async fn upsert_occupancy(&mut self, rows: &[DailyOccupancy]) -> Result<()>;
    async fn upsert_marketing(&mut self, rows: &[MarketingPerformance]) -> Result<()>;
    /// Stored charge lines of bookings that were stayed.
    async fn stayed_lines(&mut self) -> Result<Vec<StayedLine>>;
    async fn commit(self: Box<Self>) -> Result<()>;
    async fn rollback(self: Box<Self>) -> Result<()>;
}
