//! An in-process store with the same upsert rules as the PostgreSQL one.
//!
//! Used for dry runs and tests. A transaction works on a copy of the tables
//! and swaps it in on commit. Row timestamps are not kept. Decimals are stored
//! at their column scale and rejected when they overflow the column precision.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::decimal;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::records::GuestProfile;
use common::records::MarketingChannel;
use common::records::MarketingPerformance;
use common::records::StayedLine;
use common::types::BookingStatus;
use common::types::TABLE_BOOKINGS_WITH_CHARGES;
use common::types::TABLE_DAILY_OCCUPANCY;
use common::types::TABLE_GUEST_PROFILES;
use common::types::TABLE_MARKETING_CHANNELS;
use common::types::TABLE_MARKETING_PERFORMANCE;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::destination::Destination;
use crate::destination::Transaction;
use crate::error::IngesterError;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub channels: BTreeMap<String, MarketingChannel>,
    pub guests: BTreeMap<String, GuestProfile>,
    pub charge_lines: BTreeMap<String, ChargeLine>,
    pub occupancy: BTreeMap<(NaiveDate, String), DailyOccupancy>,
    pub marketing: BTreeMap<(NaiveDate, String, String), MarketingPerformance>,
}

fn unique_keys<K: Ord + Debug>(table: &str, keys: impl Iterator<Item = K>) -> Result<()> {
    let mut seen = BTreeSet::new();
    for key in keys {
        if seen.contains(&key) {
            return Err(IngesterError::ConstraintViolation {
                table: table.to_string(),
                message: format!("key {key:?} appears twice in one statement"),
            });
        }
        seen.insert(key);
    }

    Ok(())
}

/// Rounds `v` into a NUMERIC(precision, scale) column.
fn numeric(table: &str, column: &str, v: Decimal, precision: u32, scale: u32) -> Result<Decimal> {
    let v = decimal::round(v, scale);
    let limit = Decimal::from(10_i64.pow(precision - scale));
    if v.abs() >= limit {
        return Err(IngesterError::ConstraintViolation {
            table: table.to_string(),
            message: format!("value {v} out of range for column {column} numeric({precision},{scale})"),
        });
    }

    Ok(v)
}

fn money(table: &str, column: &str, v: Decimal) -> Result<Decimal> {
    numeric(table, column, v, 12, 2)
}

fn rate(table: &str, column: &str, v: Decimal) -> Result<Decimal> {
    numeric(table, column, v, 10, 4)
}

fn opt_money(table: &str, column: &str, v: Option<Decimal>) -> Result<Option<Decimal>> {
    v.map(|v| money(table, column, v)).transpose()
}

fn fit_guest(row: &GuestProfile) -> Result<GuestProfile> {
    let t = TABLE_GUEST_PROFILES;
    Ok(GuestProfile {
        lifetime_revenue_eur: money(t, "lifetime_revenue_eur", row.lifetime_revenue_eur)?,
        ..row.clone()
    })
}

fn fit_charge_line(row: &ChargeLine) -> Result<ChargeLine> {
    let t = TABLE_BOOKINGS_WITH_CHARGES;
    Ok(ChargeLine {
        unit_price_eur: money(t, "unit_price_eur", row.unit_price_eur)?,
        quantity: money(t, "quantity", row.quantity)?,
        line_subtotal_eur: money(t, "line_subtotal_eur", row.line_subtotal_eur)?,
        tax_rate: rate(t, "tax_rate", row.tax_rate)?,
        line_tax_eur: money(t, "line_tax_eur", row.line_tax_eur)?,
        line_total_eur: money(t, "line_total_eur", row.line_total_eur)?,
        room_revenue_eur: opt_money(t, "room_revenue_eur", row.room_revenue_eur)?,
        fb_revenue_eur: opt_money(t, "fb_revenue_eur", row.fb_revenue_eur)?,
        activities_revenue_eur: opt_money(t, "activities_revenue_eur", row.activities_revenue_eur)?,
        total_revenue_eur: opt_money(t, "total_revenue_eur", row.total_revenue_eur)?,
        discount_eur: opt_money(t, "discount_eur", row.discount_eur)?,
        net_revenue_eur: opt_money(t, "net_revenue_eur", row.net_revenue_eur)?,
        ..row.clone()
    })
}

fn fit_occupancy(row: &DailyOccupancy) -> Result<DailyOccupancy> {
    let t = TABLE_DAILY_OCCUPANCY;
    Ok(DailyOccupancy {
        occupancy_pct: numeric(t, "occupancy_pct", row.occupancy_pct, 6, 2)?,
        room_revenue_eur: money(t, "room_revenue_eur", row.room_revenue_eur)?,
        adr_eur: money(t, "adr_eur", row.adr_eur)?,
        revpar_eur: money(t, "revpar_eur", row.revpar_eur)?,
        avg_temperature_c: numeric(t, "avg_temperature_c", row.avg_temperature_c, 5, 1)?,
        ..row.clone()
    })
}

fn fit_marketing(row: &MarketingPerformance) -> Result<MarketingPerformance> {
    let t = TABLE_MARKETING_PERFORMANCE;
    Ok(MarketingPerformance {
        total_revenue_eur: money(t, "total_revenue_eur", row.total_revenue_eur)?,
        room_revenue_eur: money(t, "room_revenue_eur", row.room_revenue_eur)?,
        marketing_cost_eur: money(t, "marketing_cost_eur", row.marketing_cost_eur)?,
        cpc_eur: money(t, "cpc_eur", row.cpc_eur)?,
        cpa_eur: money(t, "cpa_eur", row.cpa_eur)?,
        roas: rate(t, "roas", row.roas)?,
        conversion_rate: rate(t, "conversion_rate", row.conversion_rate)?,
        ..row.clone()
    })
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDestination {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed state of every table.
    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }
}

#[async_trait]
impl Destination for MemoryDestination {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let state = self.tables.lock().await.clone();

        Ok(Box::new(MemoryTransaction {
            state,
            target: self.tables.clone(),
        }))
    }
}

pub struct MemoryTransaction {
    state: Tables,
    target: Arc<Mutex<Tables>>,
}

#[async_trait]
impl Transaction for MemoryTransaction {
    async fn upsert_channels(&mut self, rows: &[MarketingChannel]) -> Result<()> {
        unique_keys(TABLE_MARKETING_CHANNELS, rows.iter().map(|r| &r.channel))?;
        for row in rows {
            self.state
                .channels
                .entry(row.channel.clone())
                .or_insert_with(|| row.clone());
        }

        Ok(())
    }

    async fn upsert_guests(&mut self, rows: &[GuestProfile]) -> Result<()> {
        unique_keys(TABLE_GUEST_PROFILES, rows.iter().map(|r| &r.guest_id))?;
        for row in rows {
            let row = fit_guest(row)?;
            match self.state.guests.entry(row.guest_id.clone()) {
                Entry::Occupied(mut stored) => {
                    let stored = stored.get_mut();
                    stored.lifetime_bookings = row.lifetime_bookings;
                    stored.lifetime_revenue_eur = row.lifetime_revenue_eur;
                    stored.first_booking_date = row.first_booking_date;
                    stored.most_recent_booking_date = row.most_recent_booking_date;
                    stored.age_at_check_in = row.age_at_check_in;
                }
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
        }

        Ok(())
    }

    async fn upsert_charge_lines(&mut self, rows: &[ChargeLine]) -> Result<()> {
        unique_keys(TABLE_BOOKINGS_WITH_CHARGES, rows.iter().map(|r| &r.line_id))?;
        for row in rows {
            let row = fit_charge_line(row)?;
            if let Entry::Vacant(slot) = self.state.charge_lines.entry(row.line_id.clone()) {
                slot.insert(row);
            }
        }

        Ok(())
    }

    async fn upsert_occupancy(&mut self, rows: &[DailyOccupancy]) -> Result<()> {
        unique_keys(TABLE_DAILY_OCCUPANCY, rows.iter().map(DailyOccupancy::key))?;
        for row in rows {
            self.state.occupancy.insert(row.key(), fit_occupancy(row)?);
        }

        Ok(())
    }

    async fn upsert_marketing(&mut self, rows: &[MarketingPerformance]) -> Result<()> {
        unique_keys(
            TABLE_MARKETING_PERFORMANCE,
            rows.iter().map(MarketingPerformance::key),
        )?;
        for row in rows {
            self.state.marketing.insert(row.key(), fit_marketing(row)?);
        }

        Ok(())
    }

    async fn stayed_lines(&mut self) -> Result<Vec<StayedLine>> {
        Ok(self
            .state
            .charge_lines
            .values()
            .filter(|l| BookingStatus::is_stayed(&l.booking_status))
            .map(StayedLine::from)
            .collect())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { state, target } = *self;
        *target.lock().await = state;

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
