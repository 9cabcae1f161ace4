//! Hotel KPI formulas: occupancy, ADR, RevPAR and the marketing funnel ratios.
//!
//! Every ratio degrades to zero when its denominator is zero (or negative for
//! available rooms), so no formula can fault on empty days or idle channels.

use rust_decimal::Decimal;

use crate::decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomInventory {
    pub total_rooms: i32,
    pub rooms_out_of_service: i32,
    pub rooms_blocked: i32,
}

impl RoomInventory {
    pub fn available(&self) -> i32 {
        self.total_rooms - self.rooms_out_of_service - self.rooms_blocked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyMetrics {
    pub available_rooms: i32,
    pub occupancy_pct: Decimal,
    pub adr_eur: Decimal,
    pub revpar_eur: Decimal,
}

pub fn occupancy(inventory: RoomInventory, rooms_sold: i32, room_revenue: Decimal) -> OccupancyMetrics {
    let available = inventory.available();
    let (occupancy_pct, revpar) = if available > 0 {
        let available = Decimal::from(available);
        (
            Decimal::from(rooms_sold) / available * Decimal::ONE_HUNDRED,
            room_revenue / available,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    let adr = decimal::ratio(room_revenue, Decimal::from(rooms_sold));

    OccupancyMetrics {
        available_rooms: available,
        occupancy_pct: decimal::percent(occupancy_pct),
        adr_eur: decimal::money(adr),
        revpar_eur: decimal::money(revpar),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Funnel {
    pub clicks: i32,
    pub sessions: i32,
    pub bookings: i32,
    pub revenue: Decimal,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketingMetrics {
    pub cpc_eur: Decimal,
    pub cpa_eur: Decimal,
    pub roas: Decimal,
    pub conversion_rate: Decimal,
}

pub fn marketing(funnel: Funnel) -> MarketingMetrics {
    MarketingMetrics {
        cpc_eur: decimal::money(decimal::ratio(funnel.cost, Decimal::from(funnel.clicks))),
        cpa_eur: decimal::money(decimal::ratio(funnel.cost, Decimal::from(funnel.bookings))),
        roas: decimal::rate(decimal::ratio(funnel.revenue, funnel.cost)),
        conversion_rate: decimal::rate(decimal::ratio(
            Decimal::from(funnel.bookings),
            Decimal::from(funnel.sessions),
        )),
    }
}
