//! Rows of the five analytics relations.
//!
//! Field names match both the CSV headers and the database columns.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::MARKETING_CHANNELS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestProfile {
    pub guest_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub country_of_residence: String,
    pub city_of_residence: String,
    pub nationality: String,
    pub family_status: String,
    pub primary_purpose_of_stay: String,
    pub travel_party_type: String,
    pub preferred_room_type: String,
    pub ski_skill_level: String,
    pub email_marketing_opt_in: bool,
    pub sms_opt_in: bool,
    pub loyalty_member: bool,
    pub loyalty_tier: String,
    // derived on load
    pub age_at_check_in: Option<i32>,
    pub lifetime_bookings: i32,
    pub lifetime_revenue_eur: Decimal,
    pub first_booking_date: Option<NaiveDate>,
    pub most_recent_booking_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeLine {
    pub line_id: String,
    pub booking_id: String,
    pub guest_id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i32,
    pub num_guests: i32,
    pub num_adults: i32,
    pub num_children: i32,
    pub room_type: String,
    pub board_type: String,
    pub booking_status: String,
    pub booking_channel: String,
    pub booking_created_date: NaiveDate,
    pub country: String,
    pub charge_date: NaiveDate,
    pub charge_category: String,
    pub charge_item: String,
    pub unit_price_eur: Decimal,
    pub quantity: Decimal,
    pub line_subtotal_eur: Decimal,
    pub tax_rate: Decimal,
    pub line_tax_eur: Decimal,
    pub line_total_eur: Decimal,
    pub room_revenue_eur: Option<Decimal>,
    pub fb_revenue_eur: Option<Decimal>,
    pub activities_revenue_eur: Option<Decimal>,
    pub total_revenue_eur: Option<Decimal>,
    pub discount_eur: Option<Decimal>,
    pub net_revenue_eur: Option<Decimal>,
}

impl ChargeLine {
    pub fn rollup(&self) -> BookingRollup {
        BookingRollup {
            room_revenue_eur: self.room_revenue_eur,
            fb_revenue_eur: self.fb_revenue_eur,
            activities_revenue_eur: self.activities_revenue_eur,
            total_revenue_eur: self.total_revenue_eur,
            discount_eur: self.discount_eur,
            net_revenue_eur: self.net_revenue_eur,
        }
    }

    pub fn set_rollup(&mut self, rollup: &BookingRollup) {
        self.room_revenue_eur = rollup.room_revenue_eur;
        self.fb_revenue_eur = rollup.fb_revenue_eur;
        self.activities_revenue_eur = rollup.activities_revenue_eur;
        self.total_revenue_eur = rollup.total_revenue_eur;
        self.discount_eur = rollup.discount_eur;
        self.net_revenue_eur = rollup.net_revenue_eur;
    }
}

/// Booking-level totals copied onto every charge line of the booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingRollup {
    pub room_revenue_eur: Option<Decimal>,
    pub fb_revenue_eur: Option<Decimal>,
    pub activities_revenue_eur: Option<Decimal>,
    pub total_revenue_eur: Option<Decimal>,
    pub discount_eur: Option<Decimal>,
    pub net_revenue_eur: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyOccupancy {
    pub date: NaiveDate,
    pub room_type: String,
    pub total_rooms: i32,
    pub rooms_sold: i32,
    pub rooms_out_of_service: i32,
    pub rooms_blocked: i32,
    pub occupancy_pct: Decimal,
    pub room_revenue_eur: Decimal,
    pub adr_eur: Decimal,
    pub revpar_eur: Decimal,
    pub weather_condition: String,
    pub avg_temperature_c: Decimal,
    pub snow_depth_cm: i32,
}

impl DailyOccupancy {
    pub fn key(&self) -> (NaiveDate, String) {
        (self.date, self.room_type.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketingPerformance {
    pub date: NaiveDate,
    pub channel: String,
    pub campaign_name: String,
    pub impressions: i32,
    pub clicks: i32,
    pub sessions: i32,
    pub bookings: i32,
    pub room_nights: i32,
    pub total_revenue_eur: Decimal,
    pub room_revenue_eur: Decimal,
    pub marketing_cost_eur: Decimal,
    pub cpc_eur: Decimal,
    pub cpa_eur: Decimal,
    pub roas: Decimal,
    pub conversion_rate: Decimal,
}

impl MarketingPerformance {
    pub fn key(&self) -> (NaiveDate, String, String) {
        (self.date, self.channel.clone(), self.campaign_name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketingChannel {
    pub channel: String,
    pub channel_category: String,
    pub description: String,
}

impl MarketingChannel {
    pub fn new(channel: &str, category: &str) -> Self {
        Self {
            channel: channel.to_string(),
            channel_category: category.to_string(),
            description: format!("{category} channel"),
        }
    }

    /// The fixed channel taxonomy seeded into the dimension table.
    pub fn seed() -> Vec<MarketingChannel> {
        MARKETING_CHANNELS
            .iter()
            .map(|(channel, category)| MarketingChannel::new(channel, category))
            .collect()
    }
}

/// The slice of a stayed charge line needed to recompute guest statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayedLine {
    pub guest_id: String,
    pub booking_id: String,
    pub check_in_date: NaiveDate,
    pub net_revenue_eur: Option<Decimal>,
}

impl From<&ChargeLine> for StayedLine {
    fn from(line: &ChargeLine) -> Self {
        Self {
            guest_id: line.guest_id.clone(),
            booking_id: line.booking_id.clone(),
            check_in_date: line.check_in_date,
            net_revenue_eur: line.net_revenue_eur,
        }
    }
}
