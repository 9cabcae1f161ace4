//! CSV extracts of the four fact relations.
//!
//! Rows are first read as raw text and then converted field by field, so a
//! bad value is reported with its file, line and column. Unknown columns are
//! ignored and absent ones read as empty.

use std::path::Path;

use chrono::NaiveDate;
use common::decimal;
use common::parse;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::records::GuestProfile;
use common::records::MarketingPerformance;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::IngesterError;
use crate::error::Result;

/// Position of the record being converted.
pub struct Row<'a> {
    pub file: &'a str,
    pub line: u64,
}

impl<'a> Row<'a> {
    fn parse<T>(
        &self,
        column: &str,
        value: &str,
        f: impl FnOnce(&str) -> common::error::Result<T>,
    ) -> Result<T> {
        f(value).map_err(|source| IngesterError::Parse {
            file: self.file.to_string(),
            line: self.line,
            column: column.to_string(),
            value: value.to_string(),
            source,
        })
    }

    fn key(&self, column: &str, value: String) -> Result<String> {
        self.parse(column, &value, |v| {
            if v.trim().is_empty() {
                Err(common::error::CommonError::MissingValue)
            } else {
                Ok(())
            }
        })?;

        Ok(value)
    }

    fn int(&self, column: &str, value: &str) -> Result<i32> {
        self.parse(column, value, parse::int)
    }

    fn decimal(&self, column: &str, value: &str) -> Result<Decimal> {
        self.parse(column, value, parse::decimal)
    }

    fn opt_decimal(&self, column: &str, value: &str) -> Result<Option<Decimal>> {
        self.parse(column, value, parse::opt_decimal)
    }

    fn date(&self, column: &str, value: &str) -> Result<NaiveDate> {
        self.parse(column, value, parse::date)
    }

    fn opt_date(&self, column: &str, value: &str) -> Result<Option<NaiveDate>> {
        self.parse(column, value, parse::opt_date)
    }

    fn boolean(&self, column: &str, value: &str) -> Result<bool> {
        self.parse(column, value, parse::boolean)
    }
}

pub trait CsvRecord: DeserializeOwned {
    type Record;

    fn convert(self, row: &Row) -> Result<Self::Record>;
}

/// Reads and converts every record of the file at `path`.
pub fn read<T: CsvRecord>(path: &Path) -> Result<Vec<T::Record>> {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = rdr.headers()?.clone();

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let raw: T = rec.deserialize(Some(&headers))?;
        out.push(raw.convert(&Row { file: &file, line })?);
    }

    Ok(out)
}

pub fn read_guests(path: &Path) -> Result<Vec<GuestProfile>> {
    read::<CSVGuestProfile>(path)
}

pub fn read_charge_lines(path: &Path) -> Result<Vec<ChargeLine>> {
    read::<CSVChargeLine>(path)
}

pub fn read_occupancy(path: &Path) -> Result<Vec<DailyOccupancy>> {
    read::<CSVDailyOccupancy>(path)
}

pub fn read_marketing(path: &Path) -> Result<Vec<MarketingPerformance>> {
    read::<CSVMarketingPerformance>(path)
}

// lifetime columns of the extract are ignored; they are recomputed on load
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CSVGuestProfile {
    guest_id: String,
    first_name: String,
    last_name: String,
    email: String,
    date_of_birth: String,
    gender: String,
    country_of_residence: String,
    city_of_residence: String,
    nationality: String,
    family_status: String,
    primary_purpose_of_stay: String,
    travel_party_type: String,
    preferred_room_type: String,
    ski_skill_level: String,
    email_marketing_opt_in: String,
    sms_opt_in: String,
    loyalty_member: String,
    loyalty_tier: String,
}

impl CsvRecord for CSVGuestProfile {
    type Record = GuestProfile;

    fn convert(self, row: &Row) -> Result<GuestProfile> {
        Ok(GuestProfile {
            guest_id: row.key("guest_id", self.guest_id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_of_birth: row.opt_date("date_of_birth", &self.date_of_birth)?,
            gender: self.gender,
            country_of_residence: self.country_of_residence,
            city_of_residence: self.city_of_residence,
            nationality: self.nationality,
            family_status: self.family_status,
            primary_purpose_of_stay: self.primary_purpose_of_stay,
            travel_party_type: self.travel_party_type,
            preferred_room_type: self.preferred_room_type,
            ski_skill_level: self.ski_skill_level,
            email_marketing_opt_in: row.boolean("email_marketing_opt_in", &self.email_marketing_opt_in)?,
            sms_opt_in: row.boolean("sms_opt_in", &self.sms_opt_in)?,
            loyalty_member: row.boolean("loyalty_member", &self.loyalty_member)?,
            loyalty_tier: self.loyalty_tier,
            age_at_check_in: None,
            lifetime_bookings: 0,
            lifetime_revenue_eur: decimal::zero_money(),
            first_booking_date: None,
            most_recent_booking_date: None,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CSVChargeLine {
    line_id: String,
    booking_id: String,
    guest_id: String,
    check_in_date: String,
    check_out_date: String,
    nights: String,
    num_guests: String,
    num_adults: String,
    num_children: String,
    room_type: String,
    board_type: String,
    booking_status: String,
    booking_channel: String,
    booking_created_date: String,
    country: String,
    charge_date: String,
    charge_category: String,
    charge_item: String,
    unit_price_eur: String,
    quantity: String,
    line_subtotal_eur: String,
    tax_rate: String,
    line_tax_eur: String,
    line_total_eur: String,
    room_revenue_eur: String,
    fb_revenue_eur: String,
    activities_revenue_eur: String,
    total_revenue_eur: String,
    discount_eur: String,
    net_revenue_eur: String,
}

impl CsvRecord for CSVChargeLine {
    type Record = ChargeLine;

    fn convert(self, row: &Row) -> Result<ChargeLine> {
        Ok(ChargeLine {
            line_id: row.key("line_id", self.line_id)?,
            booking_id: row.key("booking_id", self.booking_id)?,
            guest_id: row.key("guest_id", self.guest_id)?,
            check_in_date: row.date("check_in_date", &self.check_in_date)?,
            check_out_date: row.date("check_out_date", &self.check_out_date)?,
            nights: row.int("nights", &self.nights)?,
            num_guests: row.int("num_guests", &self.num_guests)?,
            num_adults: row.int("num_adults", &self.num_adults)?,
            num_children: row.int("num_children", &self.num_children)?,
            room_type: self.room_type,
            board_type: self.board_type,
            booking_status: self.booking_status,
            booking_channel: self.booking_channel,
            booking_created_date: row.date("booking_created_date", &self.booking_created_date)?,
            country: self.country,
            charge_date: row.date("charge_date", &self.charge_date)?,
            charge_category: self.charge_category,
            charge_item: self.charge_item,
            unit_price_eur: row.decimal("unit_price_eur", &self.unit_price_eur)?,
            quantity: row.decimal("quantity", &self.quantity)?,
            line_subtotal_eur: row.decimal("line_subtotal_eur", &self.line_subtotal_eur)?,
            tax_rate: row.decimal("tax_rate", &self.tax_rate)?,
            line_tax_eur: row.decimal("line_tax_eur", &self.line_tax_eur)?,
            line_total_eur: row.decimal("line_total_eur", &self.line_total_eur)?,
            room_revenue_eur: row.opt_decimal("room_revenue_eur", &self.room_revenue_eur)?,
            fb_revenue_eur: row.opt_decimal("fb_revenue_eur", &self.fb_revenue_eur)?,
            activities_revenue_eur: row
                .opt_decimal("activities_revenue_eur", &self.activities_revenue_eur)?,
            total_revenue_eur: row.opt_decimal("total_revenue_eur", &self.total_revenue_eur)?,
            discount_eur: row.opt_decimal("discount_eur", &self.discount_eur)?,
            net_revenue_eur: row.opt_decimal("net_revenue_eur", &self.net_revenue_eur)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CSVDailyOccupancy {
    date: String,
    room_type: String,
    total_rooms: String,
    rooms_sold: String,
    rooms_out_of_service: String,
    rooms_blocked: String,
    occupancy_pct: String,
    room_revenue_eur: String,
    adr_eur: String,
    revpar_eur: String,
    weather_condition: String,
    avg_temperature_c: String,
    snow_depth_cm: String,
}

impl CsvRecord for CSVDailyOccupancy {
    type Record = DailyOccupancy;

    fn convert(self, row: &Row) -> Result<DailyOccupancy> {
        Ok(DailyOccupancy {
            date: row.date("date", &self.date)?,
            room_type: row.key("room_type", self.room_type)?,
            total_rooms: row.int("total_rooms", &self.total_rooms)?,
            rooms_sold: row.int("rooms_sold", &self.rooms_sold)?,
            rooms_out_of_service: row.int("rooms_out_of_service", &self.rooms_out_of_service)?,
            rooms_blocked: row.int("rooms_blocked", &self.rooms_blocked)?,
            occupancy_pct: row.decimal("occupancy_pct", &self.occupancy_pct)?,
            room_revenue_eur: row.decimal("room_revenue_eur", &self.room_revenue_eur)?,
            adr_eur: row.decimal("adr_eur", &self.adr_eur)?,
            revpar_eur: row.decimal("revpar_eur", &self.revpar_eur)?,
            weather_condition: self.weather_condition,
            avg_temperature_c: row.decimal("avg_temperature_c", &self.avg_temperature_c)?,
            snow_depth_cm: row.int("snow_depth_cm", &self.snow_depth_cm)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CSVMarketingPerformance {
    date: String,
    channel: String,
    campaign_name: String,
    impressions: String,
    clicks: String,
    sessions: String,
    bookings: String,
    room_nights: String,
    total_revenue_eur: String,
    room_revenue_eur: String,
    marketing_cost_eur: String,
    cpc_eur: String,
    cpa_eur: String,
    roas: String,
    conversion_rate: String,
}

impl CsvRecord for CSVMarketingPerformance {
    type Record = MarketingPerformance;

    fn convert(self, row: &Row) -> Result<MarketingPerformance> {
        Ok(MarketingPerformance {
            date: row.date("date", &self.date)?,
            channel: row.key("channel", self.channel)?,
            campaign_name: row.key("campaign_name", self.campaign_name)?,
            impressions: row.int("impressions", &self.impressions)?,
            clicks: row.int("clicks", &self.clicks)?,
            sessions: row.int("sessions", &self.sessions)?,
            bookings: row.int("bookings", &self.bookings)?,
            room_nights: row.int("room_nights", &self.room_nights)?,
            total_revenue_eur: row.decimal("total_revenue_eur", &self.total_revenue_eur)?,
            room_revenue_eur: row.decimal("room_revenue_eur", &self.room_revenue_eur)?,
            marketing_cost_eur: row.decimal("marketing_cost_eur", &self.marketing_cost_eur)?,
            cpc_eur: row.decimal("cpc_eur", &self.cpc_eur)?,
            cpa_eur: row.decimal("cpa_eur", &self.cpa_eur)?,
            roas: row.decimal("roas", &self.roas)?,
            conversion_rate: row.decimal("conversion_rate", &self.conversion_rate)?,
        })
    }
}
