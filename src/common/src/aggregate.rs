//! Roll charge lines up into the per-night and per-channel totals that daily
//! occupancy and marketing performance are derived from.
//!
//! Only bookings with status "Stayed" are counted.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Days;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal;
use crate::records::ChargeLine;
use crate::types::BookingStatus;
use crate::types::ChargeCategory;
use crate::types::ROOM_TYPE_ALL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightTotals {
    pub bookings: BTreeSet<String>,
    pub room_revenue: Decimal,
}

impl Default for NightTotals {
    fn default() -> Self {
        Self {
            bookings: BTreeSet::new(),
            room_revenue: decimal::zero_money(),
        }
    }
}

impl NightTotals {
    pub fn rooms_sold(&self) -> i32 {
        self.bookings.len() as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTotals {
    pub bookings: BTreeSet<String>,
    pub room_nights: i32,
    pub revenue: Decimal,
    pub room_revenue: Decimal,
}

impl Default for ChannelTotals {
    fn default() -> Self {
        Self {
            bookings: BTreeSet::new(),
            room_nights: 0,
            revenue: decimal::zero_money(),
            room_revenue: decimal::zero_money(),
        }
    }
}

impl ChannelTotals {
    pub fn bookings_count(&self) -> i32 {
        self.bookings.len() as i32
    }
}

pub type NightKey = (NaiveDate, String);
pub type ChannelKey = (NaiveDate, String);

fn stayed(lines: &[ChargeLine]) -> impl Iterator<Item = &ChargeLine> {
    lines
        .iter()
        .filter(|l| BookingStatus::is_stayed(&l.booking_status))
}

/// Rooms sold and room revenue per night and room type.
///
/// A booking occupies its room on every night from check-in up to, but not
/// including, check-out. Each night also gets a [`ROOM_TYPE_ALL`] entry
/// covering every room type.
pub fn nightly_rooms(lines: &[ChargeLine]) -> BTreeMap<NightKey, NightTotals> {
    let mut out: BTreeMap<NightKey, NightTotals> = BTreeMap::new();
    let mut stays: BTreeMap<&str, (NaiveDate, NaiveDate, &str)> = BTreeMap::new();

    for line in stayed(lines) {
        stays.entry(line.booking_id.as_str()).or_insert((
            line.check_in_date,
            line.check_out_date,
            line.room_type.as_str(),
        ));

        if ChargeCategory::is_room(&line.charge_category) {
            for room_type in [line.room_type.as_str(), ROOM_TYPE_ALL] {
                let totals = out
                    .entry((line.charge_date, room_type.to_string()))
                    .or_default();
                totals.room_revenue = decimal::money(totals.room_revenue + line.line_subtotal_eur);
            }
        }
    }

    for (booking_id, (check_in, check_out, room_type)) in stays {
        let mut night = check_in;
        while night < check_out {
            for rt in [room_type, ROOM_TYPE_ALL] {
                out.entry((night, rt.to_string()))
                    .or_default()
                    .bookings
                    .insert(booking_id.to_string());
            }
            night = match night.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => break,
            };
        }
    }

    out
}

/// Distinct bookings, room nights and revenue per check-in date and channel.
pub fn channel_checkins(lines: &[ChargeLine]) -> BTreeMap<ChannelKey, ChannelTotals> {
    let mut out: BTreeMap<ChannelKey, ChannelTotals> = BTreeMap::new();

    for line in stayed(lines) {
        let totals = out
            .entry((line.check_in_date, line.booking_channel.clone()))
            .or_default();

        if totals.bookings.insert(line.booking_id.clone()) {
            totals.room_nights += line.nights;
        }
        totals.revenue = decimal::money(totals.revenue + line.line_total_eur);
        if ChargeCategory::is_room(&line.charge_category) {
            totals.room_revenue = decimal::money(totals.room_revenue + line.line_total_eur);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn line(booking: &str, status: &str, category: &str, charge_date: NaiveDate, subtotal: i64) -> ChargeLine {
        ChargeLine {
            line_id: format!("{booking}-{category}-{charge_date}"),
            booking_id: booking.to_string(),
            guest_id: "GUEST-000001".to_string(),
            check_in_date: d(1, 10),
            check_out_date: d(1, 12),
            nights: 2,
            num_guests: 2,
            num_adults: 2,
            num_children: 0,
            room_type: "Deluxe".to_string(),
            board_type: "B&B".to_string(),
            booking_status: status.to_string(),
            booking_channel: "Direct-Web".to_string(),
            booking_created_date: d(1, 1),
            country: "Italy".to_string(),
            charge_date,
            charge_category: category.to_string(),
            charge_item: "Item".to_string(),
            unit_price_eur: Decimal::new(subtotal, 2),
            quantity: Decimal::new(100, 2),
            line_subtotal_eur: Decimal::new(subtotal, 2),
            tax_rate: Decimal::new(10, 2),
            line_tax_eur: Decimal::new(subtotal / 10, 2),
            line_total_eur: Decimal::new(subtotal + subtotal / 10, 2),
            room_revenue_eur: None,
            fb_revenue_eur: None,
            activities_revenue_eur: None,
            total_revenue_eur: None,
            discount_eur: None,
            net_revenue_eur: None,
        }
    }

    #[test]
    fn nights_count_bookings_not_lines() {
        let lines = vec![
            line("B1", "Stayed", "Room", d(1, 10), 20000),
            line("B1", "Stayed", "Room", d(1, 11), 20000),
            line("B1", "Stayed", "F&B", d(1, 10), 3000),
            line("B2", "Cancelled", "Room", d(1, 10), 15000),
            line("B3", "No-show", "Room", d(1, 10), 15000),
        ];
        let nights = nightly_rooms(&lines);

        let all = &nights[&(d(1, 10), ROOM_TYPE_ALL.to_string())];
        assert_eq!(all.rooms_sold(), 1);
        assert_eq!(all.room_revenue, Decimal::new(20000, 2));

        let deluxe = &nights[&(d(1, 11), "Deluxe".to_string())];
        assert_eq!(deluxe.rooms_sold(), 1);

        // check-out night is free
        assert!(!nights.contains_key(&(d(1, 12), ROOM_TYPE_ALL.to_string())));
    }

    #[test]
    fn channel_bookings_are_distinct() {
        let lines = vec![
            line("B1", "Stayed", "Room", d(1, 10), 20000),
            line("B1", "Stayed", "Room", d(1, 11), 20000),
            line("B1", "Stayed", "Spa", d(1, 11), 10000),
            line("B2", "Stayed", "Room", d(1, 10), 10000),
            line("B3", "Cancelled", "Room", d(1, 10), 10000),
        ];
        let channels = channel_checkins(&lines);
        assert_eq!(channels.len(), 1);

        let totals = &channels[&(d(1, 10), "Direct-Web".to_string())];
        assert_eq!(totals.bookings_count(), 2);
        assert_eq!(totals.room_nights, 4);
        assert_eq!(totals.revenue, Decimal::new(66000, 2));
        assert_eq!(totals.room_revenue, Decimal::new(55000, 2));
    }
}
