//! Bookings and their charge lines.
//!
//! Every booking gets one room line per night, meal lines per night according
//! to its board type and, with some probability, a handful of activity lines.
//! Booking-level rollups are computed once all lines of a booking exist and
//! copied onto each of them.

use std::str::FromStr;

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use common::decimal;
use common::records::BookingRollup;
use common::records::ChargeLine;
use common::records::GuestProfile;
use common::types::BookingStatus;
use common::types::ChargeCategory;
use enum_iterator::all;
use rand::rngs::StdRng;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::dictionary::Activity;
use crate::dictionary::BoardType;
use crate::dictionary::RoomType;
use crate::dictionary::Weighted;
use crate::dictionary::BOOKINGS_PER_GUEST_WEIGHTS;
use crate::dictionary::BOOKING_CHANNELS;
use crate::dictionary::BOOKING_STATUS_WEIGHTS;
use crate::dictionary::NIGHTS_WEIGHTS;
use crate::guests::pick;
use crate::weather::is_peak_season;
use crate::Config;

pub fn tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

pub fn booking_id(year: i32, idx: usize) -> String {
    format!("LIV-{year}-{idx:06}")
}

pub fn line_id(booking_id: &str, n: usize) -> String {
    format!("{booking_id}-LINE-{n:03}")
}

/// Computes the booking-level totals from all lines of one booking.
///
/// F&B and activity revenue stay absent when the booking has no such lines.
pub fn rollup(lines: &[ChargeLine], discount: Decimal) -> BookingRollup {
    let mut room: Option<Decimal> = None;
    let mut fb: Option<Decimal> = None;
    let mut activities: Option<Decimal> = None;
    let mut total = decimal::zero_money();

    for line in lines {
        let bucket = match ChargeCategory::from_str(&line.charge_category) {
            Ok(ChargeCategory::Room) => &mut room,
            Ok(ChargeCategory::FoodAndBeverage) => &mut fb,
            _ => &mut activities,
        };
        *bucket = Some(bucket.unwrap_or_else(decimal::zero_money) + line.line_subtotal_eur);
        total += line.line_total_eur;
    }

    let total = decimal::money(total);
    let discount = decimal::money(discount);

    BookingRollup {
        room_revenue_eur: room.map(decimal::money),
        fb_revenue_eur: fb.map(decimal::money),
        activities_revenue_eur: activities.map(decimal::money),
        total_revenue_eur: Some(total),
        discount_eur: Some(discount),
        net_revenue_eur: Some(decimal::money(total - discount)),
    }
}

struct Booking<'a> {
    id: String,
    guest: &'a GuestProfile,
    created: NaiveDate,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: i32,
    num_adults: i32,
    num_children: i32,
    room_type: RoomType,
    board: BoardType,
    status: BookingStatus,
    channel: &'static str,
    lines: Vec<ChargeLine>,
}

impl<'a> Booking<'a> {
    fn num_guests(&self) -> i32 {
        self.num_adults + self.num_children
    }

    fn push_line(&mut self, charge_date: NaiveDate, category: &str, item: &str, unit_price: Decimal) {
        let unit_price = decimal::money(unit_price);
        let quantity = Decimal::new(100, 2);
        let subtotal = decimal::money(unit_price * quantity);
        let tax = decimal::money(subtotal * tax_rate());

        let line = ChargeLine {
            line_id: line_id(&self.id, self.lines.len() + 1),
            booking_id: self.id.clone(),
            guest_id: self.guest.guest_id.clone(),
            check_in_date: self.check_in,
            check_out_date: self.check_out,
            nights: self.nights,
            num_guests: self.num_guests(),
            num_adults: self.num_adults,
            num_children: self.num_children,
            room_type: self.room_type.to_string(),
            board_type: self.board.to_string(),
            booking_status: self.status.to_string(),
            booking_channel: self.channel.to_string(),
            booking_created_date: self.created,
            country: self.guest.country_of_residence.clone(),
            charge_date,
            charge_category: category.to_string(),
            charge_item: item.to_string(),
            unit_price_eur: unit_price,
            quantity,
            line_subtotal_eur: subtotal,
            tax_rate: tax_rate(),
            line_tax_eur: tax,
            line_total_eur: subtotal + tax,
            room_revenue_eur: None,
            fb_revenue_eur: None,
            activities_revenue_eur: None,
            total_revenue_eur: None,
            discount_eur: None,
            net_revenue_eur: None,
        };
        self.lines.push(line);
    }
}

pub struct BookingProvider {
    statuses: Weighted<BookingStatus>,
    bookings_per_guest: Weighted<usize>,
    nights: Weighted<i32>,
    room_types: Vec<RoomType>,
    boards: Vec<BoardType>,
    activities: Vec<Activity>,
}

impl BookingProvider {
    pub fn try_new() -> crate::error::Result<Self> {
        Ok(Self {
            statuses: Weighted::try_new(&BOOKING_STATUS_WEIGHTS)?,
            bookings_per_guest: Weighted::try_new(&BOOKINGS_PER_GUEST_WEIGHTS)?,
            nights: Weighted::try_new(&NIGHTS_WEIGHTS)?,
            room_types: all::<RoomType>().collect(),
            boards: all::<BoardType>().collect(),
            activities: all::<Activity>().collect(),
        })
    }

    /// Generates up to `cfg.bookings` bookings spread over the guests and
    /// returns their charge lines. Stays that would end after `cfg.to` are
    /// dropped.
    pub fn generate(
        &self,
        rng: &mut StdRng,
        cfg: &Config,
        guests: &[GuestProfile],
    ) -> Vec<ChargeLine> {
        let season_days = (cfg.to - cfg.from).num_days();
        let mut lines = Vec::new();
        let mut idx = 1;

        'guests: for guest in guests {
            let count = self.bookings_per_guest.sample(rng);
            for _ in 0..count {
                if idx > cfg.bookings {
                    break 'guests;
                }

                let check_in = cfg.from + Duration::days(rng.gen_range(0..=season_days - 7));
                let nights = self.nights.sample(rng);
                let check_out = check_in + Duration::days(i64::from(nights));
                if check_out > cfg.to {
                    continue;
                }

                let booking = self.booking(rng, cfg, guest, booking_id(cfg.to.year(), idx), check_in, nights);
                lines.extend(booking.lines);
                idx += 1;
            }
        }

        debug!(bookings = idx - 1, lines = lines.len(), "bookings generated");

        lines
    }

    fn booking<'a>(
        &self,
        rng: &mut StdRng,
        cfg: &Config,
        guest: &'a GuestProfile,
        id: String,
        check_in: NaiveDate,
        nights: i32,
    ) -> Booking<'a> {
        let room_type = pick(rng, &self.room_types);
        let capacity = room_type.capacity();
        let num_adults = rng.gen_range(1..=capacity);
        let num_children = rng.gen_range(0..=capacity - num_adults);

        let mut booking = Booking {
            id,
            guest,
            created: cfg.from - Duration::days(rng.gen_range(0..=90)),
            check_in,
            check_out: check_in + Duration::days(i64::from(nights)),
            nights,
            num_adults,
            num_children,
            room_type,
            board: pick(rng, &self.boards),
            status: self.statuses.sample(rng),
            channel: pick(rng, &BOOKING_CHANNELS),
            lines: Vec::new(),
        };

        let room = ChargeCategory::Room.to_string();
        for night in 0..nights {
            let charge_date = check_in + Duration::days(i64::from(night));
            let multiplier = if is_peak_season(charge_date) {
                Decimal::new(rng.gen_range(120..=150), 2)
            } else {
                Decimal::new(rng.gen_range(80..=100), 2)
            };
            booking.push_line(charge_date, &room, "Room Night", room_type.base_price() * multiplier);
        }

        let fb = ChargeCategory::FoodAndBeverage.to_string();
        for night in 0..nights {
            let charge_date = check_in + Duration::days(i64::from(night));
            for meal in booking.board.meals() {
                let per_guest = Decimal::new(rng.gen_range(1500..=4500), 2);
                let price = per_guest * Decimal::from(booking.num_guests());
                booking.push_line(charge_date, &fb, meal, price);
            }
        }

        let activity_probability = if booking.status == BookingStatus::Stayed && is_peak_season(check_in) {
            0.7
        } else {
            0.3
        };
        if rng.gen::<f64>() < activity_probability {
            for _ in 0..rng.gen_range(1..=5) {
                let charge_date = check_in + Duration::days(rng.gen_range(0..i64::from(nights)));
                let activity = pick(rng, &self.activities);
                let item = pick(rng, activity.items());
                let (lo, hi) = activity.price_cents();
                let mut price = Decimal::new(rng.gen_range(lo..=hi), 2);
                if activity.per_adult() {
                    price *= Decimal::from(booking.num_adults);
                }
                booking.push_line(charge_date, &activity.to_string(), item, price);
            }
        }

        let discount = if rng.gen::<f64>() < 0.2 {
            Decimal::new(rng.gen_range(0..=5000), 2)
        } else {
            decimal::zero_money()
        };
        let totals = rollup(&booking.lines, discount);
        for line in booking.lines.iter_mut() {
            line.set_rollup(&totals);
        }

        booking
    }
}
