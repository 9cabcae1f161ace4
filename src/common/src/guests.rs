use std::collections::BTreeSet;
use std::collections::HashMap;

use chrono::Datelike;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal;
use crate::records::GuestProfile;
use crate::records::StayedLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifetimeStats {
    pub bookings: i32,
    pub revenue: Decimal,
    pub first_booking: Option<NaiveDate>,
    pub last_booking: Option<NaiveDate>,
}

impl Default for LifetimeStats {
    fn default() -> Self {
        Self {
            bookings: 0,
            revenue: decimal::zero_money(),
            first_booking: None,
            last_booking: None,
        }
    }
}

/// Age in whole years on `at`. Absent when either date is unknown.
pub fn age_at(date_of_birth: Option<NaiveDate>, at: Option<NaiveDate>) -> Option<i32> {
    let (dob, at) = (date_of_birth?, at?);
    let birthday_pending = (at.month(), at.day()) < (dob.month(), dob.day());

    Some(at.year() - dob.year() - i32::from(birthday_pending))
}

/// Aggregates stayed charge lines per guest.
///
/// Bookings are counted once each while net revenue is summed over every
/// stayed line.
pub fn lifetime_stats<'a, I>(lines: I) -> HashMap<String, LifetimeStats>
where I: IntoIterator<Item = &'a StayedLine> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut stats: HashMap<String, LifetimeStats> = HashMap::new();

    for line in lines {
        let entry = stats.entry(line.guest_id.clone()).or_default();
        entry.first_booking = Some(match entry.first_booking {
            Some(d) => d.min(line.check_in_date),
            None => line.check_in_date,
        });
        entry.last_booking = Some(match entry.last_booking {
            Some(d) => d.max(line.check_in_date),
            None => line.check_in_date,
        });

        if seen.insert((line.guest_id.as_str(), line.booking_id.as_str())) {
            entry.bookings += 1;
        }
        if let Some(net) = line.net_revenue_eur {
            entry.revenue = decimal::money(entry.revenue + net);
        }
    }

    stats
}

/// Overwrites the derived columns of a guest profile.
pub fn apply_stats(guest: &mut GuestProfile, stats: Option<&LifetimeStats>) {
    let stats = stats.cloned().unwrap_or_default();

    guest.lifetime_bookings = stats.bookings;
    guest.lifetime_revenue_eur = stats.revenue;
    guest.first_booking_date = stats.first_booking;
    guest.most_recent_booking_date = stats.last_booking;
    guest.age_at_check_in = age_at(guest.date_of_birth, stats.first_booking);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn line(guest: &str, booking: &str, check_in: NaiveDate, net: Option<i64>) -> StayedLine {
        StayedLine {
            guest_id: guest.to_string(),
            booking_id: booking.to_string(),
            check_in_date: check_in,
            net_revenue_eur: net.map(|v| Decimal::new(v, 2)),
        }
    }

    #[test]
    fn age_around_birthday() {
        let dob = Some(d(2000, 6, 15));
        assert_eq!(age_at(dob, Some(d(2025, 6, 14))), Some(24));
        assert_eq!(age_at(dob, Some(d(2025, 6, 15))), Some(25));
        assert_eq!(age_at(dob, Some(d(2025, 12, 1))), Some(25));
        assert_eq!(age_at(None, Some(d(2025, 6, 15))), None);
        assert_eq!(age_at(dob, None), None);
    }

    #[test]
    fn leap_day_birthday() {
        let dob = Some(d(2004, 2, 29));
        assert_eq!(age_at(dob, Some(d(2025, 2, 28))), Some(20));
        assert_eq!(age_at(dob, Some(d(2025, 3, 1))), Some(21));
    }

    #[test]
    fn stats_count_bookings_once_and_sum_every_line() {
        let lines = vec![
            line("G1", "B1", d(2025, 1, 10), Some(50000)),
            line("G1", "B1", d(2025, 1, 10), Some(50000)),
            line("G1", "B1", d(2025, 1, 10), Some(50000)),
            line("G1", "B2", d(2024, 12, 20), Some(12050)),
            line("G2", "B3", d(2025, 2, 1), None),
        ];
        let stats = lifetime_stats(&lines);

        let g1 = &stats["G1"];
        assert_eq!(g1.bookings, 2);
        assert_eq!(g1.revenue, Decimal::new(162050, 2));
        assert_eq!(g1.first_booking, Some(d(2024, 12, 20)));
        assert_eq!(g1.last_booking, Some(d(2025, 1, 10)));

        let g2 = &stats["G2"];
        assert_eq!(g2.bookings, 1);
        assert_eq!(g2.revenue.to_string(), "0.00");
    }

    #[test]
    fn revenue_repeats_with_each_line_of_a_booking() {
        let lines = vec![
            line("G1", "B1", d(2025, 1, 10), Some(10000)),
            line("G1", "B1", d(2025, 1, 10), Some(10000)),
            line("G1", "B1", d(2025, 1, 10), Some(10000)),
        ];
        let stats = lifetime_stats(&lines);

        assert_eq!(stats["G1"].bookings, 1);
        assert_eq!(stats["G1"].revenue, Decimal::new(30000, 2));
    }

    #[test]
    fn guest_without_stays() {
        let lines: Vec<StayedLine> = Vec::new();
        let stats = lifetime_stats(&lines);
        assert!(stats.is_empty());

        let empty = LifetimeStats::default();
        assert_eq!(empty.bookings, 0);
        assert_eq!(empty.revenue.to_string(), "0.00");
        assert_eq!(empty.first_booking, None);
    }
}
