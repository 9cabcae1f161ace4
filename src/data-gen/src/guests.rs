use chrono::NaiveDate;
use common::decimal;
use common::records::GuestProfile;
use enum_iterator::all;
use fake::faker::address::en::CityName;
use fake::faker::name::en::FirstName;
use fake::faker::name::en::LastName;
use fake::Fake;
use rand::rngs::StdRng;
use rand::Rng;

use crate::dictionary::RoomType;
use crate::dictionary::COUNTRIES;
use crate::dictionary::FAMILY_STATUSES;
use crate::dictionary::GENDERS;
use crate::dictionary::LOYALTY_TIERS;
use crate::dictionary::PURPOSES_OF_STAY;
use crate::dictionary::SKI_SKILL_LEVELS;
use crate::dictionary::TRAVEL_PARTY_TYPES;
use crate::error::DataGenError;
use crate::error::Result;

pub fn guest_id(idx: usize) -> String {
    format!("GUEST-{idx:06}")
}

pub(crate) fn pick<T: Copy>(rng: &mut StdRng, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

fn email(first: &str, last: &str, idx: usize) -> String {
    let clean = |s: &str| {
        s.chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase()
    };

    format!("{}.{}{}@example.com", clean(first), clean(last), idx)
}

fn date_of_birth(rng: &mut StdRng) -> Result<NaiveDate> {
    let (y, m, d) = (
        rng.gen_range(1950..=2005),
        rng.gen_range(1..=12),
        rng.gen_range(1..=28),
    );

    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DataGenError::Internal(format!("invalid date of birth {y}-{m}-{d}")))
}

/// Guest profiles numbered from 1. Derived columns start empty and are
/// filled once bookings exist.
pub fn generate(rng: &mut StdRng, count: usize) -> Result<Vec<GuestProfile>> {
    let room_types: Vec<RoomType> = all::<RoomType>().collect();
    let mut guests = Vec::with_capacity(count);

    for idx in 1..=count {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let loyalty_tier = if rng.gen::<f64>() > 0.3 {
            pick(rng, &LOYALTY_TIERS)
        } else {
            "None"
        };

        guests.push(GuestProfile {
            guest_id: guest_id(idx),
            email: email(&first_name, &last_name, idx),
            first_name,
            last_name,
            date_of_birth: Some(date_of_birth(rng)?),
            gender: pick(rng, &GENDERS).to_string(),
            country_of_residence: pick(rng, &COUNTRIES).to_string(),
            city_of_residence: CityName().fake_with_rng(rng),
            nationality: pick(rng, &COUNTRIES).to_string(),
            family_status: pick(rng, &FAMILY_STATUSES).to_string(),
            primary_purpose_of_stay: pick(rng, &PURPOSES_OF_STAY).to_string(),
            travel_party_type: pick(rng, &TRAVEL_PARTY_TYPES).to_string(),
            preferred_room_type: pick(rng, &room_types).to_string(),
            ski_skill_level: pick(rng, &SKI_SKILL_LEVELS).to_string(),
            email_marketing_opt_in: rng.gen(),
            sms_opt_in: rng.gen(),
            loyalty_member: rng.gen(),
            loyalty_tier: loyalty_tier.to_string(),
            age_at_check_in: None,
            lifetime_bookings: 0,
            lifetime_revenue_eur: decimal::zero_money(),
            first_booking_date: None,
            most_recent_booking_date: None,
        });
    }

    Ok(guests)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ids_and_emails() {
        assert_eq!(guest_id(7), "GUEST-000007");
        assert_eq!(email("Mary Ann", "O'Neil", 3), "maryann.oneil3@example.com");
    }

    #[test]
    fn same_seed_same_guests() {
        let a = generate(&mut StdRng::seed_from_u64(42), 20).unwrap();
        let b = generate(&mut StdRng::seed_from_u64(42), 20).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        assert_eq!(a[19].guest_id, "GUEST-000020");
        assert!(a.iter().all(|g| g.lifetime_bookings == 0));
    }
}
