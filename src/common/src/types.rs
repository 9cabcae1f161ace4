use std::str::FromStr;

use strum_macros::Display;
use strum_macros::EnumString;

/// Scale of every monetary column (EUR cents).
pub const MONEY_SCALE: u32 = 2;
/// Scale of ratio columns such as ROAS and conversion rate.
pub const RATE_SCALE: u32 = 4;
/// Scale of percentage columns such as occupancy.
pub const PERCENT_SCALE: u32 = 2;

pub const TABLE_GUEST_PROFILES: &str = "guest_profiles";
pub const TABLE_BOOKINGS_WITH_CHARGES: &str = "bookings_with_charges";
pub const TABLE_DAILY_OCCUPANCY: &str = "daily_occupancy";
pub const TABLE_MARKETING_PERFORMANCE: &str = "marketing_performance";
pub const TABLE_MARKETING_CHANNELS: &str = "marketing_channels";

pub const FILE_GUEST_PROFILES: &str = "guest_profiles.csv";
pub const FILE_BOOKINGS_WITH_CHARGES: &str = "bookings_with_charges.csv";
pub const FILE_DAILY_OCCUPANCY: &str = "daily_occupancy.csv";
pub const FILE_MARKETING_PERFORMANCE: &str = "marketing_performance.csv";

/// Room type of the occupancy row aggregating every room of the property.
pub const ROOM_TYPE_ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum BookingStatus {
    Stayed,
    Cancelled,
    #[strum(serialize = "No-show")]
    NoShow,
}

impl BookingStatus {
    pub fn is_stayed(status: &str) -> bool {
        matches!(BookingStatus::from_str(status), Ok(BookingStatus::Stayed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ChargeCategory {
    Room,
    #[strum(serialize = "F&B")]
    FoodAndBeverage,
    Spa,
    SkiPass,
    EquipmentRental,
    AirportTransfer,
    Other,
}

impl ChargeCategory {
    pub fn is_room(category: &str) -> bool {
        matches!(ChargeCategory::from_str(category), Ok(ChargeCategory::Room))
    }
}

/// Marketing channel dimension seed: channel and its category.
pub const MARKETING_CHANNELS: [(&str, &str); 10] = [
    ("Direct-Web", "Direct"),
    ("Direct-Phone", "Direct"),
    ("OTA-Booking.com", "OTA"),
    ("OTA-Expedia", "OTA"),
    ("TravelAgent", "Travel Agent"),
    ("Corporate", "Corporate"),
    ("Social-Paid", "Social"),
    ("Social-Organic", "Social"),
    ("Email", "Email"),
    ("Search-Ads", "Paid Search"),
];

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::BookingStatus;
    use super::ChargeCategory;

    #[test]
    fn status_names() {
        assert_eq!(BookingStatus::NoShow.to_string(), "No-show");
        assert_eq!(BookingStatus::from_str("No-show").unwrap(), BookingStatus::NoShow);
        assert!(BookingStatus::is_stayed("Stayed"));
        assert!(!BookingStatus::is_stayed("stayed"));
        assert!(!BookingStatus::is_stayed("Cancelled"));
    }

    #[test]
    fn category_names() {
        assert_eq!(ChargeCategory::FoodAndBeverage.to_string(), "F&B");
        assert!(ChargeCategory::is_room("Room"));
        assert!(!ChargeCategory::is_room("F&B"));
    }
}
