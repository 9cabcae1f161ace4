//! Fixed vocabularies of the synthetic hotel and their sampling weights.

use enum_iterator::Sequence;
use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use strum_macros::Display;

use common::types::BookingStatus;

use crate::error::Result;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display, Sequence)]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Family,
    Premium,
}

impl RoomType {
    pub fn capacity(self) -> i32 {
        match self {
            RoomType::Standard | RoomType::Deluxe | RoomType::Premium => 2,
            RoomType::Suite | RoomType::Family => 4,
        }
    }

    pub fn base_price(self) -> Decimal {
        let eur = match self {
            RoomType::Standard => 120,
            RoomType::Deluxe => 180,
            RoomType::Suite => 350,
            RoomType::Family => 200,
            RoomType::Premium => 250,
        };

        Decimal::new(eur, 0)
    }

    /// Rooms of this type in the property.
    pub fn inventory(self) -> i32 {
        match self {
            RoomType::Standard => 50,
            RoomType::Deluxe => 30,
            RoomType::Suite => 4,
            RoomType::Family => 15,
            RoomType::Premium => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display, Sequence)]
pub enum BoardType {
    #[strum(serialize = "Room only")]
    RoomOnly,
    #[strum(serialize = "B&B")]
    BedAndBreakfast,
    #[strum(serialize = "Half-board")]
    HalfBoard,
    #[strum(serialize = "Full-board")]
    FullBoard,
}

impl BoardType {
    /// Meals charged per night.
    pub fn meals(self) -> &'static [&'static str] {
        match self {
            BoardType::RoomOnly => &[],
            BoardType::BedAndBreakfast => &["Breakfast Buffet"],
            BoardType::HalfBoard => &["Breakfast Buffet", "Dinner Buffet"],
            BoardType::FullBoard => &["Breakfast Buffet", "Lunch Buffet", "Dinner Buffet"],
        }
    }
}

/// Extra charges a guest may buy during the stay. Names double as charge
/// categories.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Display, Sequence)]
pub enum Activity {
    SkiPass,
    EquipmentRental,
    Spa,
    AirportTransfer,
    Other,
}

impl Activity {
    pub fn items(self) -> &'static [&'static str] {
        match self {
            Activity::SkiPass => &[
                "Ski Pass - Full Day",
                "Ski Pass - Half Day",
                "Ski Pass - Multi Day",
            ],
            Activity::EquipmentRental => &[
                "Ski Rental - Standard",
                "Ski Rental - Premium",
                "Snowboard Rental",
                "Boots Rental",
            ],
            Activity::Spa => &["Massage", "Spa Package", "Sauna Access", "Wellness Treatment"],
            Activity::AirportTransfer => &[
                "Airport Transfer - One Way",
                "Airport Transfer - Round Trip",
            ],
            Activity::Other => &["Parking", "WiFi Premium", "Laundry Service", "Mini Bar"],
        }
    }

    /// Unit price range in cents, inclusive.
    pub fn price_cents(self) -> (i64, i64) {
        match self {
            Activity::SkiPass => (4000, 8000),
            Activity::EquipmentRental => (2500, 6000),
            Activity::Spa => (8000, 20000),
            Activity::AirportTransfer => (10000, 25000),
            Activity::Other => (1000, 5000),
        }
    }

    /// Whether the price is charged once per adult.
    pub fn per_adult(self) -> bool {
        matches!(self, Activity::SkiPass | Activity::EquipmentRental)
    }
}

pub const BOOKING_CHANNELS: [&str; 8] = [
    "Direct-Web",
    "Direct-Phone",
    "OTA-Booking.com",
    "OTA-Expedia",
    "TravelAgent",
    "Corporate",
    "Social-Paid",
    "Social-Organic",
];

pub const COUNTRIES: [&str; 9] = [
    "Italy",
    "Switzerland",
    "Germany",
    "UK",
    "Netherlands",
    "France",
    "Austria",
    "USA",
    "Canada",
];
pub const GENDERS: [&str; 4] = ["Male", "Female", "Non-binary", "Prefer not to say"];
pub const FAMILY_STATUSES: [&str; 4] = ["Solo", "Couple", "Family-with-children", "Group-of-friends"];
pub const PURPOSES_OF_STAY: [&str; 5] = [
    "Leisure-Ski",
    "Leisure-Summer",
    "Business",
    "Event",
    "Other",
];
pub const TRAVEL_PARTY_TYPES: [&str; 4] = ["Friends", "Family", "Couple", "Corporate group"];
pub const SKI_SKILL_LEVELS: [&str; 4] = ["Beginner", "Intermediate", "Advanced", "Non-skier"];
pub const LOYALTY_TIERS: [&str; 4] = ["None", "Silver", "Gold", "Platinum"];

pub const BOOKING_STATUS_WEIGHTS: [(BookingStatus, u32); 3] = [
    (BookingStatus::Stayed, 85),
    (BookingStatus::Cancelled, 10),
    (BookingStatus::NoShow, 5),
];
pub const BOOKINGS_PER_GUEST_WEIGHTS: [(usize, u32); 4] = [(1, 60), (2, 25), (3, 10), (4, 5)];
pub const NIGHTS_WEIGHTS: [(i32, u32); 7] = [
    (1, 10),
    (2, 20),
    (3, 25),
    (4, 20),
    (5, 15),
    (7, 8),
    (14, 2),
];

/// A fixed set of values sampled by weight.
#[derive(Debug, Clone)]
pub struct Weighted<T> {
    values: Vec<T>,
    idx: WeightedIndex<u32>,
}

impl<T: Copy> Weighted<T> {
    pub fn try_new(weights: &[(T, u32)]) -> Result<Self> {
        Ok(Self {
            values: weights.iter().map(|(v, _)| *v).collect(),
            idx: WeightedIndex::new(weights.iter().map(|(_, w)| *w))?,
        })
    }

    pub fn sample(&self, rng: &mut StdRng) -> T {
        self.values[self.idx.sample(rng)]
    }
}
