//! Identifiers of the analytics tables.

use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum GuestProfiles {
    Table,
    GuestId,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Gender,
    CountryOfResidence,
    CityOfResidence,
    Nationality,
    FamilyStatus,
    PrimaryPurposeOfStay,
    TravelPartyType,
    PreferredRoomType,
    SkiSkillLevel,
    EmailMarketingOptIn,
    SmsOptIn,
    LoyaltyMember,
    LoyaltyTier,
    AgeAtCheckIn,
    LifetimeBookings,
    LifetimeRevenueEur,
    FirstBookingDate,
    MostRecentBookingDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum BookingsWithCharges {
    Table,
    LineId,
    BookingId,
    GuestId,
    CheckInDate,
    CheckOutDate,
    Nights,
    NumGuests,
    NumAdults,
    NumChildren,
    RoomType,
    BoardType,
    BookingStatus,
    BookingChannel,
    BookingCreatedDate,
    Country,
    ChargeDate,
    ChargeCategory,
    ChargeItem,
    UnitPriceEur,
    Quantity,
    LineSubtotalEur,
    TaxRate,
    LineTaxEur,
    LineTotalEur,
    RoomRevenueEur,
    FbRevenueEur,
    ActivitiesRevenueEur,
    TotalRevenueEur,
    DiscountEur,
    NetRevenueEur,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum DailyOccupancy {
    Table,
    Date,
    RoomType,
    TotalRooms,
    RoomsSold,
    RoomsOutOfService,
    RoomsBlocked,
    OccupancyPct,
    RoomRevenueEur,
    AdrEur,
    RevparEur,
    WeatherCondition,
    AvgTemperatureC,
    SnowDepthCm,
}

#[derive(Iden, Clone, Copy)]
pub enum MarketingPerformance {
    Table,
    Date,
    Channel,
    CampaignName,
    Impressions,
    Clicks,
    Sessions,
    Bookings,
    RoomNights,
    TotalRevenueEur,
    RoomRevenueEur,
    MarketingCostEur,
    CpcEur,
    CpaEur,
    Roas,
    ConversionRate,
}

#[derive(Iden, Clone, Copy)]
pub enum MarketingChannels {
    Table,
    Channel,
    ChannelCategory,
    Description,
}
