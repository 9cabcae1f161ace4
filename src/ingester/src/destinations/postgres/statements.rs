//! SQL rendering for the PostgreSQL destination.
//!
//! Every insert is a single multi-row statement with an `ON CONFLICT`
//! clause describing how an existing row is refreshed.

use common::records::ChargeLine;
use common::records::DailyOccupancy as OccupancyRow;
use common::records::GuestProfile;
use common::records::MarketingChannel;
use common::records::MarketingPerformance as MarketingRow;
use common::types::BookingStatus;
use sea_query::ColumnDef;
use sea_query::Expr;
use sea_query::Index;
use sea_query::OnConflict;
use sea_query::PostgresQueryBuilder;
use sea_query::Query;
use sea_query::Table;

use super::schema::BookingsWithCharges;
use super::schema::DailyOccupancy;
use super::schema::GuestProfiles;
use super::schema::MarketingChannels;
use super::schema::MarketingPerformance;
use crate::error::Result;

pub fn insert_channels(rows: &[MarketingChannel]) -> Result<String> {
    let mut q = Query::insert();
    q.into_table(MarketingChannels::Table).columns([
        MarketingChannels::Channel,
        MarketingChannels::ChannelCategory,
        MarketingChannels::Description,
    ]);
    for row in rows {
        q.values([
            row.channel.clone().into(),
            row.channel_category.clone().into(),
            row.description.clone().into(),
        ])?;
    }
    q.on_conflict(
        OnConflict::column(MarketingChannels::Channel)
            .do_nothing()
            .to_owned(),
    );

    Ok(q.to_string(PostgresQueryBuilder))
}

/// Only the derived lifetime columns of an existing guest are refreshed.
pub fn insert_guests(rows: &[GuestProfile]) -> Result<String> {
    let mut q = Query::insert();
    q.into_table(GuestProfiles::Table).columns([
        GuestProfiles::GuestId,
        GuestProfiles::FirstName,
        GuestProfiles::LastName,
        GuestProfiles::Email,
        GuestProfiles::DateOfBirth,
        GuestProfiles::Gender,
        GuestProfiles::CountryOfResidence,
        GuestProfiles::CityOfResidence,
        GuestProfiles::Nationality,
        GuestProfiles::FamilyStatus,
        GuestProfiles::PrimaryPurposeOfStay,
        GuestProfiles::TravelPartyType,
        GuestProfiles::PreferredRoomType,
        GuestProfiles::SkiSkillLevel,
        GuestProfiles::EmailMarketingOptIn,
        GuestProfiles::SmsOptIn,
        GuestProfiles::LoyaltyMember,
        GuestProfiles::LoyaltyTier,
        GuestProfiles::AgeAtCheckIn,
        GuestProfiles::LifetimeBookings,
        GuestProfiles::LifetimeRevenueEur,
        GuestProfiles::FirstBookingDate,
        GuestProfiles::MostRecentBookingDate,
    ]);
    for g in rows {
        q.values([
            g.guest_id.clone().into(),
            g.first_name.clone().into(),
            g.last_name.clone().into(),
            g.email.clone().into(),
            g.date_of_birth.into(),
            g.gender.clone().into(),
            g.country_of_residence.clone().into(),
            g.city_of_residence.clone().into(),
            g.nationality.clone().into(),
            g.family_status.clone().into(),
            g.primary_purpose_of_stay.clone().into(),
            g.travel_party_type.clone().into(),
            g.preferred_room_type.clone().into(),
            g.ski_skill_level.clone().into(),
            g.email_marketing_opt_in.into(),
            g.sms_opt_in.into(),
            g.loyalty_member.into(),
            g.loyalty_tier.clone().into(),
            g.age_at_check_in.into(),
            g.lifetime_bookings.into(),
            g.lifetime_revenue_eur.into(),
            g.first_booking_date.into(),
            g.most_recent_booking_date.into(),
        ])?;
    }
    q.on_conflict(
        OnConflict::column(GuestProfiles::GuestId)
            .update_columns([
                GuestProfiles::LifetimeBookings,
                GuestProfiles::LifetimeRevenueEur,
                GuestProfiles::FirstBookingDate,
                GuestProfiles::MostRecentBookingDate,
                GuestProfiles::AgeAtCheckIn,
            ])
            .value(GuestProfiles::UpdatedAt, Expr::current_timestamp())
            .to_owned(),
    );

    Ok(q.to_string(PostgresQueryBuilder))
}

/// Charge lines are immutable once stored; a reload only touches `updated_at`.
pub fn insert_charge_lines(rows: &[ChargeLine]) -> Result<String> {
    let mut q = Query::insert();
    q.into_table(BookingsWithCharges::Table).columns([
        BookingsWithCharges::LineId,
        BookingsWithCharges::BookingId,
        BookingsWithCharges::GuestId,
        BookingsWithCharges::CheckInDate,
        BookingsWithCharges::CheckOutDate,
        BookingsWithCharges::Nights,
        BookingsWithCharges::NumGuests,
        BookingsWithCharges::NumAdults,
        BookingsWithCharges::NumChildren,
        BookingsWithCharges::RoomType,
        BookingsWithCharges::BoardType,
        BookingsWithCharges::BookingStatus,
        BookingsWithCharges::BookingChannel,
        BookingsWithCharges::BookingCreatedDate,
        BookingsWithCharges::Country,
        BookingsWithCharges::ChargeDate,
        BookingsWithCharges::ChargeCategory,
        BookingsWithCharges::ChargeItem,
        BookingsWithCharges::UnitPriceEur,
        BookingsWithCharges::Quantity,
        BookingsWithCharges::LineSubtotalEur,
        BookingsWithCharges::TaxRate,
        BookingsWithCharges::LineTaxEur,
        BookingsWithCharges::LineTotalEur,
        BookingsWithCharges::RoomRevenueEur,
        BookingsWithCharges::FbRevenueEur,
        BookingsWithCharges::ActivitiesRevenueEur,
        BookingsWithCharges::TotalRevenueEur,
        BookingsWithCharges::DiscountEur,
        BookingsWithCharges::NetRevenueEur,
    ]);
    for l in rows {
        q.values([
            l.line_id.clone().into(),
            l.booking_id.clone().into(),
            l.guest_id.clone().into(),
            l.check_in_date.into(),
            l.check_out_date.into(),
            l.nights.into(),
            l.num_guests.into(),
            l.num_adults.into(),
            l.num_children.into(),
            l.room_type.clone().into(),
            l.board_type.clone().into(),
            l.booking_status.clone().into(),
            l.booking_channel.clone().into(),
            l.booking_created_date.into(),
            l.country.clone().into(),
            l.charge_date.into(),
            l.charge_category.clone().into(),
            l.charge_item.clone().into(),
            l.unit_price_eur.into(),
            l.quantity.into(),
            l.line_subtotal_eur.into(),
            l.tax_rate.into(),
            l.line_tax_eur.into(),
            l.line_total_eur.into(),
            l.room_revenue_eur.into(),
            l.fb_revenue_eur.into(),
            l.activities_revenue_eur.into(),
            l.total_revenue_eur.into(),
            l.discount_eur.into(),
            l.net_revenue_eur.into(),
        ])?;
    }
    q.on_conflict(
        OnConflict::column(BookingsWithCharges::LineId)
            .value(BookingsWithCharges::UpdatedAt, Expr::current_timestamp())
            .to_owned(),
    );

    Ok(q.to_string(PostgresQueryBuilder))
}

pub fn insert_occupancy(rows: &[OccupancyRow]) -> Result<String> {
    let mut q = Query::insert();
    q.into_table(DailyOccupancy::Table).columns([
        DailyOccupancy::Date,
        DailyOccupancy::RoomType,
        DailyOccupancy::TotalRooms,
        DailyOccupancy::RoomsSold,
        DailyOccupancy::RoomsOutOfService,
        DailyOccupancy::RoomsBlocked,
        DailyOccupancy::OccupancyPct,
        DailyOccupancy::RoomRevenueEur,
        DailyOccupancy::AdrEur,
        DailyOccupancy::RevparEur,
        DailyOccupancy::WeatherCondition,
        DailyOccupancy::AvgTemperatureC,
        DailyOccupancy::SnowDepthCm,
    ]);
    for o in rows {
        q.values([
            o.date.into(),
            o.room_type.clone().into(),
            o.total_rooms.into(),
            o.rooms_sold.into(),
            o.rooms_out_of_service.into(),
            o.rooms_blocked.into(),
            o.occupancy_pct.into(),
            o.room_revenue_eur.into(),
            o.adr_eur.into(),
            o.revpar_eur.into(),
            o.weather_condition.clone().into(),
            o.avg_temperature_c.into(),
            o.snow_depth_cm.into(),
        ])?;
    }
    q.on_conflict(
        OnConflict::columns([DailyOccupancy::Date, DailyOccupancy::RoomType])
            .update_columns([
                DailyOccupancy::TotalRooms,
                DailyOccupancy::RoomsSold,
                DailyOccupancy::RoomsOutOfService,
                DailyOccupancy::RoomsBlocked,
                DailyOccupancy::OccupancyPct,
                DailyOccupancy::RoomRevenueEur,
                DailyOccupancy::AdrEur,
                DailyOccupancy::RevparEur,
                DailyOccupancy::WeatherCondition,
                DailyOccupancy::AvgTemperatureC,
                DailyOccupancy::SnowDepthCm,
            ])
            .to_owned(),
    );

    Ok(q.to_string(PostgresQueryBuilder))
}

pub fn insert_marketing(rows: &[MarketingRow]) -> Result<String> {
    let mut q = Query::insert();
    q.into_table(MarketingPerformance::Table).columns([
        MarketingPerformance::Date,
        MarketingPerformance::Channel,
        MarketingPerformance::CampaignName,
        MarketingPerformance::Impressions,
        MarketingPerformance::Clicks,
        MarketingPerformance::Sessions,
        MarketingPerformance::Bookings,
        MarketingPerformance::RoomNights,
        MarketingPerformance::TotalRevenueEur,
        MarketingPerformance::RoomRevenueEur,
        MarketingPerformance::MarketingCostEur,
        MarketingPerformance::CpcEur,
        MarketingPerformance::CpaEur,
        MarketingPerformance::Roas,
        MarketingPerformance::ConversionRate,
    ]);
    for m in rows {
        q.values([
            m.date.into(),
            m.channel.clone().into(),
            m.campaign_name.clone().into(),
            m.impressions.into(),
            m.clicks.into(),
            m.sessions.into(),
            m.bookings.into(),
            m.room_nights.into(),
            m.total_revenue_eur.into(),
            m.room_revenue_eur.into(),
            m.marketing_cost_eur.into(),
            m.cpc_eur.into(),
            m.cpa_eur.into(),
            m.roas.into(),
            m.conversion_rate.into(),
        ])?;
    }
    q.on_conflict(
        OnConflict::columns([
            MarketingPerformance::Date,
            MarketingPerformance::Channel,
            MarketingPerformance::CampaignName,
        ])
        .update_columns([
            MarketingPerformance::Impressions,
            MarketingPerformance::Clicks,
            MarketingPerformance::Sessions,
            MarketingPerformance::Bookings,
            MarketingPerformance::RoomNights,
            MarketingPerformance::TotalRevenueEur,
            MarketingPerformance::RoomRevenueEur,
            MarketingPerformance::MarketingCostEur,
            MarketingPerformance::CpcEur,
            MarketingPerformance::CpaEur,
            MarketingPerformance::Roas,
            MarketingPerformance::ConversionRate,
        ])
        .to_owned(),
    );

    Ok(q.to_string(PostgresQueryBuilder))
}

pub fn select_stayed_lines() -> String {
    Query::select()
        .columns([
            BookingsWithCharges::GuestId,
            BookingsWithCharges::BookingId,
            BookingsWithCharges::CheckInDate,
            BookingsWithCharges::NetRevenueEur,
        ])
        .from(BookingsWithCharges::Table)
        .and_where(Expr::col(BookingsWithCharges::BookingStatus).eq(BookingStatus::Stayed.to_string()))
        .to_string(PostgresQueryBuilder)
}

fn money(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col).decimal_len(12, 2).to_owned()
}

fn rate(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col).decimal_len(10, 4).to_owned()
}

fn text(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col).string().to_owned()
}

fn int(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col).integer().to_owned()
}

fn date(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col).date().to_owned()
}

fn timestamp(col: impl sea_query::IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

/// DDL for the five tables and their lookup indexes, in execution order.
pub fn create_tables() -> Vec<String> {
    let guests = Table::create()
        .table(GuestProfiles::Table)
        .if_not_exists()
        .col(text(GuestProfiles::GuestId).not_null().primary_key())
        .col(&mut text(GuestProfiles::FirstName))
        .col(&mut text(GuestProfiles::LastName))
        .col(&mut text(GuestProfiles::Email))
        .col(&mut date(GuestProfiles::DateOfBirth))
        .col(&mut text(GuestProfiles::Gender))
        .col(&mut text(GuestProfiles::CountryOfResidence))
        .col(&mut text(GuestProfiles::CityOfResidence))
        .col(&mut text(GuestProfiles::Nationality))
        .col(&mut text(GuestProfiles::FamilyStatus))
        .col(&mut text(GuestProfiles::PrimaryPurposeOfStay))
        .col(&mut text(GuestProfiles::TravelPartyType))
        .col(&mut text(GuestProfiles::PreferredRoomType))
        .col(&mut text(GuestProfiles::SkiSkillLevel))
        .col(ColumnDef::new(GuestProfiles::EmailMarketingOptIn).boolean().not_null())
        .col(ColumnDef::new(GuestProfiles::SmsOptIn).boolean().not_null())
        .col(ColumnDef::new(GuestProfiles::LoyaltyMember).boolean().not_null())
        .col(&mut text(GuestProfiles::LoyaltyTier))
        .col(&mut int(GuestProfiles::AgeAtCheckIn))
        .col(int(GuestProfiles::LifetimeBookings).not_null())
        .col(money(GuestProfiles::LifetimeRevenueEur).not_null())
        .col(&mut date(GuestProfiles::FirstBookingDate))
        .col(&mut date(GuestProfiles::MostRecentBookingDate))
        .col(&mut timestamp(GuestProfiles::CreatedAt))
        .col(&mut timestamp(GuestProfiles::UpdatedAt))
        .to_string(PostgresQueryBuilder);

    let lines = Table::create()
        .table(BookingsWithCharges::Table)
        .if_not_exists()
        .col(text(BookingsWithCharges::LineId).not_null().primary_key())
        .col(text(BookingsWithCharges::BookingId).not_null())
        .col(text(BookingsWithCharges::GuestId).not_null())
        .col(date(BookingsWithCharges::CheckInDate).not_null())
        .col(date(BookingsWithCharges::CheckOutDate).not_null())
        .col(int(BookingsWithCharges::Nights).not_null())
        .col(int(BookingsWithCharges::NumGuests).not_null())
        .col(int(BookingsWithCharges::NumAdults).not_null())
        .col(int(BookingsWithCharges::NumChildren).not_null())
        .col(&mut text(BookingsWithCharges::RoomType))
        .col(&mut text(BookingsWithCharges::BoardType))
        .col(&mut text(BookingsWithCharges::BookingStatus))
        .col(&mut text(BookingsWithCharges::BookingChannel))
        .col(date(BookingsWithCharges::BookingCreatedDate).not_null())
        .col(&mut text(BookingsWithCharges::Country))
        .col(date(BookingsWithCharges::ChargeDate).not_null())
        .col(&mut text(BookingsWithCharges::ChargeCategory))
        .col(&mut text(BookingsWithCharges::ChargeItem))
        .col(money(BookingsWithCharges::UnitPriceEur).not_null())
        .col(money(BookingsWithCharges::Quantity).not_null())
        .col(money(BookingsWithCharges::LineSubtotalEur).not_null())
        .col(rate(BookingsWithCharges::TaxRate).not_null())
        .col(money(BookingsWithCharges::LineTaxEur).not_null())
        .col(money(BookingsWithCharges::LineTotalEur).not_null())
        .col(&mut money(BookingsWithCharges::RoomRevenueEur))
        .col(&mut money(BookingsWithCharges::FbRevenueEur))
        .col(&mut money(BookingsWithCharges::ActivitiesRevenueEur))
        .col(&mut money(BookingsWithCharges::TotalRevenueEur))
        .col(&mut money(BookingsWithCharges::DiscountEur))
        .col(&mut money(BookingsWithCharges::NetRevenueEur))
        .col(&mut timestamp(BookingsWithCharges::CreatedAt))
        .col(&mut timestamp(BookingsWithCharges::UpdatedAt))
        .to_string(PostgresQueryBuilder);

    let occupancy = Table::create()
        .table(DailyOccupancy::Table)
        .if_not_exists()
        .col(date(DailyOccupancy::Date).not_null())
        .col(text(DailyOccupancy::RoomType).not_null())
        .col(int(DailyOccupancy::TotalRooms).not_null())
        .col(int(DailyOccupancy::RoomsSold).not_null())
        .col(int(DailyOccupancy::RoomsOutOfService).not_null())
        .col(int(DailyOccupancy::RoomsBlocked).not_null())
        .col(ColumnDef::new(DailyOccupancy::OccupancyPct).decimal_len(6, 2).not_null())
        .col(money(DailyOccupancy::RoomRevenueEur).not_null())
        .col(money(DailyOccupancy::AdrEur).not_null())
        .col(money(DailyOccupancy::RevparEur).not_null())
        .col(&mut text(DailyOccupancy::WeatherCondition))
        .col(ColumnDef::new(DailyOccupancy::AvgTemperatureC).decimal_len(5, 1))
        .col(&mut int(DailyOccupancy::SnowDepthCm))
        .primary_key(
            Index::create()
                .col(DailyOccupancy::Date)
                .col(DailyOccupancy::RoomType),
        )
        .to_string(PostgresQueryBuilder);

    let marketing = Table::create()
        .table(MarketingPerformance::Table)
        .if_not_exists()
        .col(date(MarketingPerformance::Date).not_null())
        .col(text(MarketingPerformance::Channel).not_null())
        .col(text(MarketingPerformance::CampaignName).not_null())
        .col(int(MarketingPerformance::Impressions).not_null())
        .col(int(MarketingPerformance::Clicks).not_null())
        .col(int(MarketingPerformance::Sessions).not_null())
        .col(int(MarketingPerformance::Bookings).not_null())
        .col(int(MarketingPerformance::RoomNights).not_null())
        .col(money(MarketingPerformance::TotalRevenueEur).not_null())
        .col(money(MarketingPerformance::RoomRevenueEur).not_null())
        .col(money(MarketingPerformance::MarketingCostEur).not_null())
        .col(money(MarketingPerformance::CpcEur).not_null())
        .col(money(MarketingPerformance::CpaEur).not_null())
        .col(rate(MarketingPerformance::Roas).not_null())
        .col(rate(MarketingPerformance::ConversionRate).not_null())
        .primary_key(
            Index::create()
                .col(MarketingPerformance::Date)
                .col(MarketingPerformance::Channel)
                .col(MarketingPerformance::CampaignName),
        )
        .to_string(PostgresQueryBuilder);

    let channels = Table::create()
        .table(MarketingChannels::Table)
        .if_not_exists()
        .col(text(MarketingChannels::Channel).not_null().primary_key())
        .col(text(MarketingChannels::ChannelCategory).not_null())
        .col(&mut text(MarketingChannels::Description))
        .to_string(PostgresQueryBuilder);

    let index = |name: &str, col: BookingsWithCharges| {
        Index::create()
            .if_not_exists()
            .name(name)
            .table(BookingsWithCharges::Table)
            .col(col)
            .to_string(PostgresQueryBuilder)
    };

    vec![
        channels,
        guests,
        lines,
        occupancy,
        marketing,
        index("idx_bookings_booking_id", BookingsWithCharges::BookingId),
        index("idx_bookings_guest_id", BookingsWithCharges::GuestId),
        index("idx_bookings_check_in_date", BookingsWithCharges::CheckInDate),
    ]
}
