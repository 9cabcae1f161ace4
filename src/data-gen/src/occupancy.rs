use chrono::Duration;
use chrono::NaiveDate;
use common::aggregate::nightly_rooms;
use common::aggregate::NightTotals;
use common::decimal;
use common::metrics;
use common::metrics::RoomInventory;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::types::ROOM_TYPE_ALL;
use enum_iterator::all;
use rand::rngs::StdRng;
use rand::Rng;

use crate::dictionary::RoomType;
use crate::error::Result;
use crate::weather::Weather;
use crate::weather::WeatherProvider;
use crate::Config;

fn row(
    date: NaiveDate,
    room_type: &str,
    inventory: RoomInventory,
    night: Option<&NightTotals>,
    weather: &Weather,
) -> DailyOccupancy {
    let rooms_sold = night.map(NightTotals::rooms_sold).unwrap_or_default();
    let room_revenue = night
        .map(|n| n.room_revenue)
        .unwrap_or_else(decimal::zero_money);
    let m = metrics::occupancy(inventory, rooms_sold, room_revenue);

    DailyOccupancy {
        date,
        room_type: room_type.to_string(),
        total_rooms: inventory.total_rooms,
        rooms_sold,
        rooms_out_of_service: inventory.rooms_out_of_service,
        rooms_blocked: inventory.rooms_blocked,
        occupancy_pct: m.occupancy_pct,
        room_revenue_eur: decimal::money(room_revenue),
        adr_eur: m.adr_eur,
        revpar_eur: m.revpar_eur,
        weather_condition: weather.condition.to_string(),
        avg_temperature_c: weather.avg_temperature_c,
        snow_depth_cm: weather.snow_depth_cm,
    }
}

/// One "All" row per date of the season followed by a row per room type.
///
/// Out-of-service and blocked rooms are drawn for the whole property only;
/// the per-type rows share the date's weather.
pub fn generate(
    rng: &mut StdRng,
    cfg: &Config,
    lines: &[ChargeLine],
) -> Result<Vec<DailyOccupancy>> {
    let weather = WeatherProvider::try_new()?;
    let nights = nightly_rooms(lines);
    let room_types: Vec<RoomType> = all::<RoomType>().collect();
    let mut out = Vec::new();

    let mut date = cfg.from;
    while date <= cfg.to {
        let today = weather.sample(rng, date);
        let inventory = RoomInventory {
            total_rooms: cfg.total_rooms,
            rooms_out_of_service: if rng.gen::<f64>() < 0.1 { rng.gen_range(0..=5) } else { 0 },
            rooms_blocked: if rng.gen::<f64>() < 0.15 { rng.gen_range(0..=10) } else { 0 },
        };
        let key = (date, ROOM_TYPE_ALL.to_string());
        out.push(row(date, ROOM_TYPE_ALL, inventory, nights.get(&key), &today));

        for room_type in &room_types {
            let name = room_type.to_string();
            let inventory = RoomInventory {
                total_rooms: room_type.inventory(),
                rooms_out_of_service: 0,
                rooms_blocked: 0,
            };
            let night = nights.get(&(date, name.clone()));
            out.push(row(date, &name, inventory, night, &today));
        }

        date += Duration::days(1);
    }

    Ok(out)
}
