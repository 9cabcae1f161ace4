use std::collections::BTreeSet;
use std::collections::HashMap;
use std::env::temp_dir;
use std::fs;

use common::types::ROOM_TYPE_ALL;
use data_gen::error::Result;
use data_gen::generate;
use data_gen::write;
use data_gen::Config;
use rust_decimal::Decimal;
use uuid::Uuid;

fn config() -> Config {
    Config {
        guests: 60,
        bookings: 100,
        seed: Some(2024),
        ..Config::default()
    }
}

#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    let a = generate(&config())?;
    let b = generate(&config())?;

    assert_eq!(a.guests, b.guests);
    assert_eq!(a.charge_lines, b.charge_lines);
    assert_eq!(a.occupancy, b.occupancy);
    assert_eq!(a.marketing, b.marketing);

    Ok(())
}

#[test]
fn bookings_reference_known_guests() -> Result<()> {
    let ds = generate(&config())?;
    let guests: BTreeSet<&str> = ds.guests.iter().map(|g| g.guest_id.as_str()).collect();

    assert!(ds.bookings() <= 100);
    assert!(ds
        .charge_lines
        .iter()
        .all(|l| guests.contains(l.guest_id.as_str())));

    Ok(())
}

#[test]
fn occupancy_counts_only_stayed_bookings() -> Result<()> {
    let ds = generate(&config())?;

    let mut expected: HashMap<_, BTreeSet<&str>> = HashMap::new();
    for line in ds.charge_lines.iter().filter(|l| l.booking_status == "Stayed") {
        let mut night = line.check_in_date;
        while night < line.check_out_date {
            expected.entry(night).or_default().insert(line.booking_id.as_str());
            night = night.succ_opt().unwrap();
        }
    }

    let season_days = (config().to - config().from).num_days() + 1;
    let all: Vec<_> = ds
        .occupancy
        .iter()
        .filter(|r| r.room_type == ROOM_TYPE_ALL)
        .collect();
    assert_eq!(all.len() as i64, season_days);

    for row in all {
        let sold = expected.get(&row.date).map(|b| b.len()).unwrap_or(0);
        assert_eq!(row.rooms_sold as usize, sold, "rooms sold on {}", row.date);

        let by_type: i32 = ds
            .occupancy
            .iter()
            .filter(|r| r.date == row.date && r.room_type != ROOM_TYPE_ALL)
            .map(|r| r.rooms_sold)
            .sum();
        assert_eq!(by_type, row.rooms_sold);
    }

    Ok(())
}

#[test]
fn guest_stats_are_filled() -> Result<()> {
    let ds = generate(&config())?;

    for guest in &ds.guests {
        if guest.lifetime_bookings == 0 {
            assert_eq!(guest.lifetime_revenue_eur, Decimal::ZERO);
            assert_eq!(guest.first_booking_date, None);
            assert_eq!(guest.age_at_check_in, None);
        } else {
            assert!(guest.first_booking_date <= guest.most_recent_booking_date);
            assert!(guest.age_at_check_in.is_some());
        }
    }

    Ok(())
}

#[test]
fn marketing_bookings_are_distinct() -> Result<()> {
    let ds = generate(&config())?;

    for row in &ds.marketing {
        let bookings: BTreeSet<&str> = ds
            .charge_lines
            .iter()
            .filter(|l| {
                l.booking_status == "Stayed"
                    && l.check_in_date == row.date
                    && l.booking_channel == row.channel
            })
            .map(|l| l.booking_id.as_str())
            .collect();
        assert_eq!(row.bookings as usize, bookings.len());
    }

    Ok(())
}

#[test]
fn writes_csv_files() -> Result<()> {
    let mut path = temp_dir();
    path.push(format!("{}", Uuid::new_v4()));

    let ds = generate(&config())?;
    write(&ds, &path)?;

    let guests = fs::read_to_string(path.join("guest_profiles.csv"))?;
    let header = guests.lines().next().unwrap_or_default();
    assert!(header.starts_with("guest_id,first_name,last_name,email,date_of_birth"));
    assert_eq!(guests.lines().count(), ds.guests.len() + 1);

    let lines = fs::read_to_string(path.join("bookings_with_charges.csv"))?;
    assert!(lines
        .lines()
        .next()
        .unwrap_or_default()
        .ends_with("total_revenue_eur,discount_eur,net_revenue_eur"));

    assert!(path.join("daily_occupancy.csv").exists());
    assert!(path.join("marketing_performance.csv").exists());

    fs::remove_dir_all(&path)?;

    Ok(())
}
