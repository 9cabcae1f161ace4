use std::collections::BTreeMap;
use std::env::temp_dir;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use common::types::BookingStatus;
use common::types::FILE_BOOKINGS_WITH_CHARGES;
use common::types::FILE_DAILY_OCCUPANCY;
use common::types::FILE_GUEST_PROFILES;
use common::types::FILE_MARKETING_PERFORMANCE;
use data_gen::output::write_csv;
use data_gen::Dataset;
use ingester::destinations::memory::MemoryDestination;
use ingester::error::IngesterError;
use ingester::error::Result;
use ingester::pipeline::Config;
use ingester::pipeline::Outcome;
use ingester::pipeline::Pipeline;
use ingester::pipeline::Stage;
use rust_decimal::Decimal;
use uuid::Uuid;

fn dataset() -> Dataset {
    data_gen::generate(&data_gen::Config {
        guests: 40,
        bookings: 60,
        seed: Some(7),
        ..data_gen::Config::default()
    })
    .unwrap()
}

fn data_dir() -> PathBuf {
    let dir = temp_dir().join(format!("ingester-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn written(ds: &Dataset) -> PathBuf {
    let dir = data_dir();
    data_gen::write(ds, &dir).unwrap();
    dir
}

fn pipeline(dest: &MemoryDestination, dir: &Path, batch_size: usize) -> Pipeline {
    Pipeline::try_new(Arc::new(dest.clone()), Config {
        data_dir: dir.to_path_buf(),
        batch_size,
    })
    .unwrap()
}

#[tokio::test]
async fn full_load_matches_generated_data() -> Result<()> {
    let ds = dataset();
    let dir = written(&ds);
    let dest = MemoryDestination::new();

    let summary = pipeline(&dest, &dir, 50).run().await?;

    assert_eq!(summary.outcome(Stage::DimensionsLoaded), Some(Outcome::Rows(10)));
    assert_eq!(summary.outcome(Stage::GuestsLoaded), Some(Outcome::Rows(ds.guests.len())));
    assert_eq!(
        summary.outcome(Stage::BookingsLoaded),
        Some(Outcome::Rows(ds.charge_lines.len()))
    );
    assert_eq!(
        summary.outcome(Stage::GuestsReloaded),
        Some(Outcome::Rows(ds.guests.len()))
    );
    assert_eq!(
        summary.outcome(Stage::OccupancyLoaded),
        Some(Outcome::Rows(ds.occupancy.len()))
    );
    assert_eq!(
        summary.outcome(Stage::MarketingLoaded),
        Some(Outcome::Rows(ds.marketing.len()))
    );
    assert!(summary.outcome(Stage::Committed).is_some());

    let tables = dest.snapshot().await;
    assert_eq!(tables.channels.len(), 10);

    // lifetime stats recomputed from stored lines agree with the generator's
    let guests: BTreeMap<_, _> = ds
        .guests
        .iter()
        .map(|g| (g.guest_id.clone(), g.clone()))
        .collect();
    assert_eq!(tables.guests, guests);

    let lines: BTreeMap<_, _> = ds
        .charge_lines
        .iter()
        .map(|l| (l.line_id.clone(), l.clone()))
        .collect();
    assert_eq!(tables.charge_lines, lines);
    assert_eq!(tables.occupancy.len(), ds.occupancy.len());
    assert_eq!(tables.marketing.len(), ds.marketing.len());

    Ok(())
}

#[tokio::test]
async fn rerun_is_idempotent() -> Result<()> {
    let dir = written(&dataset());
    let dest = MemoryDestination::new();

    pipeline(&dest, &dir, 100).run().await?;
    let first = dest.snapshot().await;
    pipeline(&dest, &dir, 7).run().await?;

    assert_eq!(dest.snapshot().await, first);

    Ok(())
}

#[tokio::test]
async fn failure_rolls_back_every_stage() -> Result<()> {
    let ds = dataset();
    let dest = MemoryDestination::new();
    pipeline(&dest, &written(&ds), 100).run().await?;
    let before = dest.snapshot().await;

    // guests and bookings load fine, occupancy fails on its last row
    let dir = written(&ds);
    let mut occupancy = fs::read_to_string(dir.join(FILE_DAILY_OCCUPANCY)).unwrap();
    occupancy.push_str("2025-02-30,All,100,1,0,0,1.00,100.00,100.00,1.00,Sunny,1.0,10\n");
    fs::write(dir.join(FILE_DAILY_OCCUPANCY), occupancy).unwrap();

    let mut changed = ds.guests.clone();
    changed[0].first_name = "Changed".to_string();
    changed.push(changed[0].clone());
    changed.last_mut().unwrap().guest_id = "GUEST-999999".to_string();
    write_csv(&dir.join(FILE_GUEST_PROFILES), &changed).unwrap();

    let res = pipeline(&dest, &dir, 100).run().await;
    assert!(matches!(res, Err(IngesterError::Parse { ref column, .. }) if column == "date"));

    assert_eq!(dest.snapshot().await, before);

    Ok(())
}

#[tokio::test]
async fn absent_files_are_skipped() -> Result<()> {
    let dest = MemoryDestination::new();

    let summary = pipeline(&dest, &data_dir(), 100).run().await?;

    for stage in [
        Stage::GuestsLoaded,
        Stage::BookingsLoaded,
        Stage::GuestsReloaded,
        Stage::OccupancyLoaded,
        Stage::MarketingLoaded,
    ] {
        assert_eq!(summary.outcome(stage), Some(Outcome::Skipped), "{stage}");
    }

    let tables = dest.snapshot().await;
    assert_eq!(tables.channels.len(), 10);
    assert!(tables.guests.is_empty());

    Ok(())
}

#[tokio::test]
async fn guests_without_bookings_have_empty_stats() -> Result<()> {
    let ds = dataset();
    let dir = data_dir();
    write_csv(&dir.join(FILE_GUEST_PROFILES), &ds.guests).unwrap();
    let dest = MemoryDestination::new();

    let summary = pipeline(&dest, &dir, 100).run().await?;
    assert_eq!(summary.outcome(Stage::GuestsReloaded), Some(Outcome::Skipped));

    let tables = dest.snapshot().await;
    assert_eq!(tables.guests.len(), ds.guests.len());
    assert!(tables.guests.values().all(|g| g.lifetime_bookings == 0
        && g.lifetime_revenue_eur.is_zero()
        && g.first_booking_date.is_none()
        && g.age_at_check_in.is_none()));

    Ok(())
}

#[tokio::test]
async fn later_bookings_refresh_guest_stats() -> Result<()> {
    let ds = dataset();
    let dest = MemoryDestination::new();

    let guests_only = data_dir();
    write_csv(&guests_only.join(FILE_GUEST_PROFILES), &ds.guests).unwrap();
    pipeline(&dest, &guests_only, 100).run().await?;

    let with_bookings = data_dir();
    write_csv(&with_bookings.join(FILE_GUEST_PROFILES), &ds.guests).unwrap();
    write_csv(&with_bookings.join(FILE_BOOKINGS_WITH_CHARGES), &ds.charge_lines).unwrap();
    pipeline(&dest, &with_bookings, 100).run().await?;

    let tables = dest.snapshot().await;
    for guest in &ds.guests {
        let stored = &tables.guests[&guest.guest_id];
        assert_eq!(stored.lifetime_bookings, guest.lifetime_bookings);
        assert_eq!(stored.lifetime_revenue_eur, guest.lifetime_revenue_eur);
        assert_eq!(stored.most_recent_booking_date, guest.most_recent_booking_date);
    }

    Ok(())
}

#[tokio::test]
async fn stored_charge_lines_are_not_overwritten() -> Result<()> {
    let ds = dataset();
    let dest = MemoryDestination::new();
    pipeline(&dest, &written(&ds), 100).run().await?;

    let dir = data_dir();
    let mut lines = ds.charge_lines.clone();
    let original = lines[0].clone();
    lines[0].charge_item = "Edited".to_string();
    write_csv(&dir.join(FILE_BOOKINGS_WITH_CHARGES), &lines).unwrap();
    pipeline(&dest, &dir, 100).run().await?;

    assert_eq!(dest.snapshot().await.charge_lines[&original.line_id], original);

    Ok(())
}

#[tokio::test]
async fn occupancy_and_marketing_are_overwritten() -> Result<()> {
    let ds = dataset();
    let dest = MemoryDestination::new();
    pipeline(&dest, &written(&ds), 100).run().await?;

    let dir = data_dir();
    let mut occupancy = ds.occupancy.clone();
    occupancy[0].weather_condition = "Blizzard".to_string();
    write_csv(&dir.join(FILE_DAILY_OCCUPANCY), &occupancy).unwrap();
    let mut marketing = ds.marketing.clone();
    marketing[0].impressions += 1;
    write_csv(&dir.join(FILE_MARKETING_PERFORMANCE), &marketing).unwrap();
    pipeline(&dest, &dir, 100).run().await?;

    let tables = dest.snapshot().await;
    assert_eq!(tables.occupancy[&occupancy[0].key()].weather_condition, "Blizzard");
    assert_eq!(
        tables.marketing[&marketing[0].key()].impressions,
        marketing[0].impressions
    );

    Ok(())
}

#[tokio::test]
async fn duplicate_key_in_one_batch_is_a_constraint_violation() -> Result<()> {
    let ds = dataset();
    let dir = data_dir();
    let mut lines = ds.charge_lines[..3].to_vec();
    lines.push(lines[0].clone());
    write_csv(&dir.join(FILE_BOOKINGS_WITH_CHARGES), &lines).unwrap();
    let dest = MemoryDestination::new();

    let res = pipeline(&dest, &dir, 100).run().await;
    assert!(matches!(res, Err(IngesterError::ConstraintViolation { .. })));
    assert!(dest.snapshot().await.channels.is_empty());

    Ok(())
}

#[tokio::test]
async fn decimals_are_stored_at_column_scale() -> Result<()> {
    let ds = dataset();
    let dir = written(&ds);
    let mut lines = ds.charge_lines.clone();
    let i = lines
        .iter()
        .position(|l| {
            BookingStatus::is_stayed(&l.booking_status)
                && l.net_revenue_eur.is_some_and(|v| v > Decimal::ZERO)
        })
        .unwrap();
    let original = lines[i].clone();
    lines[i].net_revenue_eur = original.net_revenue_eur.map(|v| v + Decimal::new(5, 3));
    lines[i].unit_price_eur += Decimal::new(4, 3);
    lines[i].tax_rate += Decimal::new(4, 5);
    write_csv(&dir.join(FILE_BOOKINGS_WITH_CHARGES), &lines).unwrap();

    let mut occupancy = ds.occupancy.clone();
    occupancy[0].occupancy_pct += Decimal::new(1, 3);
    occupancy[0].avg_temperature_c = Decimal::new(-1234, 2);
    write_csv(&dir.join(FILE_DAILY_OCCUPANCY), &occupancy).unwrap();

    let dest = MemoryDestination::new();
    pipeline(&dest, &dir, 100).run().await?;
    let tables = dest.snapshot().await;

    let stored = &tables.charge_lines[&original.line_id];
    let net = stored.net_revenue_eur.unwrap();
    assert_eq!(net, original.net_revenue_eur.unwrap() + Decimal::new(1, 2));
    assert_eq!(net.scale(), 2);
    assert_eq!(stored.unit_price_eur, original.unit_price_eur);
    assert_eq!(stored.unit_price_eur.scale(), 2);
    assert_eq!(stored.tax_rate, original.tax_rate);
    assert_eq!(stored.tax_rate.scale(), 4);

    // lifetime revenue is summed from the rounded stored lines
    let guest = ds.guests.iter().find(|g| g.guest_id == original.guest_id).unwrap();
    assert_eq!(
        tables.guests[&guest.guest_id].lifetime_revenue_eur,
        guest.lifetime_revenue_eur + Decimal::new(1, 2)
    );

    let day = &tables.occupancy[&occupancy[0].key()];
    assert_eq!(day.occupancy_pct, ds.occupancy[0].occupancy_pct);
    assert_eq!(day.occupancy_pct.scale(), 2);
    assert_eq!(day.avg_temperature_c.to_string(), "-12.3");

    Ok(())
}

#[tokio::test]
async fn values_beyond_column_precision_are_rejected() -> Result<()> {
    let ds = dataset();
    let dir = data_dir();
    let mut lines = ds.charge_lines[..3].to_vec();
    lines[0].unit_price_eur = Decimal::new(10_000_000_000, 0);
    write_csv(&dir.join(FILE_BOOKINGS_WITH_CHARGES), &lines).unwrap();
    let dest = MemoryDestination::new();

    let res = pipeline(&dest, &dir, 100).run().await;
    assert!(matches!(res, Err(IngesterError::ConstraintViolation { .. })));
    assert!(dest.snapshot().await.charge_lines.is_empty());
    assert!(dest.snapshot().await.channels.is_empty());

    Ok(())
}

#[test]
fn zero_batch_size_is_rejected() {
    let res = Pipeline::try_new(Arc::new(MemoryDestination::new()), Config {
        data_dir: data_dir(),
        batch_size: 0,
    });

    assert!(matches!(res, Err(IngesterError::General(_))));
}
