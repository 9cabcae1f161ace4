use std::env::temp_dir;
use std::path::PathBuf;

use clap::Parser;
use cmd::command::generate;
use cmd::command::generate::Generate;
use cmd::command::load;
use cmd::command::load::Load;
use cmd::config::Config;
use cmd::error::Error;
use cmd::error::Result;
use ingester::pipeline::Outcome;
use ingester::pipeline::Stage;
use uuid::Uuid;

#[test]
fn generate_defaults() {
    let args = Generate::try_parse_from(["generate"]).unwrap();
    let cfg = data_gen::Config::from(&args);

    assert_eq!(cfg.from, data_gen::Config::default().from);
    assert_eq!(cfg.to, data_gen::Config::default().to);
    assert_eq!(cfg.guests, 500);
    assert_eq!(cfg.bookings, 800);
    assert_eq!(cfg.total_rooms, 100);
    assert_eq!(cfg.seed, None);
}

#[test]
fn load_flags_override_config() -> Result<()> {
    let cfg = Config::load(None)?;

    let args = Load::try_parse_from(["load"]).unwrap();
    let pcfg = args.pipeline_config(&cfg);
    assert_eq!(pcfg.data_dir, PathBuf::from("data"));
    assert_eq!(pcfg.batch_size, 500);

    let args = Load::try_parse_from(["load", "--data", "/tmp/x", "--batch-size", "9", "--dry-run"])
        .unwrap();
    let pcfg = args.pipeline_config(&cfg);
    assert!(args.dry_run);
    assert_eq!(pcfg.data_dir, PathBuf::from("/tmp/x"));
    assert_eq!(pcfg.batch_size, 9);

    Ok(())
}

#[tokio::test]
async fn generate_then_dry_run_load() -> Result<()> {
    let out = temp_dir().join(format!("hotel-{}", Uuid::new_v4()));
    let out_arg = out.to_string_lossy().into_owned();

    let args = Generate::try_parse_from([
        "generate",
        "--out",
        out_arg.as_str(),
        "--guests",
        "30",
        "--bookings",
        "40",
        "--seed",
        "11",
    ])
    .unwrap();
    generate::run(&args)?;

    let args = Load::try_parse_from(["load", "--data", out_arg.as_str(), "--dry-run"]).unwrap();
    let summary = load::run(&args, &Config::load(None)?).await?;

    assert_eq!(summary.outcome(Stage::GuestsLoaded), Some(Outcome::Rows(30)));
    assert!(summary.outcome(Stage::Committed).is_some());

    Ok(())
}

#[tokio::test]
async fn load_requires_data_directory() -> Result<()> {
    let missing = temp_dir().join(format!("hotel-{}", Uuid::new_v4()));
    let args = Load {
        data: Some(missing),
        batch_size: None,
        dry_run: true,
        config: None,
    };

    let res = load::run(&args, &Config::load(None)?).await;
    assert!(matches!(res, Err(Error::FileNotFound(_))));

    Ok(())
}

#[test]
fn invalid_season_is_rejected() {
    let args = Generate::try_parse_from([
        "generate",
        "--from",
        "2025-01-01",
        "--to",
        "2025-01-03",
    ])
    .unwrap();

    assert!(matches!(generate::run(&args), Err(Error::DataGen(_))));
}
