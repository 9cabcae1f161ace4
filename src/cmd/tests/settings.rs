use std::env::temp_dir;
use std::fs;
use std::path::PathBuf;

use cmd::config::Config;
use cmd::error::Result;
use cmd::tracing::LogLevel;
use ingester::destinations::postgres::PostgresConfig;
use uuid::Uuid;

#[test]
fn defaults_without_file() -> Result<()> {
    let cfg = Config::load(None)?;

    assert_eq!(cfg.db.port, 5432);
    assert_eq!(cfg.db.name, "hotel_analytics");
    assert_eq!(cfg.data.path, PathBuf::from("data"));
    assert_eq!(cfg.load.batch_size, 500);
    assert_eq!(cfg.log.level, LogLevel::Info);

    Ok(())
}

#[test]
fn file_overrides_defaults() -> Result<()> {
    let path = temp_dir().join(format!("hotel-{}.toml", Uuid::new_v4()));
    fs::write(
        &path,
        r#"
[db]
name = "analytics_test"
port = 6543

[load]
batch_size = 25

[log]
level = "debug"
"#,
    )?;

    let cfg = Config::load(Some(&path))?;

    assert_eq!(cfg.db.name, "analytics_test");
    assert_eq!(cfg.db.port, 6543);
    assert_eq!(cfg.db.user, "postgres");
    assert_eq!(cfg.load.batch_size, 25);
    assert_eq!(cfg.log.level, LogLevel::Debug);

    let pg = PostgresConfig::from(&cfg.db);
    assert_eq!(pg.name, "analytics_test");

    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let path = temp_dir().join(format!("hotel-{}.toml", Uuid::new_v4()));

    assert!(Config::load(Some(&path)).is_err());
}
