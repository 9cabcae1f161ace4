pub mod schema;
pub mod statements;

use async_trait::async_trait;
use common::records::ChargeLine;
use common::records::DailyOccupancy;
use common::records::GuestProfile;
use common::records::MarketingChannel;
use common::records::MarketingPerformance;
use common::records::StayedLine;
use common::types::TABLE_BOOKINGS_WITH_CHARGES;
use common::types::TABLE_DAILY_OCCUPANCY;
use common::types::TABLE_GUEST_PROFILES;
use common::types::TABLE_MARKETING_CHANNELS;
use common::types::TABLE_MARKETING_PERFORMANCE;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use tracing::debug;
use tracing::info;

use crate::destination::Destination;
use crate::destination::Transaction;
use crate::error::IngesterError;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl PostgresConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
    }
}

// integrity_constraint_violation (23xxx) and cardinality_violation, which
// ON CONFLICT raises when one statement touches the same key twice
fn map_err(table: &str, err: sqlx::Error) -> IngesterError {
    if let sqlx::Error::Database(db) = &err {
        if let Some(code) = db.code() {
            if code.starts_with("23") || code == "21000" || code == "22003" {
                return IngesterError::ConstraintViolation {
                    table: table.to_string(),
                    message: db.message().to_string(),
                };
            }
        }
    }

    IngesterError::Database(err)
}

/// A single-connection PostgreSQL store.
pub struct PostgresDestination {
    pool: PgPool,
}

impl PostgresDestination {
    pub async fn connect(cfg: &PostgresConfig) -> Result<Self> {
        info!("connecting to {}:{}/{}", cfg.host, cfg.port, cfg.name);
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(cfg.connect_options())
            .await?;

        Ok(Self { pool })
    }

    pub async fn create_tables(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for stmt in statements::create_tables() {
            debug!("{stmt}");
            sqlx::query(&stmt).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl Destination for PostgresDestination {
    async fn begin(&self) -> Result<Box<dyn Transaction>> {
        let tx = self.pool.begin().await?;

        Ok(Box::new(PostgresTransaction { tx }))
    }
}

pub struct PostgresTransaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

impl PostgresTransaction {
    async fn execute(&mut self, table: &str, sql: String) -> Result<()> {
        sqlx::query(&sql)
            .execute(&mut *self.tx)
            .await
            .map_err(|err| map_err(table, err))?;

        Ok(())
    }
}

#[async_trait]
impl Transaction for PostgresTransaction {
    async fn upsert_channels(&mut self, rows: &[MarketingChannel]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.execute(TABLE_MARKETING_CHANNELS, statements::insert_channels(rows)?)
            .await
    }

    async fn upsert_guests(&mut self, rows: &[GuestProfile]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.execute(TABLE_GUEST_PROFILES, statements::insert_guests(rows)?)
            .await
    }

    async fn upsert_charge_lines(&mut self, rows: &[ChargeLine]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.execute(
            TABLE_BOOKINGS_WITH_CHARGES,
            statements::insert_charge_lines(rows)?,
        )
        .await
    }

    async fn upsert_occupancy(&mut self, rows: &[DailyOccupancy]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.execute(TABLE_DAILY_OCCUPANCY, statements::insert_occupancy(rows)?)
            .await
    }

    async fn upsert_marketing(&mut self, rows: &[MarketingPerformance]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.execute(
            TABLE_MARKETING_PERFORMANCE,
            statements::insert_marketing(rows)?,
        )
        .await
    }

    async fn stayed_lines(&mut self) -> Result<Vec<StayedLine>> {
        let rows = sqlx::query(&statements::select_stayed_lines())
            .fetch_all(&mut *self.tx)
            .await?;

        rows.iter()
            .map(|row| -> Result<StayedLine> {
                Ok(StayedLine {
                    guest_id: row.try_get("guest_id")?,
                    booking_id: row.try_get("booking_id")?,
                    check_in_date: row.try_get("check_in_date")?,
                    net_revenue_eur: row.try_get("net_revenue_eur")?,
                })
            })
            .collect()
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await?;

        Ok(())
    }
}
