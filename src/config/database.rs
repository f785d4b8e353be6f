//! Database configuration module for the ledger.
//!
//! This module handles the `SQLite` connection and schema migration using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`, so the
//! database schema always matches the Rust structs without hand-written DDL.
//!
//! Migration is versioned through the `meta` table: the ledger tables are created once and the
//! `schema_version` key is bumped. Running [`migrate`] again is a no-op.

use crate::entities::{Debt, Meta, Payment, Person, meta};
use crate::errors::{Error, Result};
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, Set,
    sea_query::OnConflict, sea_query::TableCreateStatement,
};
use tracing::{debug, info, instrument};

/// Schema version this build of the ledger expects.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schema_version";
const DEFAULT_DATABASE_URL: &str = "sqlite://data/iou_ledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable.
///
/// Falls back to `configured` (usually from `config.toml`), then to a local `SQLite` file.
#[must_use]
pub fn get_database_url(configured: Option<&str>) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| configured.map(ToString::to_string))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database at `database_url`.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Opening database connection");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Reads the recorded schema version, `0` when none has been written yet.
///
/// The `meta` table must exist; [`migrate`] creates it.
pub async fn schema_version<C>(db: &C) -> Result<u32>
where
    C: ConnectionTrait,
{
    let Some(row) = Meta::find_by_id(SCHEMA_VERSION_KEY.to_string()).one(db).await? else {
        return Ok(0);
    };
    row.value.parse().map_err(|e| Error::Config {
        message: format!("Corrupt schema_version '{}': {e}", row.value),
    })
}

/// Brings the database schema up to [`SCHEMA_VERSION`].
///
/// Creates the `meta` table if missing, then applies the version 1 tables (people, debts,
/// payments) when the recorded version is older, and records the new version.
#[instrument(skip(db))]
pub async fn migrate<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&if_not_exists(schema.create_table_from_entity(Meta))))
        .await?;

    let current = schema_version(db).await?;
    if current >= SCHEMA_VERSION {
        debug!(current, "Schema already up to date");
        return Ok(());
    }

    // Order matters: debts reference people, payments reference debts
    let people_table = if_not_exists(schema.create_table_from_entity(Person));
    let debt_table = if_not_exists(schema.create_table_from_entity(Debt));
    let payment_table = if_not_exists(schema.create_table_from_entity(Payment));

    db.execute(builder.build(&people_table)).await?;
    db.execute(builder.build(&debt_table)).await?;
    db.execute(builder.build(&payment_table)).await?;

    let marker = meta::ActiveModel {
        key: Set(SCHEMA_VERSION_KEY.to_string()),
        value: Set(SCHEMA_VERSION.to_string()),
        updated_at: Set(chrono::Utc::now()),
    };
    Meta::insert(marker)
        .on_conflict(
            OnConflict::column(meta::Column::Key)
                .update_columns([meta::Column::Value, meta::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    info!(from = current, to = SCHEMA_VERSION, "Database schema migrated");
    Ok(())
}

fn if_not_exists(mut statement: TableCreateStatement) -> TableCreateStatement {
    statement.if_not_exists();
    statement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DebtModel, PaymentModel, PersonModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_migrate_creates_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        migrate(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<PersonModel> = Person::find().limit(1).all(&db).await?;
        let _: Vec<DebtModel> = Debt::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;

        assert_eq!(schema_version(&db).await?, SCHEMA_VERSION);
        Ok(())
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        migrate(&db).await?;
        migrate(&db).await?;

        assert_eq!(schema_version(&db).await?, SCHEMA_VERSION);
        assert_eq!(Meta::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_schema_version_defaults_to_zero() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        let builder = db.get_database_backend();
        let schema = Schema::new(builder);
        db.execute(builder.build(&schema.create_table_from_entity(Meta)))
            .await?;

        assert_eq!(schema_version(&db).await?, 0);
        Ok(())
    }

    #[test]
    fn test_get_database_url_prefers_configured_over_default() {
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }
        assert_eq!(get_database_url(Some("sqlite::memory:")), "sqlite::memory:");
        assert_eq!(get_database_url(None), DEFAULT_DATABASE_URL);
    }
}
