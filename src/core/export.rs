//! Snapshot export - dumps every ledger table into one JSON document.

use crate::{
    config::schema_version,
    db,
    entities::{debt, payment, person},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Full copy of the ledger at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// Schema version of the source database
    pub schema_version: u32,
    /// Every person, by case-insensitive name
    pub people: Vec<person::Model>,
    /// Every debt, oldest first
    pub debts: Vec<debt::Model>,
    /// Every payment, oldest first
    pub payments: Vec<payment::Model>,
}

impl LedgerSnapshot {
    /// Pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// Reads all three tables into a snapshot.
pub async fn export_snapshot(db: &DatabaseConnection) -> Result<LedgerSnapshot> {
    Ok(LedgerSnapshot {
        exported_at: Utc::now(),
        schema_version: schema_version(db).await?,
        people: db::list_all_people(db).await?,
        debts: db::list_all_debts(db).await?,
        payments: db::list_all_payments(db).await?,
    })
}

/// Exports a snapshot and writes it to `path`, creating missing parent directories.
pub async fn write_snapshot<P: AsRef<Path>>(
    db: &DatabaseConnection,
    path: P,
) -> Result<LedgerSnapshot> {
    let path = path.as_ref();
    let snapshot = export_snapshot(db).await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, snapshot.to_json()?)?;

    info!(
        path = %path.display(),
        people = snapshot.people.len(),
        debts = snapshot.debts.len(),
        payments = snapshot.payments.len(),
        "Ledger snapshot written"
    );
    Ok(snapshot)
}
