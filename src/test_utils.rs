//! Shared test utilities for `IouLedger`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::{DEFAULT_AUTO_SETTLE_THRESHOLD, migrate},
    core::{
        debt::{self, NewDebtRequest},
        payment::{self, NewPaymentRequest},
        person::{self, PersonInput},
    },
    db::AppliedPayment,
    entities::{self, DebtType},
    errors::Result,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with the current schema applied.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    migrate(&db).await?;
    Ok(db)
}

/// Creates a test person with only a name.
pub async fn create_test_person(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::person::Model> {
    person::create_person(db, PersonInput::named(name)).await
}

/// Creates a test debt with sensible defaults.
///
/// # Defaults
/// * type: IOU
/// * description: "Test debt"
/// * no due date
pub async fn create_test_debt(
    db: &DatabaseConnection,
    person_id: &str,
    amount: &str,
) -> Result<entities::debt::Model> {
    create_custom_debt(db, person_id, DebtType::Iou, amount).await
}

/// Creates a test debt in the given direction.
pub async fn create_custom_debt(
    db: &DatabaseConnection,
    person_id: &str,
    debt_type: DebtType,
    amount: &str,
) -> Result<entities::debt::Model> {
    debt::create_debt(
        db,
        NewDebtRequest {
            debt_type,
            person_id: person_id.to_string(),
            description: Some("Test debt".to_string()),
            amount_original: amount.to_string(),
            due_at: None,
        },
    )
    .await
}

/// Builds a payment request dated now, without a note.
pub fn payment_request(debt_id: &str, amount: &str) -> NewPaymentRequest {
    NewPaymentRequest {
        debt_id: debt_id.to_string(),
        amount: amount.to_string(),
        date: Utc::now(),
        note: None,
    }
}

/// Records a payment through the lifecycle layer with the default auto-settle threshold.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    debt_id: &str,
    amount: &str,
) -> Result<AppliedPayment> {
    payment::add_payment(
        db,
        payment_request(debt_id, amount),
        DEFAULT_AUTO_SETTLE_THRESHOLD,
    )
    .await
}

/// Sets up a complete test environment with one person owning one IOU debt.
/// Returns (db, person, debt) for convenience.
pub async fn setup_with_debt(
    amount: &str,
) -> Result<(
    DatabaseConnection,
    entities::person::Model,
    entities::debt::Model,
)> {
    let db = setup_test_db().await?;
    let person = create_test_person(&db, "Test Person").await?;
    let debt = create_test_debt(&db, &person.id, amount).await?;
    Ok((db, person, debt))
}
