//! Demo data for a fresh ledger.

use crate::{
    core::{
        debt::{self, NewDebtRequest},
        payment::{self, NewPaymentRequest},
        person::{self, PersonInput},
    },
    db,
    entities::DebtType,
    errors::Result,
    money::Money,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

async fn seed_debt(
    db: &DatabaseConnection,
    person_id: &str,
    debt_type: DebtType,
    description: &str,
    amount: &str,
) -> Result<String> {
    let created = debt::create_debt(
        db,
        NewDebtRequest {
            debt_type,
            person_id: person_id.to_string(),
            description: Some(description.to_string()),
            amount_original: amount.to_string(),
            due_at: None,
        },
    )
    .await?;
    Ok(created.id)
}

async fn seed_payment(
    db: &DatabaseConnection,
    debt_id: &str,
    amount: &str,
    threshold: Money,
) -> Result<()> {
    let request = NewPaymentRequest {
        debt_id: debt_id.to_string(),
        amount: amount.to_string(),
        date: Utc::now(),
        note: None,
    };
    payment::add_payment(db, request, threshold).await?;
    Ok(())
}

/// Fills an empty ledger with three demo contacts and a handful of debts.
///
/// Does nothing when any person already exists. Returns whether data was written.
pub async fn seed_if_empty(db: &DatabaseConnection, auto_settle_threshold: Money) -> Result<bool> {
    let existing = db::count_people(db).await?;
    if existing > 0 {
        debug!(existing, "Ledger not empty, skipping demo seed");
        return Ok(false);
    }

    let alex = person::create_person(db, PersonInput::named("Alex")).await?;
    let jordan = person::create_person(db, PersonInput::named("Jordan")).await?;
    let sam = person::create_person(db, PersonInput::named("Sam")).await?;

    let groceries = seed_debt(db, &alex.id, DebtType::Iou, "Groceries", "120.00").await?;
    seed_payment(db, &groceries, "40.00", auto_settle_threshold).await?;

    seed_debt(db, &jordan.id, DebtType::Uom, "Rideshare", "60.00").await?;

    let tickets = seed_debt(db, &sam.id, DebtType::Iou, "Concert tickets", "200.00").await?;
    seed_payment(db, &tickets, "50.00", auto_settle_threshold).await?;
    seed_payment(db, &tickets, "50.00", auto_settle_threshold).await?;

    let snacks = seed_debt(db, &sam.id, DebtType::Uom, "Snacks", "25.00").await?;
    debt::mark_settled(db, &snacks).await?;

    info!("Seeded demo ledger data");
    Ok(true)
}
