//! Debt business logic - creation, edits, deletion and manual settlement.
//!
//! State machine: a debt is created `open` and can only move to `settled`, either through a
//! payment (see [`super::payment`]) or through [`mark_settled`]. There is no way back.
//! A debt with payment history can never be deleted; it has to be settled instead.

use crate::{
    db::{self, DebtChanges, DebtWithBalance, NewDebt},
    entities::{DebtType, debt},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::info;

/// User-supplied fields for a new debt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebtRequest {
    /// IOU or UOM
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    /// Owning person
    pub person_id: String,
    /// Optional description; must not be blank when present
    #[serde(default)]
    pub description: Option<String>,
    /// Face value as entered, e.g. `"120.00"`
    pub amount_original: String,
    /// Optional due date
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
}

/// User-supplied partial edit. Absent fields stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtUpdateRequest {
    /// New description
    pub description: Option<String>,
    /// New face value as entered
    pub amount_original: Option<String>,
    /// New due date; `Some(None)` clears it
    pub due_at: Option<Option<DateTime<Utc>>>,
}

fn validate_description(description: Option<String>) -> Result<Option<String>> {
    match description {
        Some(text) if text.trim().is_empty() => {
            Err(Error::validation("Debt description cannot be empty"))
        }
        Some(text) => Ok(Some(text.trim().to_string())),
        None => Ok(None),
    }
}

/// Creates an open debt for an existing person.
pub async fn create_debt(db: &DatabaseConnection, request: NewDebtRequest) -> Result<debt::Model> {
    let description = validate_description(request.description)?;
    let amount = super::require_positive_amount("Debt", &request.amount_original)?;

    let person = db::get_person_by_id(db, &request.person_id)
        .await?
        .ok_or_else(|| Error::PersonNotFound {
            id: request.person_id.clone(),
        })?;

    let debt = db::create_debt(
        db,
        NewDebt {
            id: None,
            debt_type: request.debt_type,
            person_id: request.person_id,
            description,
            amount_original: amount,
            created_at: None,
            due_at: request.due_at,
            status: None,
        },
    )
    .await?;

    info!(
        debt_id = %debt.id,
        debt_type = ?debt.debt_type,
        person = %person.name,
        amount = %amount,
        "Debt created"
    );
    Ok(debt)
}

/// Edits description, amount or due date of an open debt.
///
/// The amount cannot drop below what has already been paid. An empty request changes nothing
/// and returns the current row.
pub async fn update_debt(
    db: &DatabaseConnection,
    id: &str,
    request: DebtUpdateRequest,
) -> Result<debt::Model> {
    let changes = DebtChanges {
        description: validate_description(request.description)?,
        amount_original: request
            .amount_original
            .as_deref()
            .map(|raw| super::require_positive_amount("Debt", raw))
            .transpose()?,
        due_at: request.due_at,
    };

    let txn = db.begin().await?;
    let current = db::get_debt_with_balance(&txn, id)
        .await?
        .ok_or_else(|| Error::DebtNotFound { id: id.to_string() })?;
    if changes.is_empty() {
        return Ok(current.debt);
    }
    if current.debt.is_settled() {
        return Err(Error::DebtAlreadySettled {
            debt_id: id.to_string(),
        });
    }
    if let Some(amount) = changes.amount_original {
        if amount < current.total_paid {
            return Err(Error::validation(format!(
                "Debt amount (${amount}) cannot be less than the amount already paid (${})",
                current.total_paid
            )));
        }
    }

    let updated = db::update_debt(&txn, id, changes).await?;
    txn.commit().await?;

    info!(debt_id = %id, "Debt updated");
    Ok(updated)
}

/// Deletes a debt that never received a payment.
pub async fn delete_debt(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;
    if db::get_debt_by_id(&txn, id).await?.is_none() {
        return Err(Error::DebtNotFound { id: id.to_string() });
    }
    let count = db::count_payments_for_debt(&txn, id).await?;
    if count > 0 {
        return Err(Error::DebtHasPayments {
            debt_id: id.to_string(),
            count,
        });
    }
    db::delete_debt(&txn, id).await?;
    txn.commit().await?;

    info!(debt_id = %id, "Debt deleted");
    Ok(())
}

/// Settles an open debt regardless of its remaining balance.
pub async fn mark_settled(db: &DatabaseConnection, id: &str) -> Result<()> {
    let txn = db.begin().await?;
    let current = db::get_debt_with_balance(&txn, id)
        .await?
        .ok_or_else(|| Error::DebtNotFound { id: id.to_string() })?;
    if current.debt.is_settled() {
        return Err(Error::AlreadySettled {
            debt_id: id.to_string(),
        });
    }
    db::mark_debt_settled(&txn, id).await?;
    txn.commit().await?;

    info!(debt_id = %id, forgiven = %current.balance, "Debt manually settled");
    Ok(())
}

/// Fetches a debt with its total paid and balance.
pub async fn get_debt_with_balance(db: &DatabaseConnection, id: &str) -> Result<DebtWithBalance> {
    if id.trim().is_empty() {
        return Err(Error::validation("Debt ID is required"));
    }
    db::get_debt_with_balance(db, id)
        .await?
        .ok_or_else(|| Error::DebtNotFound { id: id.to_string() })
}

/// Lists a person's debts in one direction, newest first.
pub async fn list_debts_for_person(
    db: &DatabaseConnection,
    person_id: &str,
    debt_type: DebtType,
) -> Result<Vec<DebtWithBalance>> {
    if db::get_person_by_id(db, person_id).await?.is_none() {
        return Err(Error::PersonNotFound {
            id: person_id.to_string(),
        });
    }
    db::list_debts_by_person_and_type(db, person_id, debt_type).await
}
