//! Debt rows and balance computation.

use crate::{
    entities::{Debt, DebtStatus, DebtType, Payment, debt, payment},
    errors::{Error, Result},
    money::Money,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use serde::Serialize;

/// A debt to insert. Absent `id`, `created_at` and `status` get defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDebt {
    /// Explicit id, or `None` to generate one
    pub id: Option<String>,
    /// Direction
    pub debt_type: DebtType,
    /// Owning person
    pub person_id: String,
    /// Description
    pub description: Option<String>,
    /// Face value
    pub amount_original: Money,
    /// Defaults to now
    pub created_at: Option<DateTime<Utc>>,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Defaults to [`DebtStatus::Open`]
    pub status: Option<DebtStatus>,
}

/// Partial edit of a debt; `None` fields are left untouched.
///
/// `due_at: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtChanges {
    /// New description
    pub description: Option<String>,
    /// New face value
    pub amount_original: Option<Money>,
    /// New (or cleared) due date
    pub due_at: Option<Option<DateTime<Utc>>>,
}

impl DebtChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount_original.is_none() && self.due_at.is_none()
    }
}

/// A debt with its derived amounts, computed from the current payment rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtWithBalance {
    /// The stored debt row
    #[serde(flatten)]
    pub debt: debt::Model,
    /// Sum of all payments
    pub total_paid: Money,
    /// `amount_original - total_paid`
    pub balance: Money,
}

impl DebtWithBalance {
    /// True for an open debt whose due date falls on a calendar day before `now`'s.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.debt.is_settled()
            && self
                .debt
                .due_at
                .is_some_and(|due| due.date_naive() < now.date_naive())
    }
}

/// Inserts a new debt and returns the stored row.
pub async fn create_debt<C>(db: &C, new_debt: NewDebt) -> Result<debt::Model>
where
    C: ConnectionTrait,
{
    let row = debt::ActiveModel {
        id: Set(new_debt.id.unwrap_or_else(super::new_id)),
        debt_type: Set(new_debt.debt_type),
        person_id: Set(new_debt.person_id),
        description: Set(new_debt.description),
        amount_original: Set(new_debt.amount_original.to_string()),
        created_at: Set(new_debt.created_at.unwrap_or_else(Utc::now)),
        due_at: Set(new_debt.due_at),
        status: Set(new_debt.status.unwrap_or(DebtStatus::Open)),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Finds a debt by id.
pub async fn get_debt_by_id<C>(db: &C, id: &str) -> Result<Option<debt::Model>>
where
    C: ConnectionTrait,
{
    Debt::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

async fn total_paid<C>(db: &C, debt_id: &str) -> Result<Money>
where
    C: ConnectionTrait,
{
    let payments = Payment::find()
        .filter(payment::Column::DebtId.eq(debt_id))
        .all(db)
        .await?;
    payments
        .iter()
        .try_fold(Money::ZERO, |sum, p| sum.checked_add(p.amount()?))
}

async fn with_balance<C>(db: &C, debt: debt::Model) -> Result<DebtWithBalance>
where
    C: ConnectionTrait,
{
    let total_paid = total_paid(db, &debt.id).await?;
    let balance = debt.amount()?.checked_sub(total_paid)?;
    Ok(DebtWithBalance {
        debt,
        total_paid,
        balance,
    })
}

/// `amount_original - sum(payments)` for the debt, computed fresh.
///
/// A missing debt is an error, never a zero balance.
pub async fn get_debt_balance<C>(db: &C, debt_id: &str) -> Result<Money>
where
    C: ConnectionTrait,
{
    get_debt_with_balance(db, debt_id)
        .await?
        .map(|d| d.balance)
        .ok_or_else(|| Error::DebtNotFound {
            id: debt_id.to_string(),
        })
}

/// Finds a debt and computes its balance.
pub async fn get_debt_with_balance<C>(db: &C, debt_id: &str) -> Result<Option<DebtWithBalance>>
where
    C: ConnectionTrait,
{
    match get_debt_by_id(db, debt_id).await? {
        Some(debt) => with_balance(db, debt).await.map(Some),
        None => Ok(None),
    }
}

/// Lists a person's debts of one direction with balances, newest first.
pub async fn list_debts_by_person_and_type<C>(
    db: &C,
    person_id: &str,
    debt_type: DebtType,
) -> Result<Vec<DebtWithBalance>>
where
    C: ConnectionTrait,
{
    let debts = Debt::find()
        .filter(debt::Column::PersonId.eq(person_id))
        .filter(debt::Column::DebtType.eq(debt_type))
        .order_by_desc(debt::Column::CreatedAt)
        .all(db)
        .await?;

    let mut result = Vec::with_capacity(debts.len());
    for debt in debts {
        result.push(with_balance(db, debt).await?);
    }
    Ok(result)
}

/// Lists every open debt, across all people.
pub async fn list_open_debts<C>(db: &C) -> Result<Vec<debt::Model>>
where
    C: ConnectionTrait,
{
    Debt::find()
        .filter(debt::Column::Status.eq(DebtStatus::Open))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every debt row, oldest first.
pub async fn list_all_debts<C>(db: &C) -> Result<Vec<debt::Model>>
where
    C: ConnectionTrait,
{
    Debt::find()
        .order_by_asc(debt::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies the present fields of `changes`. An empty change set returns the row untouched.
pub async fn update_debt<C>(db: &C, id: &str, changes: DebtChanges) -> Result<debt::Model>
where
    C: ConnectionTrait,
{
    let existing = get_debt_by_id(db, id)
        .await?
        .ok_or_else(|| Error::DebtNotFound { id: id.to_string() })?;
    if changes.is_empty() {
        return Ok(existing);
    }

    let mut row: debt::ActiveModel = existing.into();
    if let Some(description) = changes.description {
        row.description = Set(Some(description));
    }
    if let Some(amount) = changes.amount_original {
        row.amount_original = Set(amount.to_string());
    }
    if let Some(due_at) = changes.due_at {
        row.due_at = Set(due_at);
    }
    row.update(db).await.map_err(Into::into)
}

/// Deletes a debt that has no payment rows.
pub async fn delete_debt<C>(db: &C, id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let count = super::count_payments_for_debt(db, id).await?;
    if count > 0 {
        return Err(Error::DebtHasPayments {
            debt_id: id.to_string(),
            count,
        });
    }

    let result = Debt::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::DebtNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Flips the debt to settled. No balance check happens here.
pub async fn mark_debt_settled<C>(db: &C, id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Debt::update_many()
        .col_expr(debt::Column::Status, Expr::value(DebtStatus::Settled.into_value()))
        .filter(debt::Column::Id.eq(id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(Error::DebtNotFound { id: id.to_string() });
    }
    Ok(())
}
