//! Payment rows and atomic payment application.

use crate::{
    entities::{Payment, payment},
    errors::{Error, Result},
    money::Money,
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::debug;

/// A payment to insert. Absent `id` gets a generated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Explicit id, or `None` to generate one
    pub id: Option<String>,
    /// Debt being paid down
    pub debt_id: String,
    /// Paid amount
    pub amount: Money,
    /// When the payment happened
    pub date: DateTime<Utc>,
    /// Optional note
    pub note: Option<String>,
}

/// What [`add_payment`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPayment {
    /// The inserted payment row
    pub payment: payment::Model,
    /// Debt balance after this payment
    pub balance: Money,
    /// Whether this payment flipped the debt to settled
    pub settled: bool,
}

/// Inserts a payment and, in the same transaction, settles the debt when the recomputed
/// balance is below `auto_settle_threshold`.
///
/// Either both writes happen or neither does.
pub async fn add_payment<C>(
    db: &C,
    new_payment: NewPayment,
    auto_settle_threshold: Money,
) -> Result<AppliedPayment>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let debt = super::get_debt_by_id(&txn, &new_payment.debt_id)
        .await?
        .ok_or_else(|| Error::DebtNotFound {
            id: new_payment.debt_id.clone(),
        })?;

    let row = payment::ActiveModel {
        id: Set(new_payment.id.unwrap_or_else(super::new_id)),
        debt_id: Set(new_payment.debt_id),
        amount: Set(new_payment.amount.to_string()),
        date: Set(new_payment.date),
        note: Set(new_payment.note),
    };
    let payment = row.insert(&txn).await?;

    let balance = super::get_debt_balance(&txn, &debt.id).await?;
    let settled = !debt.is_settled() && balance < auto_settle_threshold;
    if settled {
        super::mark_debt_settled(&txn, &debt.id).await?;
        debug!(debt_id = %debt.id, %balance, "Balance reached settle threshold");
    }

    txn.commit().await?;

    Ok(AppliedPayment {
        payment,
        balance,
        settled,
    })
}

/// Lists a debt's payments, oldest first.
pub async fn list_payments_by_debt<C>(db: &C, debt_id: &str) -> Result<Vec<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find()
        .filter(payment::Column::DebtId.eq(debt_id))
        .order_by_asc(payment::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every payment row, oldest first.
pub async fn list_all_payments<C>(db: &C) -> Result<Vec<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find()
        .order_by_asc(payment::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts the payments recorded against a debt.
pub async fn count_payments_for_debt<C>(db: &C, debt_id: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    Payment::find()
        .filter(payment::Column::DebtId.eq(debt_id))
        .count(db)
        .await
        .map_err(Into::into)
}
