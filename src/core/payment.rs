//! Payment business logic - Adds payments with auto-settlement.
//!
//! A payment must be positive, target an open debt and not exceed its balance. The balance
//! used for that check is recomputed inside the same database transaction that inserts the
//! payment, so it is never stale. When the balance left after the payment is below the
//! auto-settle threshold, the debt is settled as part of the same transaction.

use crate::{
    db::{self, AppliedPayment, NewPayment},
    entities::payment,
    errors::{Error, Result},
    money::Money,
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::info;

/// User-supplied fields for a new payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaymentRequest {
    /// Debt being paid down
    pub debt_id: String,
    /// Amount as entered, e.g. `"40.00"`
    pub amount: String,
    /// When the payment happened (not necessarily now)
    pub date: DateTime<Utc>,
    /// Optional note
    #[serde(default)]
    pub note: Option<String>,
}

/// Records a payment against an open debt and settles the debt when the balance left is
/// below `auto_settle_threshold` (normally [`crate::config::DEFAULT_AUTO_SETTLE_THRESHOLD`]).
///
/// # Errors
/// - [`Error::Validation`] / [`Error::InvalidAmount`] for a missing, zero, negative or
///   non-numeric amount
/// - [`Error::DebtNotFound`] when the debt does not exist
/// - [`Error::DebtAlreadySettled`] when the debt is settled
/// - [`Error::PaymentExceedsBalance`] when the amount is larger than the current balance
pub async fn add_payment(
    db: &DatabaseConnection,
    request: NewPaymentRequest,
    auto_settle_threshold: Money,
) -> Result<AppliedPayment> {
    let amount = super::require_positive_amount("Payment", &request.amount)?;

    let txn = db.begin().await?;

    let debt = db::get_debt_with_balance(&txn, &request.debt_id)
        .await?
        .ok_or_else(|| Error::DebtNotFound {
            id: request.debt_id.clone(),
        })?;
    if debt.debt.is_settled() {
        return Err(Error::DebtAlreadySettled {
            debt_id: request.debt_id,
        });
    }
    if amount > debt.balance {
        return Err(Error::PaymentExceedsBalance {
            amount,
            balance: debt.balance,
        });
    }

    let applied = db::add_payment(
        &txn,
        NewPayment {
            id: None,
            debt_id: request.debt_id,
            amount,
            date: request.date,
            note: super::normalize_optional(request.note),
        },
        auto_settle_threshold,
    )
    .await?;

    txn.commit().await?;

    info!(
        payment_id = %applied.payment.id,
        debt_id = %applied.payment.debt_id,
        amount = %amount,
        balance = %applied.balance,
        "Payment added"
    );
    if applied.settled {
        info!(debt_id = %applied.payment.debt_id, balance = %applied.balance, "Debt auto-settled");
    }
    Ok(applied)
}

/// Lists the payments of an existing debt, oldest first.
pub async fn list_payments_for_debt(
    db: &DatabaseConnection,
    debt_id: &str,
) -> Result<Vec<payment::Model>> {
    if db::get_debt_by_id(db, debt_id).await?.is_none() {
        return Err(Error::DebtNotFound {
            id: debt_id.to_string(),
        });
    }
    db::list_payments_by_debt(db, debt_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::DEFAULT_AUTO_SETTLE_THRESHOLD;
    use crate::core::debt::get_debt_with_balance;
    use crate::entities::DebtStatus;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    async fn pay(db: &DatabaseConnection, debt_id: &str, amount: &str) -> Result<AppliedPayment> {
        add_payment(db, payment_request(debt_id, amount), DEFAULT_AUTO_SETTLE_THRESHOLD).await
    }

    #[tokio::test]
    async fn test_add_payment_validation_touches_no_storage() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let negative = pay(&db, "d1", "-5.00").await.unwrap_err();
        assert!(matches!(negative, Error::Validation { .. }));

        let zero = pay(&db, "d1", "0.00").await.unwrap_err();
        assert_eq!(zero.to_string(), "Payment amount must be greater than zero");

        let missing = pay(&db, "d1", " ").await.unwrap_err();
        assert_eq!(missing.to_string(), "Payment amount is required");

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_one_cent_left_stays_open() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("100.00").await?;

        let first = pay(&db, &debt.id, "99.99").await?;
        assert_eq!(first.balance.to_string(), "0.01");
        assert!(!first.settled);
        assert_eq!(
            get_debt_with_balance(&db, &debt.id).await?.debt.status,
            DebtStatus::Open
        );

        let second = pay(&db, &debt.id, "0.01").await?;
        assert_eq!(second.balance.to_string(), "0.00");
        assert!(second.settled);
        assert_eq!(
            get_debt_with_balance(&db, &debt.id).await?.debt.status,
            DebtStatus::Settled
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_threshold_absorbs_remainder() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("100.00").await?;
        let threshold = Money::from_cents(100);

        let partial = add_payment(&db, payment_request(&debt.id, "98.00"), threshold).await?;
        assert_eq!(partial.balance.to_string(), "2.00");
        assert!(!partial.settled);

        let last = add_payment(&db, payment_request(&debt.id, "1.50"), threshold).await?;
        assert_eq!(last.balance.to_string(), "0.50");
        assert!(last.settled);
        Ok(())
    }

    #[tokio::test]
    async fn test_single_full_payment_settles() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("100.00").await?;
        let applied = pay(&db, &debt.id, "100.00").await?;
        assert_eq!(applied.balance, Money::ZERO);
        assert!(applied.settled);
        Ok(())
    }

    #[tokio::test]
    async fn test_overpayment_rejected_and_state_unchanged() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("120.00").await?;
        pay(&db, &debt.id, "40.00").await?;

        let error = pay(&db, &debt.id, "9999.00").await.unwrap_err();
        assert!(matches!(
            error,
            Error::PaymentExceedsBalance { balance, .. } if balance == Money::from_cents(8_000)
        ));
        assert!(error.to_string().contains("80.00"));

        let stored = get_debt_with_balance(&db, &debt.id).await?;
        assert_eq!(stored.balance, Money::from_cents(8_000));
        assert_eq!(stored.debt.status, DebtStatus::Open);
        assert_eq!(list_payments_for_debt(&db, &debt.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_payment_leaves_state_unchanged() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("120.00").await?;

        let error = pay(&db, &debt.id, "-5.00").await.unwrap_err();
        assert_eq!(error.kind(), crate::errors::ErrorKind::Validation);
        assert!(list_payments_for_debt(&db, &debt.id).await?.is_empty());
        assert_eq!(
            get_debt_with_balance(&db, &debt.id).await?.balance,
            Money::from_cents(12_000)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_to_missing_debt() -> Result<()> {
        let db = setup_test_db().await?;
        let result = pay(&db, "missing", "1.00").await;
        assert!(matches!(result, Err(Error::DebtNotFound { .. })));

        let listing = list_payments_for_debt(&db, "missing").await;
        assert!(matches!(listing, Err(Error::DebtNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_after_auto_settle_rejected() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("10.00").await?;
        pay(&db, &debt.id, "10.00").await?;

        let result = pay(&db, &debt.id, "0.01").await;
        assert!(matches!(result, Err(Error::DebtAlreadySettled { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_note_and_date_stored() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("50.00").await?;
        let date = Utc::now() - chrono::Duration::days(10);

        let applied = add_payment(
            &db,
            NewPaymentRequest {
                debt_id: debt.id.clone(),
                amount: "12.345".to_string(),
                date,
                note: Some("  cash ".to_string()),
            },
            DEFAULT_AUTO_SETTLE_THRESHOLD,
        )
        .await?;

        assert_eq!(applied.payment.amount, "12.35");
        assert_eq!(applied.payment.note.as_deref(), Some("cash"));
        assert_eq!(applied.payment.date, date);
        Ok(())
    }

    #[tokio::test]
    async fn test_sub_cent_payment_rounds_to_one_cent() -> Result<()> {
        let (db, _person, debt) = setup_with_debt("0.02").await?;

        let applied = pay(&db, &debt.id, "0.005").await?;
        assert_eq!(applied.payment.amount, "0.01");
        assert_eq!(applied.balance.to_string(), "0.01");
        assert!(!applied.settled);

        let error = pay(&db, &debt.id, "0.004").await.unwrap_err();
        assert_eq!(error.to_string(), "Payment amount must be greater than zero");

        let last = pay(&db, &debt.id, "0.005").await?;
        assert_eq!(last.balance, Money::ZERO);
        assert!(last.settled);
        Ok(())
    }
}
