//! Ledger repository.
//!
//! The only code that reads or writes ledger rows. Functions here enforce storage-level rules
//! (referenced rows exist, no delete with dependents, atomic payment application) but no
//! business validation; that lives in [`crate::core`]. Balances are always recomputed from
//! the payment rows, never read from a stored total.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so it runs the same on a
//! connection or inside a transaction.

pub mod debts;
pub mod payments;
pub mod people;

pub use debts::{
    DebtChanges, DebtWithBalance, NewDebt, create_debt, delete_debt, get_debt_balance,
    get_debt_by_id, get_debt_with_balance, list_all_debts, list_debts_by_person_and_type,
    list_open_debts, mark_debt_settled, update_debt,
};
pub use payments::{
    AppliedPayment, NewPayment, add_payment, count_payments_for_debt, list_all_payments,
    list_payments_by_debt,
};
pub use people::{
    PersonRecord, count_debts_for_person, count_people, delete_person, get_person_by_id,
    list_all_people, upsert_person,
};

/// Generates a fresh opaque row identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
