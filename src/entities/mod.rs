//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the ledger tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod debt;
pub mod meta;
pub mod payment;
pub mod person;

// Re-export specific types to avoid conflicts
pub use debt::{
    Column as DebtColumn, DebtStatus, DebtType, Entity as Debt, Model as DebtModel,
};
pub use meta::{Column as MetaColumn, Entity as Meta, Model as MetaModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use person::{Column as PersonColumn, Entity as Person, Model as PersonModel};
