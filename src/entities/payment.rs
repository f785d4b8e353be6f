//! Payment entity - A reduction applied to exactly one debt.
//!
//! Payments are immutable once written. They disappear only together with their debt.

use crate::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Opaque unique identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The debt this payment reduces
    pub debt_id: String,
    /// Paid amount as a two-decimal string, always positive
    pub amount: String,
    /// User-supplied payment date
    pub date: DateTimeUtc,
    /// Optional note
    pub note: Option<String>,
}

impl Model {
    /// Paid amount as [`Money`].
    pub fn amount(&self) -> crate::errors::Result<Money> {
        Money::parse(&self.amount)
    }
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one debt
    #[sea_orm(
        belongs_to = "super::debt::Entity",
        from = "Column::DebtId",
        to = "super::debt::Column::Id"
    )]
    Debt,
}

impl Related<super::debt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
