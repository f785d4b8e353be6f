//! Debt entity - A single monetary obligation in one direction.
//!
//! `amount_original` holds the face value as a canonical two-decimal string (`"120.00"`).
//! The balance is never stored; it is always derived from the payments table.

use crate::money::Money;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a debt
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum DebtType {
    /// The user owes the contact
    #[sea_orm(string_value = "IOU")]
    #[serde(rename = "IOU")]
    Iou,
    /// The contact owes the user
    #[sea_orm(string_value = "UOM")]
    #[serde(rename = "UOM")]
    Uom,
}

/// Lifecycle state of a debt. Only ever moves from `Open` to `Settled`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    /// Still being paid down
    #[sea_orm(string_value = "open")]
    Open,
    /// Terminal state
    #[sea_orm(string_value = "settled")]
    Settled,
}

/// Debt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Opaque unique identifier (UUID v4 string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// IOU or UOM, fixed at creation
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    /// Owning person
    pub person_id: String,
    /// Optional description (e.g. "Groceries")
    pub description: Option<String>,
    /// Face value as a two-decimal string
    pub amount_original: String,
    /// When the debt was recorded
    pub created_at: DateTimeUtc,
    /// Optional due date
    pub due_at: Option<DateTimeUtc>,
    /// Open or settled
    pub status: DebtStatus,
}

impl Model {
    /// Face value as [`Money`].
    pub fn amount(&self) -> crate::errors::Result<Money> {
        Money::parse(&self.amount_original)
    }

    /// Whether the debt reached its terminal state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status == DebtStatus::Settled
    }
}

/// Defines relationships between Debt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each debt belongs to one person
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
    /// One debt has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
