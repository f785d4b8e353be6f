//! Meta entity - Key-value pairs describing the database itself.
//! Holds the `schema_version` marker read by the migration step.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Meta database model - stores key-value pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meta")]
pub struct Model {
    /// Key (e.g., `"schema_version"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Value stored as string
    pub value: String,
    /// When this entry was last written
    pub updated_at: DateTimeUtc,
}

/// `Meta` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
