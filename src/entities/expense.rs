//! Expense entity - A priced purchase logged against the shared pool.
//!
//! `total_price` is derived from `item_price * item_quantity` and is recomputed
//! by `core::expense` on every write.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Free-text identity of whoever logged the expense
    pub added_by: String,
    /// Day the purchase happened
    pub date_added: Date,
    /// Lowercased item name (e.g., "coffee")
    pub item_name: String,
    /// Price of a single unit
    pub item_price: i64,
    /// Number of units bought, at least 1
    pub item_quantity: i64,
    /// `item_price * item_quantity`
    pub total_price: i64,
    /// Opaque public identifier
    #[sea_orm(unique)]
    pub unique_id: Uuid,
    /// When the expense was created
    pub created_at: DateTimeUtc,
    /// When the expense was last modified
    pub updated_at: DateTimeUtc,
}

/// `Expense` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
