//! Contributor entity - An identity that deposits funds into the shared budget.
//!
//! Names are stored lowercase so uniqueness is effectively case-insensitive.
//! Display code capitalizes them on the way out.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contributor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributors")]
pub struct Model {
    /// Unique identifier for the contributor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Lowercased contributor name (e.g., "alice")
    #[sea_orm(unique)]
    pub name: String,
    /// When the contributor was created
    pub created_at: DateTimeUtc,
    /// When the contributor was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Contributor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One contributor has many contributions
    #[sea_orm(has_many = "super::contribution::Entity")]
    Contributions,
}

impl Related<super::contribution::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
