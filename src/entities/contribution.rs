//! Contribution entity - A dated deposit attributed to a contributor.
//!
//! `contribution_date` is always the first day of a month. The `unique_id` is
//! assigned once at creation and is the only key used for deletes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contribution database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contributions")]
pub struct Model {
    /// Unique identifier for the contribution
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the contributor who made this deposit
    pub contributor_id: i64,
    /// First day of the month the contribution counts towards
    pub contribution_date: Date,
    /// Deposited amount, never negative
    pub contribution_amount: i64,
    /// Opaque public identifier
    #[sea_orm(unique)]
    pub unique_id: Uuid,
    /// When the contribution was created
    pub created_at: DateTimeUtc,
    /// When the contribution was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Contribution and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contribution belongs to one contributor and goes away with it
    #[sea_orm(
        belongs_to = "super::contributor::Entity",
        from = "Column::ContributorId",
        to = "super::contributor::Column::Id",
        on_delete = "Cascade"
    )]
    Contributor,
}

impl Related<super::contributor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contributor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
