//! Contributor business logic - Handles listing, registering and removing contributors.
//!
//! Names are normalized to lowercase before they touch the database, which is
//! what makes lookups and the uniqueness constraint case-insensitive. Removing
//! a contributor also removes every contribution attributed to them.

use crate::{
    core::display_name,
    entities::{Contribution, Contributor, contribution, contributor},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::OnConflict};
use tracing::info;

/// Outcome of registering a contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributorUpsert {
    /// A new contributor row was inserted
    Created(contributor::Model),
    /// A contributor with that name was already stored
    Existing(contributor::Model),
}

impl ContributorUpsert {
    #[must_use]
    pub const fn model(&self) -> &contributor::Model {
        match self {
            Self::Created(model) | Self::Existing(model) => model,
        }
    }

    #[must_use]
    pub const fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Retrieves all contributors ordered alphabetically by stored name.
pub async fn get_all_contributors(db: &DatabaseConnection) -> Result<Vec<contributor::Model>> {
    Contributor::find()
        .order_by_asc(contributor::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists contributor display names in alphabetical order.
pub async fn list_contributor_names(db: &DatabaseConnection) -> Result<Vec<String>> {
    let contributors = get_all_contributors(db).await?;
    Ok(contributors
        .iter()
        .map(|c| display_name(&c.name))
        .collect())
}

/// Finds a contributor by name, ignoring case.
pub async fn get_contributor_by_name<C>(db: &C, name: &str) -> Result<Option<contributor::Model>>
where
    C: ConnectionTrait,
{
    Contributor::find()
        .filter(contributor::Column::Name.eq(name.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a contributor, leaving an existing one with the same name untouched.
///
/// The insert ignores a name conflict, so concurrent registrations of the same
/// name all succeed and exactly one of them reports [`ContributorUpsert::Created`].
pub async fn upsert_contributor(db: &DatabaseConnection, name: &str) -> Result<ContributorUpsert> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(Error::validation("Contributor name cannot be empty"));
    }

    let now = chrono::Utc::now();
    let contributor = contributor::ActiveModel {
        name: Set(normalized.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let inserted = Contributor::insert(contributor)
        .on_conflict(
            OnConflict::column(contributor::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let stored = get_contributor_by_name(db, &normalized)
        .await?
        .ok_or_else(|| Error::ContributorNotFound {
            name: normalized.clone(),
        })?;

    if inserted > 0 {
        info!("Registered contributor {}", stored.name);
        Ok(ContributorUpsert::Created(stored))
    } else {
        Ok(ContributorUpsert::Existing(stored))
    }
}

/// Deletes a contributor together with their contributions.
///
/// Returns how many contributions were removed. Fails with
/// [`Error::ContributorNotFound`] when no contributor has that name.
pub async fn delete_contributor(db: &DatabaseConnection, name: &str) -> Result<u64> {
    let txn = db.begin().await?;

    let contributor = get_contributor_by_name(&txn, name)
        .await?
        .ok_or_else(|| Error::ContributorNotFound {
            name: name.to_string(),
        })?;

    let removed = Contribution::delete_many()
        .filter(contribution::Column::ContributorId.eq(contributor.id))
        .exec(&txn)
        .await?
        .rows_affected;

    let contributor_name = contributor.name.clone();
    contributor.delete(&txn).await?;

    txn.commit().await?;
    info!(
        "Deleted contributor {} and {} contribution(s)",
        contributor_name, removed
    );
    Ok(removed)
}
