//! Contribution business logic - Handles listing, recording and deleting contributions.
//!
//! A contribution always lands on the first day of a month in the current
//! year; only the month is chosen by the caller. Listing joins each
//! contribution with its contributor so results can be filtered by name and
//! shown with a display name and a `YYYY-MM` label.

use crate::{
    core::{
        aggregate::{self, Breakdown, ContributorShare},
        display_name,
        filters::{self, ContributionFilter},
        validation::{MAX_AMOUNT, YearMonth},
    },
    entities::{Contribution, Contributor, contribution},
    errors::{Error, Result},
};
use chrono::{Datelike, NaiveDate};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// A contribution as presented to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionRecord {
    /// Month the contribution counts towards, as `YYYY-MM`
    pub year_month: String,
    /// Capitalized contributor name
    pub contributor_name: String,
    pub contribution_amount: i64,
    pub unique_id: Uuid,
}

impl ContributionRecord {
    /// Builds the record from a stored contribution and its contributor's stored name.
    #[must_use]
    pub fn new(contribution: &contribution::Model, contributor_name: &str) -> Self {
        Self {
            year_month: YearMonth::of(contribution.contribution_date).to_string(),
            contributor_name: display_name(contributor_name),
            contribution_amount: contribution.contribution_amount,
            unique_id: contribution.unique_id,
        }
    }
}

/// Filtered contributions together with their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributionSummary {
    pub contributions: Vec<ContributionRecord>,
    /// Sum of all listed amounts, `None` when nothing matched
    pub total_contributions: Option<i64>,
    pub contribution_per_contributor: Breakdown<ContributorShare>,
}

/// Lists contributions matching `filter`, oldest month first.
pub async fn list_contributions(
    db: &DatabaseConnection,
    filter: &ContributionFilter,
) -> Result<Vec<ContributionRecord>> {
    let rows = Contribution::find()
        .find_also_related(Contributor)
        .filter(filters::contribution_condition(filter))
        .order_by_asc(contribution::Column::ContributionDate)
        .order_by_asc(contribution::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .iter()
        .filter_map(|(contribution, contributor)| {
            contributor
                .as_ref()
                .map(|contributor| ContributionRecord::new(contribution, &contributor.name))
        })
        .collect())
}

/// Lists contributions matching `filter` and aggregates them per contributor.
pub async fn summarize_contributions(
    db: &DatabaseConnection,
    filter: &ContributionFilter,
) -> Result<ContributionSummary> {
    let contributions = list_contributions(db, filter).await?;

    let total_contributions = if contributions.is_empty() {
        None
    } else {
        Some(aggregate::checked_total(
            contributions.iter().map(|record| record.contribution_amount),
        )?)
    };

    let contribution_per_contributor = match total_contributions {
        Some(total) if total != 0 => aggregate::aggregate_by_contributor(&contributions, total)?,
        _ => Breakdown::default(),
    };

    Ok(ContributionSummary {
        contributions,
        total_contributions,
        contribution_per_contributor,
    })
}

/// Records a contribution for an existing contributor.
///
/// The contribution date is the first day of `month` in `today`'s year.
///
/// # Arguments
/// * `contributor_name` - Name as typed by the caller, any case
/// * `month` - Calendar month, already validated against `today`
/// * `amount` - Deposited amount, must not be negative
/// * `today` - Current date
pub async fn create_contribution(
    db: &DatabaseConnection,
    contributor_name: &str,
    month: u32,
    amount: i64,
    today: NaiveDate,
) -> Result<contribution::Model> {
    if !(0..=MAX_AMOUNT).contains(&amount) {
        return Err(Error::validation("Provide a valid contribution value"));
    }

    let contribution_date = NaiveDate::from_ymd_opt(today.year(), month, 1)
        .ok_or_else(|| Error::validation(crate::core::validation::INVALID_MONTH))?;

    let contributor = crate::core::contributor::get_contributor_by_name(db, contributor_name)
        .await?
        .ok_or_else(|| Error::UnknownContributor {
            name: contributor_name.to_string(),
        })?;

    let now = chrono::Utc::now();
    let contribution = contribution::ActiveModel {
        contributor_id: Set(contributor.id),
        contribution_date: Set(contribution_date),
        contribution_amount: Set(amount),
        unique_id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = contribution.insert(db).await?;
    info!(
        "Saved contribution {} of {} for {}",
        created.unique_id, created.contribution_amount, contributor.name
    );
    Ok(created)
}

/// Finds a contribution by its public identifier.
pub async fn get_contribution_by_unique_id(
    db: &DatabaseConnection,
    unique_id: Uuid,
) -> Result<Option<contribution::Model>> {
    Contribution::find()
        .filter(contribution::Column::UniqueId.eq(unique_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a contribution by its public identifier.
///
/// A malformed identifier yields [`Error::InvalidUniqueId`], an unknown one
/// [`Error::ContributionNotFound`].
pub async fn delete_contribution(db: &DatabaseConnection, unique_id: &str) -> Result<()> {
    let parsed = crate::core::parse_unique_id(unique_id)?;

    let contribution = get_contribution_by_unique_id(db, parsed)
        .await?
        .ok_or_else(|| Error::ContributionNotFound {
            unique_id: unique_id.to_string(),
        })?;

    contribution.delete(db).await?;
    info!("Deleted contribution {}", parsed);
    Ok(())
}
