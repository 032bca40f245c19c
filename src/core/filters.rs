//! Query builders.
//!
//! Each builder turns a set of optional filters into a single `SeaORM`
//! [`Condition`]: the conjunction of every filter that was supplied. An empty
//! filter yields a condition that matches everything.

use crate::core::validation::YearMonth;
use crate::entities::{contribution, contributor, expense};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition};

/// Optional filters accepted by the contributions list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionFilter {
    /// Exact stored (lowercase) contributor name
    pub contributor: Option<String>,
    /// Earliest month to include
    pub start: Option<YearMonth>,
    /// Latest month to include
    pub end: Option<YearMonth>,
}

/// Optional filters accepted by the expenses list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Item name, matched case-insensitively against the stored lowercase name
    pub item_name: Option<String>,
    /// Earliest `date_added` to include
    pub start_date: Option<NaiveDate>,
    /// Latest `date_added` to include
    pub end_date: Option<NaiveDate>,
    /// Exact `added_by` identity
    pub added_by: Option<String>,
}

/// Builds the condition for a contributions query joined with contributors.
///
/// The month bounds form a chronological range: `start` covers everything
/// from its first day and `end` everything up to its last day, so a range
/// may span a year boundary.
#[must_use]
pub fn contribution_condition(filter: &ContributionFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(name) = &filter.contributor {
        condition = condition.add(contributor::Column::Name.eq(name.as_str()));
    }

    if let Some(start) = filter.start {
        condition = condition.add(contribution::Column::ContributionDate.gte(start.first_day()));
    }

    if let Some(end) = filter.end {
        condition = condition.add(contribution::Column::ContributionDate.lte(end.last_day()));
    }

    condition
}

/// Builds the condition for an expenses query.
#[must_use]
pub fn expense_condition(filter: &ExpenseFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(item_name) = &filter.item_name {
        condition = condition.add(expense::Column::ItemName.eq(item_name.to_lowercase()));
    }

    if let Some(start_date) = filter.start_date {
        condition = condition.add(expense::Column::DateAdded.gte(start_date));
    }

    if let Some(end_date) = filter.end_date {
        condition = condition.add(expense::Column::DateAdded.lte(end_date));
    }

    if let Some(added_by) = &filter.added_by {
        condition = condition.add(expense::Column::AddedBy.eq(added_by.as_str()));
    }

    condition
}
