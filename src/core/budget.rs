//! Budget status for a single calendar month.
//!
//! Totals are summed by the database. A month with no expenses or no
//! contributions reports that total as `None`, and the remaining budget is
//! only known when both totals are.

use crate::{
    core::validation::YearMonth,
    entities::{Contribution, Expense, contribution, expense},
    errors::Result,
};
use sea_orm::{QuerySelect, prelude::*, sea_query::Expr};
use serde::Serialize;

/// Money in and out for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    /// The month reported on, as `YYYY-MM`
    pub year_month: String,
    /// Sum of expense item prices dated in the month
    pub total_expenses: Option<i64>,
    /// Sum of contributions dated in the month
    pub total_contribution: Option<i64>,
    /// `total_contribution - total_expenses` when both are known
    pub remaining_budget: Option<i64>,
}

/// Subtracts expenses from contributions when both totals are present.
#[must_use]
pub fn remaining_budget(total_contribution: Option<i64>, total_expenses: Option<i64>) -> Option<i64> {
    match (total_contribution, total_expenses) {
        (Some(contribution), Some(expenses)) => Some(contribution - expenses),
        _ => None,
    }
}

/// Builds the budget status for `year_month`.
pub async fn budget_status(db: &DatabaseConnection, year_month: YearMonth) -> Result<BudgetStatus> {
    let first = year_month.first_day();
    let last = year_month.last_day();

    let total_expenses = Expense::find()
        .select_only()
        .column_as(Expr::col(expense::Column::ItemPrice).sum(), "total")
        .filter(expense::Column::DateAdded.between(first, last))
        .into_tuple::<Option<i64>>()
        .one(db)
        .await?
        .flatten();

    let total_contribution = Contribution::find()
        .select_only()
        .column_as(Expr::col(contribution::Column::ContributionAmount).sum(), "total")
        .filter(contribution::Column::ContributionDate.between(first, last))
        .into_tuple::<Option<i64>>()
        .one(db)
        .await?
        .flatten();

    tracing::debug!(
        "Budget status for {}: contributions {:?}, expenses {:?}",
        year_month,
        total_contribution,
        total_expenses
    );

    Ok(BudgetStatus {
        year_month: year_month.to_string(),
        total_expenses,
        total_contribution,
        remaining_budget: remaining_budget(total_contribution, total_expenses),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    #[test]
    fn test_remaining_budget() {
        assert_eq!(remaining_budget(Some(100), Some(30)), Some(70));
        assert_eq!(remaining_budget(Some(10), Some(30)), Some(-20));
        assert_eq!(remaining_budget(Some(0), Some(0)), Some(0));
        assert_eq!(remaining_budget(None, Some(30)), None);
        assert_eq!(remaining_budget(Some(100), None), None);
        assert_eq!(remaining_budget(None, None), None);
    }

    #[tokio::test]
    async fn test_budget_status_empty_month() -> Result<()> {
        let db = setup_test_db().await?;

        let status = budget_status(&db, YearMonth::new(2024, 3).unwrap()).await?;
        assert_eq!(status.year_month, "2024-03");
        assert_eq!(status.total_expenses, None);
        assert_eq!(status.total_contribution, None);
        assert_eq!(status.remaining_budget, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_status_only_counts_the_month() -> Result<()> {
        let (db, alice) = setup_with_contributor().await?;
        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let march_end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        insert_contribution_on(&db, &alice, march, 200).await?;
        insert_contribution_on(&db, &alice, april, 999).await?;
        create_test_expense(&db, "rent", 50, 2, march, "alice").await?;
        create_test_expense(&db, "food", 30, 1, march_end, "bob").await?;
        create_test_expense(&db, "food", 500, 1, april, "bob").await?;

        let status = budget_status(&db, YearMonth::new(2024, 3).unwrap()).await?;
        // Expenses are summed by item price, not by total price
        assert_eq!(status.total_expenses, Some(80));
        assert_eq!(status.total_contribution, Some(200));
        assert_eq!(status.remaining_budget, Some(120));
        Ok(())
    }

    #[tokio::test]
    async fn test_budget_status_without_contributions() -> Result<()> {
        let db = setup_test_db().await?;
        let march = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        create_test_expense(&db, "rent", 50, 1, march, "alice").await?;

        let status = budget_status(&db, YearMonth::new(2024, 3).unwrap()).await?;
        assert_eq!(status.total_expenses, Some(50));
        assert_eq!(status.total_contribution, None);
        assert_eq!(status.remaining_budget, None);
        Ok(())
    }
}
