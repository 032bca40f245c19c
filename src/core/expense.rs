//! Expense business logic - Handles listing, logging and deleting expenses.
//!
//! `total_price` is always derived here from `item_price * item_quantity`;
//! callers never supply it. Item names are stored lowercase so filtering and
//! per-item aggregation group "Coffee" and "coffee" together.

use crate::{
    core::{
        aggregate::{self, Breakdown, ItemShare},
        filters::{self, ExpenseFilter},
        validation::MAX_AMOUNT,
    },
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::info;

/// An expense as presented to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    pub item_name: String,
    pub item_price: i64,
    pub added_by: String,
    pub item_quantity: i64,
    pub date_added: NaiveDate,
    pub unique_id: Uuid,
    pub total_price: i64,
}

impl From<&expense::Model> for ExpenseRecord {
    fn from(model: &expense::Model) -> Self {
        Self {
            item_name: model.item_name.clone(),
            item_price: model.item_price,
            added_by: model.added_by.clone(),
            item_quantity: model.item_quantity,
            date_added: model.date_added,
            unique_id: model.unique_id,
            total_price: model.total_price,
        }
    }
}

/// Filtered expenses together with their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub expenses: Vec<ExpenseRecord>,
    /// Sum of every listed `total_price`, `None` when nothing matched
    pub total_expenses: Option<i64>,
    pub expense_per_item: Breakdown<ItemShare>,
}

/// Input for logging an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub item_name: String,
    pub item_price: i64,
    /// Defaults to 1
    pub item_quantity: Option<i64>,
    /// Defaults to today
    pub date_added: Option<NaiveDate>,
    pub added_by: String,
}

/// Computes `item_price * item_quantity`, rejecting totals above [`MAX_AMOUNT`].
pub fn total_price(item_price: i64, item_quantity: i64) -> Result<i64> {
    item_price
        .checked_mul(item_quantity)
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or_else(|| Error::validation("Provide a valid item price value"))
}

/// Logs a new expense.
///
/// The item name is lowercased and `total_price` is computed before the row
/// is written.
pub async fn create_expense(
    db: &DatabaseConnection,
    new_expense: NewExpense,
    today: NaiveDate,
) -> Result<expense::Model> {
    let item_name = new_expense.item_name.trim().to_lowercase();
    if item_name.is_empty() {
        return Err(Error::validation("Both item_name and item_price are required"));
    }

    if !(0..=MAX_AMOUNT).contains(&new_expense.item_price) {
        return Err(Error::validation("Provide a valid item price value"));
    }

    let item_quantity = new_expense.item_quantity.unwrap_or(1);
    if !(1..=MAX_AMOUNT).contains(&item_quantity) {
        return Err(Error::validation("Provide a valid item quantity value"));
    }

    let total = total_price(new_expense.item_price, item_quantity)?;

    let now = chrono::Utc::now();
    let expense = expense::ActiveModel {
        added_by: Set(new_expense.added_by),
        date_added: Set(new_expense.date_added.unwrap_or(today)),
        item_name: Set(item_name),
        item_price: Set(new_expense.item_price),
        item_quantity: Set(item_quantity),
        total_price: Set(total),
        unique_id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = expense.insert(db).await?;
    info!(
        "Saved expense {} for {} ({} x {})",
        created.unique_id, created.item_name, created.item_quantity, created.item_price
    );
    Ok(created)
}

/// Lists expenses matching `filter`, newest first and then most expensive first.
pub async fn list_expenses(
    db: &DatabaseConnection,
    filter: &ExpenseFilter,
) -> Result<Vec<ExpenseRecord>> {
    let expenses = Expense::find()
        .filter(filters::expense_condition(filter))
        .order_by_desc(expense::Column::DateAdded)
        .order_by_desc(expense::Column::TotalPrice)
        .all(db)
        .await?;

    Ok(expenses.iter().map(ExpenseRecord::from).collect())
}

/// Lists expenses matching `filter` and aggregates them per item.
pub async fn summarize_expenses(
    db: &DatabaseConnection,
    filter: &ExpenseFilter,
) -> Result<ExpenseSummary> {
    let expenses = list_expenses(db, filter).await?;

    let total_expenses = if expenses.is_empty() {
        None
    } else {
        Some(aggregate::checked_total(
            expenses.iter().map(|record| record.total_price),
        )?)
    };

    let expense_per_item = match total_expenses {
        Some(total) if total != 0 => aggregate::aggregate_by_item(&expenses, total)?,
        _ => Breakdown::default(),
    };

    Ok(ExpenseSummary {
        expenses,
        total_expenses,
        expense_per_item,
    })
}

/// Finds an expense by its public identifier.
pub async fn get_expense_by_unique_id(
    db: &DatabaseConnection,
    unique_id: Uuid,
) -> Result<Option<expense::Model>> {
    Expense::find()
        .filter(expense::Column::UniqueId.eq(unique_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense by its public identifier.
pub async fn delete_expense(db: &DatabaseConnection, unique_id: &str) -> Result<()> {
    let parsed = crate::core::parse_unique_id(unique_id)?;

    let expense = get_expense_by_unique_id(db, parsed)
        .await?
        .ok_or_else(|| Error::ExpenseNotFound {
            unique_id: unique_id.to_string(),
        })?;

    expense.delete(db).await?;
    info!("Deleted expense {}", parsed);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn coffee(quantity: Option<i64>) -> NewExpense {
        NewExpense {
            item_name: "Coffee".to_string(),
            item_price: 5,
            item_quantity: quantity,
            date_added: None,
            added_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(5, 3).unwrap(), 15);
        assert_eq!(total_price(0, 9).unwrap(), 0);
        assert_eq!(total_price(MAX_AMOUNT, 1).unwrap(), MAX_AMOUNT);
        assert!(matches!(
            total_price(MAX_AMOUNT, 2),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            total_price(i64::MAX, 2),
            Err(Error::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_expense_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let negative_price = NewExpense {
            item_price: -1,
            ..coffee(None)
        };
        assert!(matches!(
            create_expense(&db, negative_price, test_today()).await,
            Err(Error::Validation { message }) if message == "Provide a valid item price value"
        ));

        let huge_price = NewExpense {
            item_price: MAX_AMOUNT + 1,
            ..coffee(None)
        };
        assert!(matches!(
            create_expense(&db, huge_price, test_today()).await,
            Err(Error::Validation { message }) if message == "Provide a valid item price value"
        ));

        assert!(matches!(
            create_expense(&db, coffee(Some(0)), test_today()).await,
            Err(Error::Validation { message }) if message == "Provide a valid item quantity value"
        ));

        let blank_name = NewExpense {
            item_name: "  ".to_string(),
            ..coffee(None)
        };
        assert!(matches!(
            create_expense(&db, blank_name, test_today()).await,
            Err(Error::Validation { .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_summary_of_largest_amounts() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense(&db, "a", MAX_AMOUNT, 1, test_today(), "alice").await?;
        create_test_expense(&db, "b", MAX_AMOUNT, 1, test_today(), "alice").await?;

        let summary = summarize_expenses(&db, &ExpenseFilter::default()).await?;
        assert_eq!(summary.total_expenses, Some(2 * MAX_AMOUNT));
        assert_eq!(summary.expense_per_item.get("a").unwrap().percentage, 50.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_overflow_is_an_error() -> Result<()> {
        let db = setup_test_db().await?;
        for name in ["a", "b"] {
            let now = chrono::Utc::now();
            expense::ActiveModel {
                added_by: Set("alice".to_string()),
                date_added: Set(test_today()),
                item_name: Set(name.to_string()),
                item_price: Set(i64::MAX),
                item_quantity: Set(1),
                total_price: Set(i64::MAX),
                unique_id: Set(Uuid::new_v4()),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let result = summarize_expenses(&db, &ExpenseFilter::default()).await;
        assert!(matches!(result, Err(Error::TotalOverflow)));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_computes_total_price() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_expense(&db, coffee(Some(3)), test_today()).await?;
        assert_eq!(created.item_name, "coffee");
        assert_eq!(created.item_quantity, 3);
        assert_eq!(created.total_price, 15);
        assert_eq!(created.date_added, test_today());
        assert_eq!(created.added_by, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_defaults_quantity_to_one() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_expense(&db, coffee(None), test_today()).await?;
        assert_eq!(created.item_quantity, 1);
        assert_eq!(created.total_price, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_order_and_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan_5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        create_test_expense(&db, "tea", 2, 1, jan_1, "bob").await?;
        create_test_expense(&db, "coffee", 5, 1, jan_5, "alice").await?;
        create_test_expense(&db, "coffee", 5, 3, jan_5, "alice").await?;

        let all = list_expenses(&db, &ExpenseFilter::default()).await?;
        let totals: Vec<i64> = all.iter().map(|e| e.total_price).collect();
        assert_eq!(totals, vec![15, 5, 2]);

        let by_item = list_expenses(
            &db,
            &ExpenseFilter {
                item_name: Some("COFFEE".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_item.len(), 2);

        let by_date = list_expenses(
            &db,
            &ExpenseFilter {
                start_date: Some(jan_1),
                end_date: Some(jan_1),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].item_name, "tea");

        let by_person = list_expenses(
            &db,
            &ExpenseFilter {
                added_by: Some("alice".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(by_person.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_scenario() -> Result<()> {
        let db = setup_test_db().await?;
        create_expense(&db, coffee(Some(3)), test_today()).await?;

        let summary = summarize_expenses(&db, &ExpenseFilter::default()).await?;
        assert_eq!(summary.total_expenses, Some(15));
        let coffee_share = summary.expense_per_item.get("coffee").unwrap();
        assert_eq!(coffee_share.grand_total, 15);
        assert!((coffee_share.percentage - 100.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_empty() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = summarize_expenses(&db, &ExpenseFilter::default()).await?;
        assert_eq!(summary.total_expenses, None);
        assert!(summary.expense_per_item.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_expense(&db, coffee(None), test_today()).await?;

        delete_expense(&db, &created.unique_id.to_string()).await?;
        assert!(get_expense_by_unique_id(&db, created.unique_id).await?.is_none());

        let again = delete_expense(&db, &created.unique_id.to_string()).await;
        assert!(matches!(again, Err(Error::ExpenseNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_malformed_unique_id() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = delete_expense(&db, "abc").await;
        assert!(matches!(
            result,
            Err(Error::InvalidUniqueId { value }) if value == "abc"
        ));
        Ok(())
    }
}
