//! Shared test utilities for the budget tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{contribution, contributor, expense},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

/// The fixed "today" used by tests that need a calendar.
#[allow(clippy::expect_used)]
#[must_use]
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid test date")
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a contributor and returns the stored row.
pub async fn create_test_contributor(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::contributor::Model> {
    let outcome = contributor::upsert_contributor(db, name).await?;
    Ok(outcome.model().clone())
}

/// Sets up a test database with a contributor named "alice".
/// Returns (db, contributor) for common test scenarios.
pub async fn setup_with_contributor() -> Result<(DatabaseConnection, entities::contributor::Model)>
{
    let db = setup_test_db().await?;
    let alice = create_test_contributor(&db, "alice").await?;
    Ok((db, alice))
}

/// Records a contribution through the normal code path, dated in [`test_today`]'s year.
pub async fn create_test_contribution(
    db: &DatabaseConnection,
    contributor: &entities::contributor::Model,
    month: u32,
    amount: i64,
) -> Result<entities::contribution::Model> {
    contribution::create_contribution(db, &contributor.name, month, amount, test_today()).await
}

/// Inserts a contribution on an arbitrary date, bypassing the current-year rule.
/// Use this for range and month-boundary tests.
pub async fn insert_contribution_on(
    db: &DatabaseConnection,
    contributor: &entities::contributor::Model,
    date: NaiveDate,
    amount: i64,
) -> Result<entities::contribution::Model> {
    let now = chrono::Utc::now();
    let model = entities::contribution::ActiveModel {
        contributor_id: Set(contributor.id),
        contribution_date: Set(date),
        contribution_amount: Set(amount),
        unique_id: Set(Uuid::new_v4()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Logs an expense with explicit values.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    item_name: &str,
    item_price: i64,
    item_quantity: i64,
    date_added: NaiveDate,
    added_by: &str,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        expense::NewExpense {
            item_name: item_name.to_string(),
            item_price,
            item_quantity: Some(item_quantity),
            date_added: Some(date_added),
            added_by: added_by.to_string(),
        },
        test_today(),
    )
    .await
}
