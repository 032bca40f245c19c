//! `/expenses` - list with filters, log, and delete expenses.

use crate::{
    api::{
        AppState,
        identity::CallerIdentity,
        response::{MessageBody, ResponseBody, message},
    },
    core::{
        expense::{self, ExpenseRecord, ExpenseSummary, NewExpense},
        filters::ExpenseFilter,
        non_empty,
        validation::{validate_amount, validate_date},
    },
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub item_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub added_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateParams {
    pub item_name: Option<String>,
    pub item_price: Option<String>,
    pub date: Option<String>,
    pub item_quantity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub unique_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub message: String,
    pub expense: ExpenseRecord,
}

async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ResponseBody<ExpenseSummary>>> {
    let start_date = non_empty(params.start_date.as_deref())
        .map(validate_date)
        .transpose()?;
    let end_date = non_empty(params.end_date.as_deref())
        .map(validate_date)
        .transpose()?;

    let filter = ExpenseFilter {
        item_name: non_empty(params.item_name.as_deref()).map(ToString::to_string),
        start_date,
        end_date,
        added_by: non_empty(params.added_by.as_deref()).map(ToString::to_string),
    };

    let summary = expense::summarize_expenses(&state.database, &filter).await?;
    Ok(Json(ResponseBody { response: summary }))
}

async fn create_expense(
    State(state): State<Arc<AppState>>,
    identity: CallerIdentity,
    Query(params): Query<CreateParams>,
) -> Result<(StatusCode, Json<CreatedBody>)> {
    let (Some(item_name), Some(item_price)) = (
        non_empty(params.item_name.as_deref()),
        non_empty(params.item_price.as_deref()),
    ) else {
        return Err(Error::validation("Both item_name and item_price are required"));
    };

    let item_price = validate_amount(item_price, "Provide a valid item price value")?;

    let date_added = non_empty(params.date.as_deref())
        .map(validate_date)
        .transpose()?;

    let item_quantity = non_empty(params.item_quantity.as_deref())
        .map(|value| validate_amount(value, "Provide a valid item quantity value"))
        .transpose()?;
    if item_quantity.is_some_and(|quantity| quantity < 1) {
        return Err(Error::validation("Provide a valid item quantity value"));
    }

    let added_by = identity.require()?;

    let created = expense::create_expense(
        &state.database,
        NewExpense {
            item_name: item_name.to_string(),
            item_price,
            item_quantity,
            date_added,
            added_by,
        },
        state.today(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: format!("Expense has been saved for {item_name}"),
            expense: ExpenseRecord::from(&created),
        }),
    ))
}

async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<(StatusCode, Json<MessageBody>)> {
    let unique_id = non_empty(params.unique_id.as_deref())
        .ok_or_else(|| Error::validation("Please provide a unique_id"))?;

    expense::delete_expense(&state.database, unique_id).await?;
    Ok(message(
        StatusCode::OK,
        format!("Expense {unique_id} has been deleted"),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/expenses",
        get(list_expenses).post(create_expense).delete(delete_expense),
    )
}
