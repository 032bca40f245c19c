//! `/budget_status` - money in and out for one month.

use crate::{
    api::{AppState, response::ResponseBody},
    core::{
        budget::{self, BudgetStatus},
        non_empty,
        validation::{YearMonth, validate_year_month},
    },
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub year_month: Option<String>,
}

async fn budget_status(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatusParams>,
) -> Result<Json<ResponseBody<BudgetStatus>>> {
    let today = state.today();

    let year_month = match non_empty(params.year_month.as_deref()) {
        Some(value) => validate_year_month(value, today)?,
        None => YearMonth::of(today),
    };

    let status = budget::budget_status(&state.database, year_month).await?;
    Ok(Json(ResponseBody { response: status }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/budget_status", get(budget_status))
}
