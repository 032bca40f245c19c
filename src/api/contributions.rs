//! `/contributions` - list with filters, record, and delete contributions.

use crate::{
    api::{
        AppState,
        response::{MessageBody, ResponseBody, message},
    },
    core::{
        contribution::{self, ContributionRecord, ContributionSummary},
        filters::ContributionFilter,
        non_empty,
        validation::{validate_amount, validate_month, validate_year_month},
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
    pub contributor: Option<String>,
    pub start_year_month: Option<String>,
    pub end_year_month: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateParams {
    pub contributor: Option<String>,
    pub month: Option<String>,
    pub contribution: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub unique_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub message: String,
    pub contribution: ContributionRecord,
}

async fn list_contributions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ResponseBody<ContributionSummary>>> {
    let today = state.today();

    // Start is checked before end; the first failure is reported
    let start = non_empty(params.start_year_month.as_deref())
        .map(|value| validate_year_month(value, today))
        .transpose()?;
    let end = non_empty(params.end_year_month.as_deref())
        .map(|value| validate_year_month(value, today))
        .transpose()?;

    let filter = ContributionFilter {
        contributor: non_empty(params.contributor.as_deref()).map(str::to_lowercase),
        start,
        end,
    };

    let summary = contribution::summarize_contributions(&state.database, &filter).await?;
    Ok(Json(ResponseBody { response: summary }))
}

fn parse_amount(value: &str) -> Result<i64> {
    validate_amount(value, "Provide a valid contribution value")
}

async fn create_contribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CreateParams>,
) -> Result<(StatusCode, Json<CreatedBody>)> {
    let (Some(contributor), Some(month), Some(amount)) = (
        non_empty(params.contributor.as_deref()),
        non_empty(params.month.as_deref()),
        non_empty(params.contribution.as_deref()),
    ) else {
        return Err(Error::validation(
            "Please provide all query_parameters: contributor, month, contribution",
        ));
    };

    let today = state.today();
    let month = validate_month(month, today)?;
    let amount = parse_amount(amount)?;

    let created =
        contribution::create_contribution(&state.database, contributor, month, amount, today)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: format!("Contribution for {contributor} has been saved"),
            contribution: ContributionRecord::new(&created, &contributor.to_lowercase()),
        }),
    ))
}

async fn delete_contribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteParams>,
) -> Result<(StatusCode, Json<MessageBody>)> {
    let unique_id = non_empty(params.unique_id.as_deref())
        .ok_or_else(|| Error::validation("Please provide a unique_id"))?;

    contribution::delete_contribution(&state.database, unique_id).await?;
    Ok(message(
        StatusCode::OK,
        format!("Contribution {unique_id} has been deleted"),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/contributions",
        get(list_contributions)
            .post(create_contribution)
            .delete(delete_contribution),
    )
}
