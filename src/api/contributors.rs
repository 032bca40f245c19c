//! `/contributors` - list, register and remove contributors.

use crate::{
    api::{
        AppState,
        response::{MessageBody, message},
    },
    core::{contributor, non_empty},
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
pub struct ContributorParams {
    pub contributor: Option<String>,
}

impl ContributorParams {
    fn require_contributor(&self) -> Result<&str> {
        non_empty(self.contributor.as_deref())
            .ok_or_else(|| Error::validation("Please provide a contributor"))
    }
}

#[derive(Debug, Serialize)]
pub struct ContributorsBody {
    pub contributors: Vec<String>,
}

async fn list_contributors(State(state): State<Arc<AppState>>) -> Result<Json<ContributorsBody>> {
    let contributors = contributor::list_contributor_names(&state.database).await?;
    Ok(Json(ContributorsBody { contributors }))
}

async fn create_contributor(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContributorParams>,
) -> Result<(StatusCode, Json<MessageBody>)> {
    let name = params.require_contributor()?;

    let outcome = contributor::upsert_contributor(&state.database, name).await?;
    if outcome.was_created() {
        Ok(message(
            StatusCode::CREATED,
            format!("Contributor {name} has been created"),
        ))
    } else {
        Ok(message(
            StatusCode::OK,
            format!("Contributor {name} already exists"),
        ))
    }
}

async fn delete_contributor(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContributorParams>,
) -> Result<(StatusCode, Json<MessageBody>)> {
    let name = params.require_contributor()?;

    contributor::delete_contributor(&state.database, name).await?;
    Ok(message(
        StatusCode::OK,
        format!("Contributor {name} has been deleted"),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/contributors",
        get(list_contributors)
            .post(create_contributor)
            .delete(delete_contributor),
    )
}
