//! Caller identity.
//!
//! Authentication is out of scope: whoever sits in front of this service
//! passes the caller's name in the `x-added-by` header. When it is absent the
//! configured default identity is used instead.

use crate::{
    api::AppState,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use std::sync::Arc;

/// Header carrying the caller's name.
pub const ADDED_BY_HEADER: &str = "x-added-by";

/// The identity attached to a request, if any could be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub Option<String>);

impl CallerIdentity {
    /// Returns the caller's name or [`Error::MissingIdentity`].
    pub fn require(self) -> Result<String> {
        self.0.ok_or(Error::MissingIdentity)
    }
}

impl FromRequestParts<Arc<AppState>> for CallerIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let from_header = parts
            .headers
            .get(ADDED_BY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string);

        Ok(Self(from_header.or_else(|| state.default_added_by.clone())))
    }
}
