//! Core business logic - framework-agnostic validation, filtering, aggregation
//! and record operations.
//!
//! Nothing in here knows about HTTP. Handlers in `api` compose these functions
//! and translate their errors into responses.

/// Per-group totals and percentage shares
pub mod aggregate;
/// Budget status summary for a single month
pub mod budget;
/// Injectable source of "today"
pub mod clock;
/// Contribution records: list, create, delete
pub mod contribution;
/// Contributor records: list, upsert, delete
pub mod contributor;
/// Expense records: list, create, delete
pub mod expense;
/// Query builders turning optional filters into `SeaORM` conditions
pub mod filters;
/// Parameter validators for months, years, dates and year-months
pub mod validation;

/// Capitalizes each whitespace-separated word of a stored (lowercase) name.
///
/// `"alice"` becomes `"Alice"`, `"mary jane"` becomes `"Mary Jane"`.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a record's public `unique_id`.
pub fn parse_unique_id(value: &str) -> crate::errors::Result<uuid::Uuid> {
    uuid::Uuid::parse_str(value.trim()).map_err(|_| crate::errors::Error::InvalidUniqueId {
        value: value.to_string(),
    })
}

/// Treats empty and whitespace-only query values as absent.
#[must_use]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
