//! Aggregation of filtered records into per-group totals.
//!
//! Groups keep the order in which they first appear in the input, and each
//! group's share is `round(group_sum * 100 / total, 2)`. Callers are expected
//! to skip aggregation when there is nothing to aggregate; a zero total is
//! reported as [`Error::ZeroTotal`].

use crate::core::contribution::ContributionRecord;
use crate::core::expense::ExpenseRecord;
use crate::errors::{Error, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One contributor's slice of the contributions total.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ContributorShare {
    pub amount: i64,
    pub percentage: f64,
}

/// One item's slice of the expenses total.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ItemShare {
    pub grand_total: i64,
    pub percentage: f64,
}

/// Named groups in first-appearance order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Breakdown<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Breakdown<T> {
    /// Looks up a group by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Group names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(name, share)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for Breakdown<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Groups contributions by contributor display name.
pub fn aggregate_by_contributor(
    records: &[ContributionRecord],
    total: i64,
) -> Result<Breakdown<ContributorShare>> {
    let sums = group_sums(
        records
            .iter()
            .map(|r| (r.contributor_name.as_str(), r.contribution_amount)),
    )?;
    shares(sums, total, |amount, percentage| ContributorShare { amount, percentage })
}

/// Groups expenses by item name, summing each expense's `total_price`.
pub fn aggregate_by_item(records: &[ExpenseRecord], total: i64) -> Result<Breakdown<ItemShare>> {
    let sums = group_sums(records.iter().map(|r| (r.item_name.as_str(), r.total_price)))?;
    shares(sums, total, |grand_total, percentage| ItemShare {
        grand_total,
        percentage,
    })
}

/// Rounds `part * 100 / total` to two decimal places.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Budget amounts are far below 2^52
pub fn percentage_of(part: i64, total: i64) -> f64 {
    let raw = (part as f64 * 100.0) / total as f64;
    (raw * 100.0).round() / 100.0
}

/// Sums `amounts`, failing with [`Error::TotalOverflow`] instead of wrapping.
pub fn checked_total(amounts: impl IntoIterator<Item = i64>) -> Result<i64> {
    amounts
        .into_iter()
        .try_fold(0_i64, i64::checked_add)
        .ok_or(Error::TotalOverflow)
}

fn group_sums<'a>(pairs: impl Iterator<Item = (&'a str, i64)>) -> Result<Vec<(String, i64)>> {
    let mut sums: Vec<(String, i64)> = Vec::new();
    for (name, amount) in pairs {
        match sums.iter_mut().find(|(key, _)| key == name) {
            Some((_, sum)) => *sum = sum.checked_add(amount).ok_or(Error::TotalOverflow)?,
            None => sums.push((name.to_string(), amount)),
        }
    }
    Ok(sums)
}

fn shares<T>(
    sums: Vec<(String, i64)>,
    total: i64,
    build: impl Fn(i64, f64) -> T,
) -> Result<Breakdown<T>> {
    if total == 0 {
        return Err(Error::ZeroTotal);
    }

    let entries = sums
        .into_iter()
        .map(|(name, sum)| {
            let share = build(sum, percentage_of(sum, total));
            (name, share)
        })
        .collect();

    Ok(Breakdown { entries })
}
