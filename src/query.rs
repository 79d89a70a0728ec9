//! Filter and sort engine
//!
//! Stable filtering and ordering over in-memory collections. Ties always keep
//! their original relative order, in both directions.

use crate::error::AppError;
use std::cmp::Ordering;

/// Sort direction requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Low to high
    #[default]
    Asc,
    /// High to low
    Desc,
}

impl SortOrder {
    /// Accepted query tokens
    pub const VALID: [&'static str; 2] = ["asc", "desc"];

    /// Parse the `order` query parameter
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// Parse the `order` query parameter, rejecting unknown tokens as a bad request
    pub fn from_query(token: &str) -> Result<Self, AppError> {
        Self::parse(token).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid order, select from {:?}", Self::VALID))
        })
    }
}

/// Comparable value extracted from a record for ordering
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Numeric field, or a letter grade mapped to its weight
    Number(f64),
    /// Text field, compared lexicographically
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Numbers before text when a field mixes both
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Records that can be ordered by a named field
pub trait Sortable {
    /// Field names accepted by [`Sortable::sort_key`]
    const SORT_FIELDS: &'static [&'static str];

    /// Key for `field`, or `None` when the field is not sortable
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

/// Keep the records matching `predicate`, preserving their order
pub fn filter<T, P>(records: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(*r)).cloned().collect()
}

/// Stable sort by the key returned from `key_fn`
pub fn sort_by<T, K>(records: &[T], key_fn: K, order: SortOrder) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> SortKey,
{
    let mut keyed: Vec<(SortKey, &T)> = records.iter().map(|r| (key_fn(r), r)).collect();
    // `sort_by` is stable; flipping the comparison keeps ties in input order
    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => a.compare(b),
        SortOrder::Desc => b.compare(a),
    });
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Stable sort of [`Sortable`] records by a client-supplied field name
///
/// Unknown fields are a bad request whose message lists the valid ones.
pub fn sort_by_field<T>(records: &[T], field: &str, order: SortOrder) -> Result<Vec<T>, AppError>
where
    T: Sortable + Clone,
{
    check_sort_field::<T>(field)?;
    Ok(sort_by(
        records,
        |r| r.sort_key(field).unwrap_or(SortKey::Number(0.0)),
        order,
    ))
}

/// Reject a field name that `T` cannot be sorted by
pub fn check_sort_field<T: Sortable>(field: &str) -> Result<(), AppError> {
    if T::SORT_FIELDS.contains(&field) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid field, select from {:?}",
            T::SORT_FIELDS
        )))
    }
}
