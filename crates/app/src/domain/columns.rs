//! Column conversions shared by the Postgres repositories.

use std::{num::TryFromIntError, str::FromStr};

use sqlx::{Row, postgres::PgRow};
use thiserror::Error;

/// A text column held a value with no matching enum variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Read a non-negative `BIGINT` money column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a non-negative `INTEGER` count column.
pub(crate) fn try_get_count(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let count_i32: i32 = row.try_get(col)?;

    u32::try_from(count_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Read a non-negative `BIGINT` aggregate such as `COUNT(*)`.
pub(crate) fn try_get_total(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    try_get_amount(row, col)
}

/// Read a `TEXT` column into a type parsed with [`FromStr`].
pub(crate) fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Largest count an `INTEGER` column can hold.
pub const MAX_DB_COUNT: u32 = i32::MAX.unsigned_abs();

/// A value too large for the parameter it was bound to.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{col} is out of range for its column")]
pub struct OutOfRange {
    pub col: String,

    #[source]
    pub source: TryFromIntError,
}

/// Convert a money amount for binding to a `BIGINT` parameter.
pub(crate) fn to_db_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|source| out_of_range(col, source))
}

/// Convert a count for binding to an `INTEGER` parameter.
pub(crate) fn to_db_count(count: u32, col: &str) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|source| out_of_range(col, source))
}

fn out_of_range(col: &str, source: TryFromIntError) -> sqlx::Error {
    sqlx::Error::Encode(Box::new(OutOfRange {
        col: col.to_string(),
        source,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_count_fits_an_integer_column() {
        assert_eq!(to_db_count(MAX_DB_COUNT, "quantity").ok(), Some(i32::MAX));
    }

    #[test]
    fn oversized_binds_are_encode_errors() {
        let count = to_db_count(MAX_DB_COUNT + 1, "quantity");
        let amount = to_db_amount(u64::MAX, "total");

        assert!(
            matches!(count, Err(sqlx::Error::Encode(_))),
            "expected Encode, got {count:?}"
        );
        assert!(
            matches!(amount, Err(sqlx::Error::Encode(_))),
            "expected Encode, got {amount:?}"
        );
    }
}
