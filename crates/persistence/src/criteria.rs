//! Criteria-to-SQL translation.
//!
//! Maps a caller-supplied [`DeviceCriteria`] onto column names and clause
//! fragments against a fixed field allow-list. Pure: no I/O, no engine
//! handles. Column names come exclusively from the allow-list table, so
//! interpolating them into SQL is safe; filter values are always bound.

use domain::errors::DeviceError;
use domain::models::DeviceCriteria;

/// Fixed domain-field to column table. Anything outside it is rejected.
const FIELD_COLUMNS: &[(&str, &str)] = &[
    ("brand", "brand"),
    ("updatedAt", "updated_at"),
    ("owner.id", "owner_id"),
    ("owner.name", "owner_name"),
    ("model", "model"),
    ("color", "color"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Equality predicate on a single column. The value is bound, never
/// interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: String,
}

/// Storage-engine view of a criteria: predicate, order, pagination.
#[derive(Debug, Clone)]
pub struct StorageQuery {
    pub predicate: Option<Predicate>,
    pub order_column: &'static str,
    pub direction: SortDirection,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl StorageQuery {
    /// ` WHERE {col} = ?` when a predicate is present, empty otherwise.
    pub fn where_sql(&self) -> String {
        match &self.predicate {
            Some(p) => format!(" WHERE {} = ?", p.column),
            None => String::new(),
        }
    }

    /// ` AND {col} = ?` for appending to an existing WHERE clause.
    pub fn and_filter_sql(&self) -> String {
        match &self.predicate {
            Some(p) => format!(" AND {} = ?", p.column),
            None => String::new(),
        }
    }

    pub fn order_sql(&self) -> String {
        format!(" ORDER BY {} {}", self.order_column, self.direction.as_sql())
    }

    /// SQLite requires LIMIT before OFFSET; `LIMIT -1` means unbounded.
    pub fn limit_offset_sql(&self) -> String {
        match (self.limit, self.offset) {
            (None, None) => String::new(),
            (Some(limit), None) => format!(" LIMIT {limit}"),
            (Some(limit), Some(offset)) => format!(" LIMIT {limit} OFFSET {offset}"),
            (None, Some(offset)) => format!(" LIMIT -1 OFFSET {offset}"),
        }
    }
}

/// Translates a criteria into a [`StorageQuery`].
///
/// Unknown fields fail with [`DeviceError::UnsupportedField`] naming the
/// field. Absent sort defaults to `updated_at` descending (newest first);
/// absent limit/offset pass through as engine defaults.
pub fn translate(criteria: &DeviceCriteria) -> Result<StorageQuery, DeviceError> {
    let predicate = match &criteria.filter_by {
        Some(filter) => Some(Predicate {
            column: map_field(&filter.field)?,
            value: filter.value.clone(),
        }),
        None => None,
    };

    let (order_column, direction) = match &criteria.sort_by {
        Some(sort) => (
            map_field(&sort.field)?,
            if sort.is_ascending {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        ),
        None => ("updated_at", SortDirection::Descending),
    };

    Ok(StorageQuery {
        predicate,
        order_column,
        direction,
        limit: criteria.limit,
        offset: criteria.offset,
    })
}

fn map_field(field: &str) -> Result<&'static str, DeviceError> {
    FIELD_COLUMNS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, column)| *column)
        .ok_or_else(|| DeviceError::UnsupportedField {
            field: field.to_string(),
        })
}
