//! Caller-supplied query criteria.
//!
//! `field` values are checked against a fixed allow-list by the storage-side
//! translator, not here; the criteria itself is an open filter/sort/pagination
//! request.

use serde::Deserialize;

/// Filter/sort/pagination request against a device collection.
///
/// Absent `limit`/`offset` mean "engine default" (unbounded / no offset),
/// not zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCriteria {
    pub filter_by: Option<FilterBy>,
    pub sort_by: Option<SortBy>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Equality filter on a single field. Dotted paths such as `owner.id` are
/// allowed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBy {
    pub field: String,
    pub value: String,
}

/// Sort request on a single field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub field: String,
    pub is_ascending: bool,
}

impl DeviceCriteria {
    /// Criteria filtering on `field = value`, no sort or pagination.
    pub fn filtered(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            filter_by: Some(FilterBy {
                field: field.into(),
                value: value.into(),
            }),
            ..Self::default()
        }
    }

    /// Criteria sorting on `field`, no filter or pagination.
    pub fn sorted(field: impl Into<String>, is_ascending: bool) -> Self {
        Self {
            sort_by: Some(SortBy {
                field: field.into(),
                is_ascending,
            }),
            ..Self::default()
        }
    }
}
