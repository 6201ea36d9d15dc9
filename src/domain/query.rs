//! Filter and sort descriptors for log queries
//!
//! `LogFilter` is a normalized, composable predicate: every field is
//! independently optional and absent means unconstrained. `LogSort` is the
//! selected column plus direction with the toggle rule. Both are pure data;
//! the store implementations decide how to evaluate them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

use crate::models::LogEntry;

/// Inclusive timestamp window. Both bounds must be present for the window to
/// constrain anything; a half-open range is never sent to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Filter criteria for log queries. An empty filter matches every record.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    pub date_range: Option<DateRange>,
    pub from_address: Option<String>,
    pub file_name: Option<String>,
    pub stage: Option<String>,
    pub status: Option<String>,
}

/// Field-wise partial update for a `LogFilter`. Outer `None` leaves the field
/// untouched; outer `Some` overwrites it (with `Some(None)` clearing it). In
/// JSON, a missing field is "leave alone" and an explicit `null` is "clear" -
/// plain serde would fold both into the outer `None`, so each field carries
/// the `double_option` deserializer.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LogFilterUpdate {
    #[serde(deserialize_with = "double_option")]
    pub date_range: Option<Option<DateRange>>,
    #[serde(deserialize_with = "double_option")]
    pub from_address: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub file_name: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub stage: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub status: Option<Option<String>>,
}

/// Map a present value (including `null`) to the outer `Some`, so only a
/// missing field yields the outer `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl LogFilter {
    /// Strip blank/whitespace-only strings to "absent".
    pub fn normalize(self) -> Self {
        Self {
            date_range: self.date_range,
            from_address: non_blank(self.from_address),
            file_name: non_blank(self.file_name),
            stage: non_blank(self.stage),
            status: non_blank(self.status),
        }
    }

    /// True when no field constrains anything. Gates the "clear filters"
    /// affordance and the empty-state wording.
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none()
            && self.from_address.is_none()
            && self.file_name.is_none()
            && self.stage.is_none()
            && self.status.is_none()
    }

    /// Apply a partial update field-wise, then re-normalize.
    pub fn merged(&self, update: LogFilterUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = update.date_range {
            next.date_range = v;
        }
        if let Some(v) = update.from_address {
            next.from_address = v;
        }
        if let Some(v) = update.file_name {
            next.file_name = v;
        }
        if let Some(v) = update.stage {
            next.stage = v;
        }
        if let Some(v) = update.status {
            next.status = v;
        }
        next.normalize()
    }

    /// Pure conjunction of the present sub-predicates: timestamp within the
    /// inclusive window, substring matches case-insensitive, categorical
    /// matches exact. An entry failing any one present predicate is excluded.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(range) = &self.date_range
            && (entry.timestamp < range.start || entry.timestamp > range.end)
        {
            return false;
        }

        if let Some(needle) = &self.from_address
            && !contains_ignore_case(&entry.from_address, needle)
        {
            return false;
        }

        if let Some(needle) = &self.file_name {
            match &entry.file_name {
                Some(name) if contains_ignore_case(name, needle) => {}
                _ => return false,
            }
        }

        if let Some(stage) = &self.stage
            && entry.stage != *stage
        {
            return false;
        }

        if let Some(status) = &self.status
            && entry.status != *status
        {
            return false;
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Columns exposed for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Timestamp,
    FromAddress,
    FileName,
    Stage,
    Status,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Timestamp => "timestamp",
            SortColumn::FromAddress => "from_address",
            SortColumn::FileName => "file_name",
            SortColumn::Stage => "stage",
            SortColumn::Status => "status",
        }
    }
}

/// Selected sort column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSort {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for LogSort {
    /// Newest first.
    fn default() -> Self {
        Self {
            column: SortColumn::Timestamp,
            ascending: false,
        }
    }
}

impl LogSort {
    /// The toggle rule: re-selecting the current column flips the direction;
    /// selecting a new column always starts descending.
    pub fn toggle(&self, requested: SortColumn) -> Self {
        if requested == self.column {
            Self {
                column: requested,
                ascending: !self.ascending,
            }
        } else {
            Self {
                column: requested,
                ascending: false,
            }
        }
    }

    /// Total order over entries for this sort. String columns compare
    /// case-insensitively; ties fall back to `id` so the order is stable
    /// across identical key values.
    pub fn compare(&self, a: &LogEntry, b: &LogEntry) -> Ordering {
        let key = match self.column {
            SortColumn::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortColumn::FromAddress => cmp_ignore_case(&a.from_address, &b.from_address),
            SortColumn::FileName => {
                let left = a.file_name.as_deref().unwrap_or("");
                let right = b.file_name.as_deref().unwrap_or("");
                cmp_ignore_case(left, right)
            }
            SortColumn::Stage => cmp_ignore_case(&a.stage, &b.stage),
            SortColumn::Status => cmp_ignore_case(&a.status, &b.status),
        };
        let key = if self.ascending { key } else { key.reverse() };
        key.then_with(|| a.id.cmp(&b.id))
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
