//! Field registry for the acquisition schema.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::acquisition::{Acquisition, AcquisitionError};

/// A queryable field of [`Acquisition`].
///
/// `files` is not queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquisitionField {
    Id,
    State,
    Name,
    Progress,
}

impl AcquisitionField {
    /// Every field eligible for filtering and ordering.
    pub const ALL: [AcquisitionField; 4] = [
        AcquisitionField::Id,
        AcquisitionField::State,
        AcquisitionField::Name,
        AcquisitionField::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AcquisitionField::Id => "id",
            AcquisitionField::State => "state",
            AcquisitionField::Name => "name",
            AcquisitionField::Progress => "progress",
        }
    }

    /// Read this field from an acquisition.
    pub fn value<'a>(&self, acquisition: &'a Acquisition) -> FieldValue<'a> {
        match self {
            AcquisitionField::Id => FieldValue::Text(&acquisition.id),
            AcquisitionField::State => FieldValue::Text(acquisition.state.as_str()),
            AcquisitionField::Name => FieldValue::Text(&acquisition.name),
            AcquisitionField::Progress => FieldValue::Number(acquisition.progress),
        }
    }
}

impl FromStr for AcquisitionField {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AcquisitionField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| AcquisitionError::InvalidFilterField(s.to_string()))
    }
}

impl fmt::Display for AcquisitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Equality against a raw query-string value.
    ///
    /// Numbers are compared after parsing `raw`; a value that does not parse
    /// never matches.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            FieldValue::Text(text) => *text == raw,
            FieldValue::Number(number) => raw
                .trim()
                .parse::<f64>()
                .map(|parsed| parsed == *number)
                .unwrap_or(false),
        }
    }

    /// Total order between two values of the same field.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            // A field always yields the same variant.
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        }
    }
}
