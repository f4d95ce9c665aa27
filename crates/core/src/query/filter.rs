use crate::acquisition::{Acquisition, AcquisitionError};

use super::AcquisitionField;

/// Equality filter on one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: AcquisitionField,
    pub value: String,
}

impl FieldFilter {
    /// Build a filter from a raw parameter name, rejecting unknown fields.
    pub fn parse(field: &str, value: impl Into<String>) -> Result<Self, AcquisitionError> {
        Ok(Self {
            field: field.parse()?,
            value: value.into(),
        })
    }

    pub fn matches(&self, acquisition: &Acquisition) -> bool {
        self.field.value(acquisition).matches(&self.value)
    }
}
