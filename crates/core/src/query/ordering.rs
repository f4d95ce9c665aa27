use std::cmp::Ordering;

use crate::acquisition::{Acquisition, AcquisitionError};

use super::AcquisitionField;

/// A single sort key, `field` or `-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub field: AcquisitionField,
    pub descending: bool,
}

impl OrderKey {
    pub fn ascending(field: AcquisitionField) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn descending(field: AcquisitionField) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    /// Parse one key; a leading `-` means descending.
    pub fn parse(raw: &str) -> Result<Self, AcquisitionError> {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(name) => Ok(Self::descending(name.parse()?)),
            None => Ok(Self::ascending(raw.parse()?)),
        }
    }

    fn compare(&self, a: &Acquisition, b: &Acquisition) -> Ordering {
        let ordering = self.field.value(a).compare(&self.field.value(b));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Sort specification applied after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    keys: Vec<OrderKey>,
}

impl Default for OrderBy {
    /// Ascending by name.
    fn default() -> Self {
        Self {
            keys: vec![OrderKey::ascending(AcquisitionField::Name)],
        }
    }
}

impl OrderBy {
    pub fn new(keys: Vec<OrderKey>) -> Self {
        if keys.is_empty() {
            Self::default()
        } else {
            Self { keys }
        }
    }

    /// Parse a comma-separated list such as `state,-progress`.
    ///
    /// Blank input yields the default ordering.
    pub fn parse(raw: &str) -> Result<Self, AcquisitionError> {
        let keys = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(OrderKey::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    pub fn keys(&self) -> &[OrderKey] {
        &self.keys
    }

    /// Stable sort; records equal on every key keep their relative order.
    pub fn sort(&self, items: &mut [Acquisition]) {
        items.sort_by(|a, b| {
            self.keys
                .iter()
                .map(|key| key.compare(a, b))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Acquisition]) -> Vec<&str> {
        items.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(
            OrderKey::parse("-progress").unwrap(),
            OrderKey::descending(AcquisitionField::Progress)
        );
        assert_eq!(
            OrderKey::parse(" name ").unwrap(),
            OrderKey::ascending(AcquisitionField::Name)
        );
        assert!(matches!(
            OrderKey::parse("-files"),
            Err(AcquisitionError::InvalidFilterField(f)) if f == "files"
        ));
    }

    #[test]
    fn test_blank_is_default() {
        assert_eq!(OrderBy::parse("").unwrap(), OrderBy::default());
        assert_eq!(OrderBy::parse(" , ").unwrap(), OrderBy::default());
    }

    #[test]
    fn test_default_sort_is_stable_by_name() {
        let mut items = vec![
            Acquisition::downloading("t1", "b", 0.1, vec![]),
            Acquisition::downloading("t2", "a", 0.2, vec![]),
            Acquisition::completed("f1", "b", vec![]),
            Acquisition::completed("f2", "a", vec![]),
        ];
        OrderBy::default().sort(&mut items);
        assert_eq!(ids(&items), vec!["t2", "f2", "t1", "f1"]);
    }

    #[test]
    fn test_descending_keeps_tie_order() {
        let mut items = vec![
            Acquisition::downloading("t1", "x", 0.5, vec![]),
            Acquisition::completed("f1", "y", vec![]),
            Acquisition::downloading("t2", "z", 0.5, vec![]),
        ];
        OrderBy::parse("-progress").unwrap().sort(&mut items);
        assert_eq!(ids(&items), vec!["f1", "t1", "t2"]);
    }

    #[test]
    fn test_multiple_keys() {
        let mut items = vec![
            Acquisition::completed("f1", "b", vec![]),
            Acquisition::downloading("t1", "c", 0.5, vec![]),
            Acquisition::completed("f2", "a", vec![]),
            Acquisition::downloading("t2", "a", 0.5, vec![]),
        ];
        OrderBy::parse("-state,name").unwrap().sort(&mut items);
        assert_eq!(ids(&items), vec!["t2", "t1", "f2", "f1"]);
    }
}
