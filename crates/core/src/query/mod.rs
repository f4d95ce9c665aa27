//! Schema-driven filtering and ordering over merged acquisitions.
//!
//! Field names are resolved through [`AcquisitionField`], so only the
//! declared schema (`id`, `state`, `name`, `progress`) can be queried.
//! Unknown names are rejected instead of silently ignored.

mod filter;
mod ordering;
mod schema;

pub use filter::FieldFilter;
pub use ordering::{OrderBy, OrderKey};
pub use schema::{AcquisitionField, FieldValue};

use crate::acquisition::{AcquisitionError, AcquisitionSet};

/// Query parameter carrying the ordering specification.
pub const ORDERING_PARAM: &str = "ordering";

/// Filters plus ordering, applied in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcquisitionQuery {
    filters: Vec<FieldFilter>,
    order_by: OrderBy,
}

impl AcquisitionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw `(name, value)` parameters.
    ///
    /// `ordering` selects the sort; every other name must be a schema field.
    /// Pagination parameters must be stripped by the caller beforehand.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, AcquisitionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::new();
        for (name, value) in params {
            let name = name.as_ref();
            if name == ORDERING_PARAM {
                query.order_by = OrderBy::parse(&value.into())?;
            } else {
                query.filters.push(FieldFilter::parse(name, value)?);
            }
        }
        Ok(query)
    }

    /// Add an equality filter.
    pub fn with_filter(
        mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<Self, AcquisitionError> {
        self.filters.push(FieldFilter::parse(field, value)?);
        Ok(self)
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    pub fn order_by(&self) -> &OrderBy {
        &self.order_by
    }

    /// Filter, then stable-sort.
    pub fn apply(&self, mut set: AcquisitionSet) -> AcquisitionSet {
        let items = set.items_mut();
        items.retain(|acquisition| self.filters.iter().all(|f| f.matches(acquisition)));
        self.order_by.sort(items);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::{merge, Acquisition, AcquisitionState};

    fn sample() -> AcquisitionSet {
        merge(
            vec![Acquisition::downloading("7", "Movie", 0.4, vec![])],
            vec![Acquisition::completed("Album", "Album", vec![])],
        )
    }

    #[test]
    fn test_filter_by_state() {
        let query = AcquisitionQuery::from_params([("state", "downloading")]).unwrap();
        let result = query.apply(sample());
        assert_eq!(result.len(), 1);
        assert_eq!(result.as_slice()[0].state, AcquisitionState::Downloading);
        assert_eq!(result.as_slice()[0].id, "7");
    }

    #[test]
    fn test_unknown_filter_field_is_rejected() {
        let result = AcquisitionQuery::from_params([("colour", "red")]);
        assert!(matches!(result, Err(AcquisitionError::InvalidFilterField(f)) if f == "colour"));
    }

    #[test]
    fn test_files_is_not_filterable() {
        let result = AcquisitionQuery::from_params([("files", "a.mkv")]);
        assert!(matches!(result, Err(AcquisitionError::InvalidFilterField(_))));
    }

    #[test]
    fn test_default_ordering_by_name() {
        let result = AcquisitionQuery::new().apply(sample());
        let names: Vec<_> = result.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Album", "Movie"]);
    }

    #[test]
    fn test_filters_combine_and_apply_before_ordering() {
        let set = merge(
            vec![
                Acquisition::downloading("1", "b", 0.5, vec![]),
                Acquisition::downloading("2", "a", 0.5, vec![]),
                Acquisition::downloading("3", "c", 0.1, vec![]),
            ],
            vec![Acquisition::completed("z", "z", vec![])],
        );
        let query = AcquisitionQuery::from_params([
            ("state", "downloading"),
            ("progress", "0.5"),
            ("ordering", "-name"),
        ])
        .unwrap();
        let ids: Vec<_> = query.apply(set).iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_invalid_ordering_field_is_rejected() {
        let result = AcquisitionQuery::from_params([("ordering", "size")]);
        assert!(matches!(result, Err(AcquisitionError::InvalidFilterField(_))));
    }

    #[test]
    fn test_builder() {
        let query = AcquisitionQuery::new()
            .with_filter("id", "Album")
            .unwrap()
            .with_order_by(OrderBy::parse("-progress").unwrap());
        assert_eq!(query.filters().len(), 1);
        assert_eq!(
            query.order_by().keys(),
            &[OrderKey::descending(AcquisitionField::Progress)]
        );
        assert_eq!(query.apply(sample()).len(), 1);
    }
}
