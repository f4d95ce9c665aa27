//! Ordered collection of acquisitions and the cross-source merge.

use std::ops::Add;

use serde::Serialize;

use super::Acquisition;

/// An ordered, request-scoped collection of acquisitions.
///
/// Order is significant: it is the aggregation order that stable sorting
/// falls back to for ties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AcquisitionSet {
    items: Vec<Acquisition>,
}

impl AcquisitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Acquisition> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Acquisition] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Acquisition> {
        self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Acquisition> {
        &mut self.items
    }
}

impl From<Vec<Acquisition>> for AcquisitionSet {
    fn from(items: Vec<Acquisition>) -> Self {
        Self { items }
    }
}

impl FromIterator<Acquisition> for AcquisitionSet {
    fn from_iter<I: IntoIterator<Item = Acquisition>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Acquisition> for AcquisitionSet {
    fn extend<I: IntoIterator<Item = Acquisition>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for AcquisitionSet {
    type Item = Acquisition;
    type IntoIter = std::vec::IntoIter<Acquisition>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a AcquisitionSet {
    type Item = &'a Acquisition;
    type IntoIter = std::slice::Iter<'a, Acquisition>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Add for AcquisitionSet {
    type Output = AcquisitionSet;

    fn add(mut self, rhs: AcquisitionSet) -> AcquisitionSet {
        self.items.extend(rhs.items);
        self
    }
}

/// Concatenate two source listings, `first` then `second`.
///
/// No de-duplication: an item reported by both sources appears twice.
pub fn merge(first: impl Into<AcquisitionSet>, second: impl Into<AcquisitionSet>) -> AcquisitionSet {
    first.into() + second.into()
}
