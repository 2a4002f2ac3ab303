use std::cmp::Ordering;

use super::model::{Field, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The single active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self { field: Field::Day, direction: SortDirection::Ascending }
    }
}

impl SortSpec {
    pub fn new(field: Field, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click semantics: the active column flips direction, any other
    /// column becomes active in ascending order.
    pub fn toggle(self, field: Field) -> Self {
        if self.field == field && self.direction == SortDirection::Ascending {
            Self::new(field, SortDirection::Descending)
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }
}

/// Return the records ordered by `spec`.
///
/// `sort_by` is a stable merge sort and the descending comparator only
/// reverses the field ordering, so tied records keep their input order in
/// both directions.
pub fn sort_records<'a>(records: &'a [Record], spec: SortSpec) -> Vec<&'a Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| spec.direction.apply(a.cmp_by(b, spec.field)));
    sorted
}
