use crate::{FieldName, SortDirection};

/// Single-column sort applied to a collection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F: FieldName> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: FieldName> OrderBy<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}
