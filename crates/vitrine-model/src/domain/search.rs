use crate::FieldName;

/// Free-text filter over a single column, independent from [`crate::Filter`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKey<F: FieldName> {
    pub field: F,
    pub value: String,
}

impl<F: FieldName> SearchKey<F> {
    pub fn new(field: F, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// A blank search term means "no search"; the controller clears the
    /// search slot rather than sending an empty-string match.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}
