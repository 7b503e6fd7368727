use serde::{Deserialize, Serialize};

use crate::FieldName;

/// Comparison operator applied by a field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl FilterOperator {
    /// Wire symbol understood by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Gt => ">",
            FilterOperator::Lt => "<",
            FilterOperator::Ge => ">=",
            FilterOperator::Le => "<=",
        }
    }
}

/// Value a filter compares against. The backend accepts strings and numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Str(String),
    Int(i64),
}

impl FilterValue {
    /// An empty string carries no constraint; setting it removes the filter
    /// instead of sending a degenerate `field=` pair.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Str(s) => s.is_empty(),
            FilterValue::Int(_) => false,
        }
    }

    /// Render the value the way it appears in a query string.
    pub fn render(&self) -> String {
        match self {
            FilterValue::Str(s) => s.clone(),
            FilterValue::Int(n) => n.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Str(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Str(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Int(n)
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        FilterValue::Int(n as i64)
    }
}

/// A single field constraint. A query holds at most one filter per field;
/// replacement happens at the controller level, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F: FieldName> {
    pub field: F,
    pub op: FilterOperator,
    pub value: FilterValue,
}

impl<F: FieldName> Filter<F> {
    /// Equality filter, the common case.
    pub fn new(field: F, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            op: FilterOperator::Eq,
            value: value.into(),
        }
    }

    /// Filter with an explicit comparison operator.
    pub fn with_operator(field: F, op: FilterOperator, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_value_is_empty() {
        assert!(FilterValue::from("").is_empty());
        assert!(!FilterValue::from("a").is_empty());
        assert!(!FilterValue::from(0i64).is_empty());
    }

    #[test]
    fn operator_wire_symbols() {
        assert_eq!(FilterOperator::Eq.as_str(), "=");
        assert_eq!(FilterOperator::Ne.as_str(), "!=");
        assert_eq!(FilterOperator::Ge.as_str(), ">=");
    }

    #[test]
    fn render_int_value() {
        assert_eq!(FilterValue::from(42i64).render(), "42");
    }
}
