use serde::{Deserialize, Serialize};

/// Direction of a single-column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire token sent to the backend (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// The opposite direction, for sort-toggle affordances.
    pub fn reversed(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&SortDirection::Desc).unwrap();
        assert_eq!(json, r#""desc""#);

        let back: SortDirection = serde_json::from_str(r#""asc""#).unwrap();
        assert_eq!(back, SortDirection::Asc);
    }

    #[test]
    fn reversed_flips_direction() {
        assert_eq!(SortDirection::Asc.reversed(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
    }
}
