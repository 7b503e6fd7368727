use serde::{Deserialize, Serialize};

/// Server pagination envelope: one page of records plus page-position
/// metadata. Produced fresh per round trip and never mutated, only replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    /// 1-based index of the first record on this page; null when empty.
    #[serde(default)]
    pub from: Option<u32>,
    pub last_page: u32,
    pub per_page: u32,
    /// 1-based index of the last record on this page; null when empty.
    #[serde(default)]
    pub to: Option<u32>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            from: self.from,
            to: self.to,
            total: self.total,
        }
    }

    pub fn summary(&self) -> PageSummary {
        self.meta().summary()
    }
}

/// Page-position metadata retained between round trips, after the records
/// themselves have been handed to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub total: u64,
}

impl PageMeta {
    /// Whether a later page exists per the latest server response.
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Whether an earlier page exists per the latest server response.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary {
            from: self.from,
            to: self.to,
            total: self.total,
        }
    }
}

/// The "showing X to Y of Z" read-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_deserializes_backend_shape() {
        let json = r#"{
            "current_page": 2,
            "data": ["a", "b"],
            "from": 11,
            "last_page": 5,
            "per_page": 10,
            "to": 12,
            "total": 42
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.data, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(page.total, 42);
    }

    #[test]
    fn empty_page_has_null_bounds() {
        let json = r#"{
            "current_page": 1,
            "data": [],
            "from": null,
            "last_page": 1,
            "per_page": 10,
            "to": null,
            "total": 0
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert!(page.from.is_none());
        assert!(page.to.is_none());

        let meta = page.meta();
        assert!(!meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn navigation_bounds() {
        let mid = PageMeta {
            current_page: 2,
            last_page: 3,
            per_page: 10,
            from: Some(11),
            to: Some(20),
            total: 25,
        };
        assert!(mid.has_next());
        assert!(mid.has_previous());

        let last = PageMeta {
            current_page: 3,
            ..mid
        };
        assert!(!last.has_next());
        assert!(last.has_previous());

        let first = PageMeta {
            current_page: 1,
            ..mid
        };
        assert!(first.has_next());
        assert!(!first.has_previous());
    }
}
