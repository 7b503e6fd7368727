use crate::{FieldName, Filter, OrderBy, RelationName, SearchKey};

/// Page size used when the caller does not configure one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Average-aggregate inclusion directive (`withAvgs` on the wire).
///
/// Opaque to the query core; the backend resolves relation and field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationAvg {
    pub relation: RelationName,
    pub field: String,
}

impl RelationAvg {
    pub fn new(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            field: field.into(),
        }
    }
}

/// Client-held pagination/filter/sort/search state for one collection resource.
///
/// Mutated in place through controller setters for the lifetime of the owning
/// view and discarded with it. The type itself carries no invariants beyond
/// its field ranges; page-reset rules live in the controller.
#[derive(Debug, Clone)]
pub struct QueryState<F: FieldName> {
    /// Page size, always > 0.
    pub limit: u32,
    /// Current page, 1-indexed.
    pub page: u32,
    /// Single-column sort, if any.
    pub order_by: Option<OrderBy<F>>,
    /// Field filters, at most one per field.
    pub filters: Vec<Filter<F>>,
    /// Free-text search over one column.
    pub search: Option<SearchKey<F>>,
    /// Relations to eager-include.
    pub with: Vec<RelationName>,
    /// Relation-count inclusion directives.
    pub with_count: Vec<RelationName>,
    /// Relation-average inclusion directives.
    pub with_avgs: Vec<RelationAvg>,
}

/// Initial configuration for a query, kept around so `reset` and the
/// default-sort restore can return to it.
#[derive(Debug, Clone)]
pub struct QueryDefaults<F: FieldName> {
    limit: u32,
    order_by: Option<OrderBy<F>>,
    search: Option<SearchKey<F>>,
    with: Vec<RelationName>,
    with_count: Vec<RelationName>,
    with_avgs: Vec<RelationAvg>,
}

impl<F: FieldName> QueryDefaults<F> {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            order_by: None,
            search: None,
            with: Vec::new(),
            with_count: Vec::new(),
            with_avgs: Vec::new(),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.limit = limit;
        }
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy<F>) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn with_search(mut self, search: SearchKey<F>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.with.push(relation.into());
        self
    }

    pub fn with_count(mut self, relation: impl Into<String>) -> Self {
        self.with_count.push(relation.into());
        self
    }

    pub fn with_avg(mut self, relation: impl Into<String>, field: impl Into<String>) -> Self {
        self.with_avgs.push(RelationAvg::new(relation, field));
        self
    }

    /// The sort configured at initialization time, restored when the caller
    /// clears an explicit sort.
    pub fn default_order_by(&self) -> Option<OrderBy<F>> {
        self.order_by
    }

    /// Build the initial [`QueryState`] seeded from these defaults.
    pub fn initial_state(&self) -> QueryState<F> {
        QueryState {
            limit: self.limit,
            page: 1,
            order_by: self.order_by,
            filters: Vec::new(),
            search: self.search.clone(),
            with: self.with.clone(),
            with_count: self.with_count.clone(),
            with_avgs: self.with_avgs.clone(),
        }
    }
}

impl<F: FieldName> Default for QueryDefaults<F> {
    fn default() -> Self {
        Self::new()
    }
}
