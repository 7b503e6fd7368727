use vitrine_model::{
    FieldName, Filter, FilterOperator, FilterValue, OrderBy, PageMeta, PageSummary, QueryDefaults,
    QueryState, SearchKey,
};

use crate::params::{ParamValue, Params};

/// Owns one resource's query state and derives navigation affordances from
/// the latest server-reported page position.
///
/// All mutators are synchronous and infallible: they only touch local state,
/// so a caller can never observe a failed setter regardless of network
/// conditions. Whenever search, sort, filters or page size change, `page`
/// snaps back to 1 — changing the result set shape invalidates any position
/// inside it.
#[derive(Debug, Clone)]
pub struct QueryController<F: FieldName> {
    defaults: QueryDefaults<F>,
    state: QueryState<F>,
    meta: Option<PageMeta>,
    generation: u64,
}

impl<F: FieldName> QueryController<F> {
    pub fn new(defaults: QueryDefaults<F>) -> Self {
        let state = defaults.initial_state();
        Self {
            defaults,
            state,
            meta: None,
            generation: 0,
        }
    }

    /// Monotonic mutation counter. The fetch driver compares generations to
    /// decide whether a settled state has already been requested.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &QueryState<F> {
        &self.state
    }

    pub fn page_meta(&self) -> Option<PageMeta> {
        self.meta
    }

    pub fn summary(&self) -> Option<PageSummary> {
        self.meta.map(|m| m.summary())
    }

    pub fn next_page_available(&self) -> bool {
        self.meta.is_some_and(|m| m.has_next())
    }

    pub fn previous_page_available(&self) -> bool {
        self.meta.is_some_and(|m| m.has_previous())
    }

    /// Record the page position reported by the latest server response.
    pub fn apply_meta(&mut self, meta: PageMeta) {
        self.meta = Some(meta);
    }

    /// Replace the free-text search. `None` or a blank term clears it.
    pub fn set_search_key(&mut self, search: Option<SearchKey<F>>) {
        self.state.search = search.filter(|s| !s.is_blank());
        self.reset_page();
        self.touch();
    }

    /// Replace the sort column. `None` restores the sort configured at
    /// initialization time when one exists, otherwise clears the sort.
    pub fn set_order_by(&mut self, order_by: Option<OrderBy<F>>) {
        self.state.order_by = order_by.or_else(|| self.defaults.default_order_by());
        self.reset_page();
        self.touch();
    }

    /// Replace the filter for one field, keeping filters field-unique.
    ///
    /// `None` clears every filter. An empty value removes the field's entry
    /// without appending a replacement.
    pub fn set_filter(&mut self, filter: Option<Filter<F>>) {
        match filter {
            None => self.state.filters.clear(),
            Some(filter) => {
                self.state
                    .filters
                    .retain(|existing| existing.field != filter.field);
                if !filter.value.is_empty() {
                    self.state.filters.push(filter);
                }
            }
        }
        self.reset_page();
        self.touch();
    }

    /// Update the page size. `None` and 0 are ignored.
    pub fn set_limit(&mut self, limit: Option<u32>) {
        let Some(limit) = limit.filter(|l| *l > 0) else {
            return;
        };
        self.state.limit = limit;
        self.reset_page();
        self.touch();
    }

    /// Jump to an absolute page. Pages are 1-indexed; 0 is ignored.
    pub fn set_page(&mut self, page: u32) {
        if page >= 1 {
            self.state.page = page;
            self.touch();
        }
    }

    /// Advance one page. No-op when the latest response says this is the
    /// last page (or no response has arrived yet). Returns whether it moved.
    pub fn next_page(&mut self) -> bool {
        if !self.next_page_available() {
            return false;
        }
        self.state.page += 1;
        self.touch();
        true
    }

    /// Go back one page. No-op on page 1. Returns whether it moved.
    pub fn previous_page(&mut self) -> bool {
        if !self.previous_page_available() {
            return false;
        }
        self.state.page -= 1;
        self.touch();
        true
    }

    /// Restore the state configured at initialization time.
    pub fn reset(&mut self) {
        self.state = self.defaults.initial_state();
        self.touch();
    }

    /// Map the current state to the serializer's parameter shape.
    ///
    /// `orderBy` and `search` become one-entry maps keyed by field name.
    /// Filters collapse to a map keyed by field, which is lossless because
    /// the setters keep filters field-unique. Equality filters serialize
    /// bare (`filters[f]=v`); other operators nest under their wire symbol
    /// (`filters[f][>=]=v`).
    pub fn to_params(&self) -> Params {
        let state = &self.state;
        let mut params = Params::new();
        params.insert("limit", state.limit);
        params.insert("page", state.page);

        if let Some(order) = &state.order_by {
            params.insert(
                "orderBy",
                Params::new().with(order.field.as_str(), order.direction.as_str()),
            );
        }

        if !state.filters.is_empty() {
            let mut filters = Params::new();
            for filter in &state.filters {
                match filter.op {
                    FilterOperator::Eq => {
                        filters.insert(filter.field.as_str(), value_param(&filter.value))
                    }
                    op => filters.insert(
                        filter.field.as_str(),
                        Params::new().with(op.as_str(), value_param(&filter.value)),
                    ),
                }
            }
            params.insert("filters", filters);
        }

        if let Some(search) = &state.search {
            params.insert(
                "search",
                Params::new().with(search.field.as_str(), search.value.clone()),
            );
        }

        if !state.with.is_empty() {
            params.insert("with", relation_list(&state.with));
        }
        if !state.with_count.is_empty() {
            params.insert("withCount", relation_list(&state.with_count));
        }
        if !state.with_avgs.is_empty() {
            let avgs = state
                .with_avgs
                .iter()
                .map(|avg| {
                    ParamValue::Map(
                        Params::new()
                            .with("relation", avg.relation.clone())
                            .with("field", avg.field.clone()),
                    )
                })
                .collect::<Vec<_>>();
            params.insert("withAvgs", avgs);
        }

        params
    }

    fn reset_page(&mut self) {
        self.state.page = 1;
    }

    fn touch(&mut self) {
        self.generation += 1;
    }
}

fn value_param(value: &FilterValue) -> ParamValue {
    match value {
        FilterValue::Str(s) => ParamValue::Str(s.clone()),
        FilterValue::Int(n) => ParamValue::Int(*n),
    }
}

fn relation_list(relations: &[String]) -> ParamValue {
    ParamValue::List(
        relations
            .iter()
            .map(|r| ParamValue::Str(r.clone()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_model::{Product, ProductField, Resource};

    fn meta(current_page: u32, last_page: u32) -> PageMeta {
        PageMeta {
            current_page,
            last_page,
            per_page: 10,
            from: Some(1),
            to: Some(10),
            total: u64::from(last_page) * 10,
        }
    }

    fn controller() -> QueryController<ProductField> {
        QueryController::new(QueryDefaults::new())
    }

    #[test]
    fn resource_binds_products_path() {
        assert_eq!(Product::PATH, "products");
    }

    #[test]
    fn search_resets_page() {
        let mut ctl = controller();
        ctl.set_page(4);
        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "desk")));
        assert_eq!(ctl.state().page, 1);
    }

    #[test]
    fn order_by_resets_page() {
        let mut ctl = controller();
        ctl.set_page(4);
        ctl.set_order_by(Some(OrderBy::asc(ProductField::Price)));
        assert_eq!(ctl.state().page, 1);
    }

    #[test]
    fn limit_resets_page() {
        let mut ctl = controller();
        ctl.set_page(4);
        ctl.set_limit(Some(25));
        assert_eq!(ctl.state().page, 1);
        assert_eq!(ctl.state().limit, 25);
    }

    #[test]
    fn filter_resets_page() {
        let mut ctl = controller();
        ctl.set_page(4);
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, 5i64)));
        assert_eq!(ctl.state().page, 1);
    }

    #[test]
    fn zero_limit_is_ignored() {
        let mut ctl = controller();
        ctl.set_limit(Some(0));
        ctl.set_limit(None);
        assert_eq!(ctl.state().limit, vitrine_model::DEFAULT_LIMIT);
    }

    #[test]
    fn blank_search_clears_the_slot() {
        let mut ctl = controller();
        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "desk")));
        assert!(ctl.state().search.is_some());

        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "")));
        assert!(ctl.state().search.is_none());
    }

    #[test]
    fn filters_stay_field_unique() {
        let mut ctl = controller();
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, "a")));
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, "b")));

        let filters = &ctl.state().filters;
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].value, FilterValue::from("b"));
    }

    #[test]
    fn empty_filter_value_removes_entry() {
        let mut ctl = controller();
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, "5")));
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, "")));
        assert!(ctl.state().filters.is_empty());
    }

    #[test]
    fn none_clears_all_filters() {
        let mut ctl = controller();
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, "5")));
        ctl.set_filter(Some(Filter::new(ProductField::StoreId, "2")));
        ctl.set_filter(None);
        assert!(ctl.state().filters.is_empty());
    }

    #[test]
    fn clearing_order_restores_configured_default() {
        let defaults =
            QueryDefaults::new().with_order_by(OrderBy::desc(ProductField::CreatedAt));
        let mut ctl = QueryController::new(defaults);

        ctl.set_order_by(Some(OrderBy::asc(ProductField::Price)));
        assert_eq!(
            ctl.state().order_by,
            Some(OrderBy::asc(ProductField::Price))
        );

        ctl.set_order_by(None);
        assert_eq!(
            ctl.state().order_by,
            Some(OrderBy::desc(ProductField::CreatedAt))
        );
    }

    #[test]
    fn clearing_order_without_default_clears_sort() {
        let mut ctl = controller();
        ctl.set_order_by(Some(OrderBy::asc(ProductField::Price)));
        ctl.set_order_by(None);
        assert!(ctl.state().order_by.is_none());
    }

    #[test]
    fn navigation_respects_server_bounds() {
        let mut ctl = controller();

        // No response yet: both directions unavailable.
        assert!(!ctl.next_page());
        assert!(!ctl.previous_page());

        ctl.apply_meta(meta(1, 3));
        assert!(ctl.next_page_available());
        assert!(!ctl.previous_page_available());
        assert!(ctl.next_page());
        assert_eq!(ctl.state().page, 2);

        ctl.apply_meta(meta(3, 3));
        assert!(!ctl.next_page_available());
        assert!(!ctl.next_page());

        assert!(ctl.previous_page());
        assert_eq!(ctl.state().page, 2);
    }

    #[test]
    fn reset_restores_defaults() {
        let defaults = QueryDefaults::new()
            .with_limit(25)
            .with_order_by(OrderBy::desc(ProductField::CreatedAt));
        let mut ctl = QueryController::new(defaults);

        ctl.set_limit(Some(50));
        ctl.set_filter(Some(Filter::new(ProductField::StoreId, 2i64)));
        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "desk")));
        ctl.set_page(3);

        ctl.reset();
        let state = ctl.state();
        assert_eq!(state.limit, 25);
        assert_eq!(state.page, 1);
        assert_eq!(
            state.order_by,
            Some(OrderBy::desc(ProductField::CreatedAt))
        );
        assert!(state.filters.is_empty());
        assert!(state.search.is_none());
    }

    #[test]
    fn every_mutation_bumps_generation() {
        let mut ctl = controller();
        let g0 = ctl.generation();
        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "a")));
        ctl.set_limit(Some(20));
        ctl.set_page(2);
        assert_eq!(ctl.generation(), g0 + 3);

        // Ignored mutations do not bump.
        ctl.set_limit(None);
        ctl.set_page(0);
        assert_eq!(ctl.generation(), g0 + 3);
    }

    #[test]
    fn params_mapping_matches_wire_shape() {
        let defaults =
            QueryDefaults::new().with_order_by(OrderBy::desc(ProductField::CreatedAt));
        let mut ctl = QueryController::new(defaults);
        ctl.set_filter(Some(Filter::new(ProductField::CategoryId, 5i64)));
        ctl.set_search_key(Some(SearchKey::new(ProductField::Name, "mug")));

        assert_eq!(
            ctl.to_params().to_query_string(),
            "limit=10&page=1&orderBy[created_at]=desc&filters[category_id]=5&search[name]=mug"
        );
    }

    #[test]
    fn comparison_operators_nest_under_their_symbol() {
        let mut ctl = controller();
        ctl.set_filter(Some(Filter::with_operator(
            ProductField::Price,
            FilterOperator::Ge,
            100i64,
        )));

        assert_eq!(
            ctl.to_params().to_query_string(),
            "limit=10&page=1&filters[price][%3E%3D]=100"
        );
    }

    #[test]
    fn relations_and_aggregates_pass_through() {
        let defaults = QueryDefaults::<ProductField>::new()
            .with_relation("product_images")
            .with_relation("category")
            .with_count("reviews")
            .with_avg("reviews", "rating");
        let ctl = QueryController::new(defaults);

        assert_eq!(
            ctl.to_params().to_query_string(),
            "limit=10&page=1&with[]=product_images&with[]=category\
             &withCount[]=reviews&withAvgs[][relation]=reviews&withAvgs[][field]=rating"
        );
    }
}
