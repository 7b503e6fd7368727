use vitrine_model::{Category, Page, Product};

/// Subset of the query grammar the mock honors: pagination, single-column
/// sort, name search, and equality filters on the id columns.
#[derive(Debug)]
pub struct ListParams {
    pub limit: usize,
    pub page: usize,
    pub search_name: Option<String>,
    pub category_id: Option<u64>,
    pub store_id: Option<u64>,
    pub order_by: Option<(String, bool)>,
}

impl ListParams {
    pub fn parse(query: &str) -> Self {
        let mut params = Self {
            limit: 10,
            page: 1,
            search_name: None,
            category_id: None,
            store_id: None,
            order_by: None,
        };

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(raw_value)
                .map(|v| v.into_owned())
                .unwrap_or_default();

            match key {
                "limit" => {
                    if let Ok(n) = value.parse::<usize>()
                        && n > 0
                    {
                        params.limit = n;
                    }
                }
                "page" => {
                    if let Ok(n) = value.parse::<usize>()
                        && n >= 1
                    {
                        params.page = n;
                    }
                }
                "search[name]" => {
                    if !value.is_empty() {
                        params.search_name = Some(value.to_lowercase());
                    }
                }
                "filters[category_id]" => params.category_id = value.parse().ok(),
                "filters[store_id]" => params.store_id = value.parse().ok(),
                _ => {
                    if let Some(field) = key
                        .strip_prefix("orderBy[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        params.order_by = Some((field.to_string(), value != "desc"));
                    }
                }
            }
        }

        params
    }
}

pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl Catalog {
    pub fn seed() -> Self {
        let categories = vec![
            category(1, "Furniture", None),
            category(2, "Desks", Some(1)),
            category(3, "Lighting", None),
            category(4, "Kitchen", None),
        ];

        let products = vec![
            product(1, "Walnut desk", 249.99, 3, 2, 1),
            product(2, "Oak desk", 199.00, 7, 2, 1),
            product(3, "Standing desk", 449.50, 2, 2, 2),
            product(4, "Desk lamp", 39.90, 25, 3, 2),
            product(5, "Floor lamp", 89.00, 11, 3, 2),
            product(6, "Ceramic mug", 12.50, 120, 4, 3),
            product(7, "Espresso mug set", 34.00, 40, 4, 3),
            product(8, "Cast iron pan", 59.00, 18, 4, 3),
            product(9, "Office chair", 179.00, 9, 1, 1),
            product(10, "Bookshelf", 129.00, 5, 1, 1),
            product(11, "Monitor stand", 45.00, 14, 2, 2),
            product(12, "Pendant light", 119.00, 6, 3, 2),
        ];

        Self {
            products,
            categories,
        }
    }

    pub fn products(&self, params: &ListParams) -> Page<Product> {
        let mut matched: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                params
                    .search_name
                    .as_ref()
                    .is_none_or(|needle| p.name.to_lowercase().contains(needle))
            })
            .filter(|p| params.category_id.is_none_or(|id| p.category_id == id))
            .filter(|p| params.store_id.is_none_or(|id| p.store_id == id))
            .cloned()
            .collect();

        if let Some((field, asc)) = &params.order_by {
            matched.sort_by(|a, b| {
                let ordering = match field.as_str() {
                    "name" => a.name.cmp(&b.name),
                    "price" => a.price.total_cmp(&b.price),
                    "quantity" => a.quantity.cmp(&b.quantity),
                    _ => a.id.cmp(&b.id),
                };
                if *asc { ordering } else { ordering.reverse() }
            });
        }

        paginate(matched, params)
    }

    pub fn categories(&self, params: &ListParams) -> Page<Category> {
        let mut matched: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| {
                params
                    .search_name
                    .as_ref()
                    .is_none_or(|needle| c.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        if let Some((field, asc)) = &params.order_by {
            matched.sort_by(|a, b| {
                let ordering = match field.as_str() {
                    "name" => a.name.cmp(&b.name),
                    _ => a.id.cmp(&b.id),
                };
                if *asc { ordering } else { ordering.reverse() }
            });
        }

        paginate(matched, params)
    }
}

fn paginate<T>(matched: Vec<T>, params: &ListParams) -> Page<T> {
    let total = matched.len();
    let last_page = matched.len().div_ceil(params.limit).max(1);
    let current_page = params.page.min(last_page);
    let start = (current_page - 1) * params.limit;

    let data: Vec<T> = matched
        .into_iter()
        .skip(start)
        .take(params.limit)
        .collect();

    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        (Some(start as u32 + 1), Some((start + data.len()) as u32))
    };

    Page {
        current_page: current_page as u32,
        data,
        from,
        last_page: last_page as u32,
        per_page: params.limit as u32,
        to,
        total: total as u64,
    }
}

fn product(id: u64, name: &str, price: f64, quantity: u32, category_id: u64, store_id: u64) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: None,
        price,
        quantity,
        category_id,
        store_id,
        created_at: None,
    }
}

fn category(id: u64, name: &str, parent_id: Option<u64>) -> Category {
    Category {
        id,
        name: name.to_string(),
        parent_id,
        created_at: None,
    }
}
