use serde::{Deserialize, Serialize};

use super::{FieldName, Resource};

/// A catalog product as listed on the storefront and seller dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub category_id: u64,
    pub store_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Price,
    Quantity,
    CategoryId,
    StoreId,
    CreatedAt,
}

impl FieldName for ProductField {
    fn as_str(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Price => "price",
            ProductField::Quantity => "quantity",
            ProductField::CategoryId => "category_id",
            ProductField::StoreId => "store_id",
            ProductField::CreatedAt => "created_at",
        }
    }
}

impl Resource for Product {
    const PATH: &'static str = "products";
    type Field = ProductField;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_record() {
        let json = r#"{
            "id": 7,
            "name": "Walnut desk",
            "description": null,
            "price": 249.99,
            "quantity": 3,
            "category_id": 2,
            "store_id": 1,
            "created_at": "2025-11-02T10:15:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.name, "Walnut desk");
        assert!(product.description.is_none());
        assert_eq!(product.quantity, 3);
    }
}
