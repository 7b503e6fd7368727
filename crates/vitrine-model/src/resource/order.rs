use serde::{Deserialize, Serialize};

use super::{FieldName, Resource};

/// Lifecycle of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns `true` once the order can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// An order as shown on the buyer history and seller dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub store_id: u64,
    pub status: OrderStatus,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    UserId,
    StoreId,
    Status,
    Total,
    CreatedAt,
}

impl FieldName for OrderField {
    fn as_str(&self) -> &'static str {
        match self {
            OrderField::Id => "id",
            OrderField::UserId => "user_id",
            OrderField::StoreId => "store_id",
            OrderField::Status => "status",
            OrderField::Total => "total",
            OrderField::CreatedAt => "created_at",
        }
    }
}

impl Resource for Order {
    const PATH: &'static str = "orders";
    type Field = OrderField;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Processing).unwrap();
        assert_eq!(json, r#""processing""#);
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }
}
