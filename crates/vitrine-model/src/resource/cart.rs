use serde::{Deserialize, Serialize};

use super::{FieldName, Resource};

/// One line of a shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub unit_price: f64,
}

impl CartItem {
    /// Line total, aggregated client-side at checkout.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartItemField {
    Id,
    ProductId,
    Quantity,
    UnitPrice,
}

impl FieldName for CartItemField {
    fn as_str(&self) -> &'static str {
        match self {
            CartItemField::Id => "id",
            CartItemField::ProductId => "product_id",
            CartItemField::Quantity => "quantity",
            CartItemField::UnitPrice => "unit_price",
        }
    }
}

impl Resource for CartItem {
    const PATH: &'static str = "cart-items";
    type Field = CartItemField;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_multiplies_quantity() {
        let item = CartItem {
            id: 1,
            product_id: 9,
            quantity: 3,
            unit_price: 4.5,
        };
        assert_eq!(item.subtotal(), 13.5);
    }
}
