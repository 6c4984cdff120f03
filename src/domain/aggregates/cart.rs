//! Cart Aggregate

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;
use crate::domain::events::{CartEvent, DomainEvent};
use crate::domain::value_objects::{Money, Quantity};

/// A frozen slice of product data plus a quantity. Serialized verbatim to
/// local storage, and copied into orders at checkout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

/// In-memory cart for the active session.
///
/// Invariants: at most one entry per product id; quantities never drop
/// below 1 through `update_quantity` (removal is a separate operation).
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    events: Vec<DomainEvent>,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    /// Rebuild a cart from persisted items, e.g. at session start.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items, events: vec![] }
    }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Total units across all lines (the badge count).
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().fold(Money::default(), |acc, i| {
            acc.add(&i.line_total()).unwrap_or(acc)
        })
    }

    /// Add one unit of a product: merge-increment if the product is already
    /// in the cart, otherwise insert a new line with quantity 1. Infallible.
    pub fn add(&mut self, product: &Product) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id()) {
            existing.quantity += 1;
            let (id, qty) = (existing.product_id.clone(), existing.quantity);
            self.raise(CartEvent::ItemAdded { product_id: id, quantity: qty });
        } else {
            self.items.push(CartItem {
                product_id: product.id().to_string(),
                name: product.name().to_string(),
                category: product.category().to_string(),
                unit_price: product.price().clone(),
                quantity: 1,
            });
            self.raise(CartEvent::ItemAdded { product_id: product.id().to_string(), quantity: 1 });
        }
    }

    /// Apply a signed delta to a line's quantity, floored at 1.
    /// No-op when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &str, delta: i32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = Quantity::new(item.quantity).apply_delta(delta, 1).value();
            let qty = item.quantity;
            self.raise(CartEvent::QuantityChanged { product_id: product_id.to_string(), quantity: qty });
        }
    }

    /// Delete a line entirely. No-op when the product is not in the cart.
    pub fn remove(&mut self, product_id: &str) {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() != before {
            self.raise(CartEvent::ItemRemoved { product_id: product_id.to_string() });
        }
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.raise(CartEvent::Cleared);
        }
    }

    /// Snapshot of the current lines, for order construction.
    pub fn snapshot(&self) -> Vec<CartItem> { self.items.clone() }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise(&mut self, e: CartEvent) { self.events.push(DomainEvent::Cart(e)); }
}
