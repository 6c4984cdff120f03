//! Order Aggregate
//!
//! An order is a frozen snapshot of the cart at checkout plus the computed
//! totals. Orders are never mutated after creation; the ledger is append-only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::cart::CartItem;
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::value_objects::Money;

/// Fixed checkout surcharge: 5% on the cart subtotal.
pub const SURCHARGE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    Shipped,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    id: String,
    placed_at: DateTime<Utc>,
    status: OrderStatus,
    items: Vec<CartItem>,
    subtotal: Money,
    surcharge: Money,
    total: Money,
}

impl Order {
    /// Build a Pending order from a cart snapshot, applying the surcharge.
    ///
    /// Order ids follow the `ORD-{year}-{number}` shape of the ordering
    /// system; the number is random and not guaranteed unique.
    pub fn place(items: Vec<CartItem>) -> Self {
        let subtotal = items.iter().fold(Money::default(), |acc, i| {
            acc.add(&i.line_total()).unwrap_or(acc)
        });
        let surcharge = subtotal.scale(SURCHARGE_RATE);
        let total = subtotal.add(&surcharge).unwrap_or_else(|_| subtotal.clone());
        let now = Utc::now();
        Self {
            id: format!("ORD-{}-{:03}", now.format("%Y"), rand::random::<u32>() % 1000),
            placed_at: now,
            status: OrderStatus::Pending,
            items,
            subtotal,
            surcharge,
            total,
        }
    }

    /// Reconstitute a historical order, e.g. from seed data.
    pub fn historical(
        id: impl Into<String>,
        placed_at: DateTime<Utc>,
        status: OrderStatus,
        items: Vec<CartItem>,
        total: Money,
    ) -> Self {
        let subtotal = items.iter().fold(Money::default(), |acc, i| {
            acc.add(&i.line_total()).unwrap_or(acc)
        });
        let surcharge = total.subtract(&subtotal).unwrap_or_default();
        Self { id: id.into(), placed_at, status, items, subtotal, surcharge, total }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn placed_at(&self) -> DateTime<Utc> { self.placed_at }
    pub fn status(&self) -> &OrderStatus { &self.status }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn surcharge(&self) -> &Money { &self.surcharge }
    pub fn total(&self) -> &Money { &self.total }
    pub fn is_pending(&self) -> bool { self.status == OrderStatus::Pending }
}

/// Append-only order history, newest first.
#[derive(Clone, Debug, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
    events: Vec<DomainEvent>,
}

impl OrderLedger {
    pub fn new() -> Self { Self::default() }

    pub fn with_history(orders: Vec<Order>) -> Self {
        Self { orders, events: vec![] }
    }

    pub fn orders(&self) -> &[Order] { &self.orders }
    pub fn len(&self) -> usize { self.orders.len() }
    pub fn is_empty(&self) -> bool { self.orders.is_empty() }
    pub fn latest(&self) -> Option<&Order> { self.orders.first() }

    pub fn pending_count(&self) -> usize {
        self.orders.iter().filter(|o| o.is_pending()).count()
    }

    /// Prepend a freshly placed order. There is no removal or mutation path.
    pub fn record(&mut self, order: Order) {
        self.events.push(DomainEvent::Order(OrderEvent::Placed {
            order_id: order.id().to_string(),
            total: order.total().amount(),
        }));
        self.orders.insert(0, order);
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, qty: u32) -> CartItem {
        CartItem {
            product_id: id.into(),
            name: format!("Item {id}"),
            category: "Test".into(),
            unit_price: Money::brl(Decimal::new(price, 0)),
            quantity: qty,
        }
    }

    #[test]
    fn test_surcharge_arithmetic() {
        // 100x2 + 50x1: subtotal 250.00, surcharge 12.50, total 262.50
        let order = Order::place(vec![item("p1", 100, 2), item("p2", 50, 1)]);
        assert_eq!(order.subtotal().amount(), Decimal::new(250, 0));
        assert_eq!(order.surcharge().amount(), Decimal::new(1250, 2));
        assert_eq!(order.total().amount(), Decimal::new(26250, 2));
        assert_eq!(order.status(), &OrderStatus::Pending);
    }

    #[test]
    fn test_order_id_shape() {
        let order = Order::place(vec![item("p1", 10, 1)]);
        let year = Utc::now().format("%Y").to_string();
        assert!(order.id().starts_with(&format!("ORD-{year}-")));
    }

    #[test]
    fn test_ledger_prepends_newest_first() {
        let mut ledger = OrderLedger::new();
        let first = Order::place(vec![item("p1", 10, 1)]);
        let second = Order::place(vec![item("p2", 20, 1)]);
        let second_id = second.id().to_string();
        ledger.record(first);
        ledger.record(second);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.latest().map(Order::id), Some(second_id.as_str()));
    }

    #[test]
    fn test_pending_count_counts_only_pending() {
        let mut ledger = OrderLedger::with_history(vec![Order::historical(
            "ORD-2023-001",
            Utc::now(),
            OrderStatus::Delivered,
            vec![item("p1", 10, 1)],
            Money::brl(Decimal::new(1050, 2)),
        )]);
        ledger.record(Order::place(vec![item("p2", 20, 1)]));
        assert_eq!(ledger.pending_count(), 1);
    }
}
