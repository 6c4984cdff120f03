//! Domain events
//!
//! Aggregates raise events as they mutate; the presentation layer drains
//! them with `take_events` instead of hooking into the mutation itself.

use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Cart(CartEvent),
    Order(OrderEvent),
    Chat(ChatEvent),
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    ItemAdded { product_id: String, quantity: u32 },
    QuantityChanged { product_id: String, quantity: u32 },
    ItemRemoved { product_id: String },
    Cleared,
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed { order_id: String, total: Decimal },
}

#[derive(Clone, Debug)]
pub enum ChatEvent {
    MessageAppended { message_id: String, role: String },
}
