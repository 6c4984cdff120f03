//! Aggregates module
pub mod account;
pub mod cart;
pub mod order;

pub use account::CreditAccount;
pub use cart::{Cart, CartItem};
pub use order::{Order, OrderLedger, OrderStatus, SURCHARGE_RATE};
