//! B2B Purchasing Portal
//!
//! Client-side state for a B2B purchasing portal: product catalog, shopping
//! cart, order history, a simulated line of credit and an AI purchasing
//! assistant backed by a generative-language API.
//!
//! ## Features
//! - Immutable product catalog with text and category filtering
//! - Cart with merge-on-add, quantity floors and best-effort persistence
//! - Append-only order ledger with a fixed 5% checkout surcharge
//! - Credit-consumption tracking (ceiling displayed, not enforced)
//! - Chat transcript forwarding catalog and credit context to the assistant

pub mod chat;
pub mod domain;
pub mod seed;
pub mod session;
pub mod storage;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("cannot checkout an empty cart")]
    EmptyCart,

    #[error("unknown view: {0}")]
    UnknownView(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
