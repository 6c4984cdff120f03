//! System-instruction assembly for the purchasing assistant.
//!
//! Every request carries the full catalog and the customer's credit profile
//! so the model can answer price and availability questions and warn about the
//! remaining credit without any tool calls.

use std::fmt::Write;

use crate::domain::aggregates::CreditAccount;
use crate::domain::catalog::Catalog;

/// One catalog line per product: name, id, price, category, description.
pub fn catalog_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for p in catalog.products() {
        let _ = writeln!(
            out,
            "- {} (ID: {}): {} | Category: {} | {}",
            p.name(),
            p.id(),
            p.price(),
            p.category(),
            p.description()
        );
    }
    out
}

pub fn system_instruction(catalog: &Catalog, account: &CreditAccount) -> String {
    format!(
        "You are the virtual purchasing assistant for the B2B Customer Portal.\n\
         Your goal is to help {name} from {company} find products, answer catalog \
         questions and suggest purchases.\n\
         \n\
         Rules:\n\
         1. Keep a professional but friendly and helpful tone.\n\
         2. You have access to the product list below. Use it to answer about \
         prices, specifications and availability.\n\
         3. When asked for a recommendation, analyse the context and suggest \
         items from the list.\n\
         4. The customer's credit ceiling is {limit} and {used} is already \
         consumed. Warn when a suggested purchase could exceed the remaining \
         credit.\n\
         5. Answer in Brazilian Portuguese.\n\
         6. Format the reply with Markdown (bold for prices and product names).\n\
         \n\
         Available product catalog:\n\
         {listing}",
        name = account.name(),
        company = account.company(),
        limit = account.credit_limit(),
        used = account.used_credit(),
        listing = catalog_listing(catalog),
    )
}
