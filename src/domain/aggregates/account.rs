//! Credit Account Aggregate
//!
//! Tracks the customer's simulated line of credit: a fixed ceiling and a
//! running consumed amount. Consumption only ever grows (there is no
//! cancellation or refund path), and checkout does not enforce the ceiling,
//! so `available` can go negative.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Money;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreditAccount {
    id: String,
    name: String,
    company: String,
    credit_limit: Money,
    used_credit: Money,
}

impl CreditAccount {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company: impl Into<String>,
        credit_limit: Money,
        used_credit: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            credit_limit,
            used_credit,
        }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn company(&self) -> &str { &self.company }
    pub fn credit_limit(&self) -> &Money { &self.credit_limit }
    pub fn used_credit(&self) -> &Money { &self.used_credit }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Ceiling minus consumption. May be negative: over-limit checkouts
    /// are permitted.
    pub fn available(&self) -> Money {
        self.credit_limit.subtract(&self.used_credit).unwrap_or_default()
    }

    /// Consumed share of the ceiling, as a percentage for the dashboard.
    pub fn utilization_percent(&self) -> f64 {
        if self.credit_limit.is_zero() {
            return 0.0;
        }
        let ratio = self.used_credit.amount() / self.credit_limit.amount();
        ratio.to_f64().unwrap_or(0.0) * 100.0
    }

    /// Record an order total against the line of credit. Never decreases.
    pub fn consume(&mut self, total: &Money) {
        if let Ok(next) = self.used_credit.add(total) {
            self.used_credit = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn account() -> CreditAccount {
        CreditAccount::new(
            "u1",
            "Roberto Silva",
            "Mercado Tech",
            Money::brl(Decimal::new(15_000, 0)),
            Money::brl(Decimal::new(3_450, 0)),
        )
    }

    #[test]
    fn test_available_credit() {
        assert_eq!(account().available().amount(), Decimal::new(11_550, 0));
    }

    #[test]
    fn test_consume_accumulates() {
        let mut acc = account();
        acc.consume(&Money::brl(Decimal::new(26250, 2)));
        assert_eq!(acc.used_credit().amount(), Decimal::new(371250, 2));
    }

    #[test]
    fn test_over_limit_goes_negative() {
        let mut acc = account();
        acc.consume(&Money::brl(Decimal::new(20_000, 0)));
        assert!(acc.available().amount() < Decimal::ZERO);
    }

    #[test]
    fn test_first_name() {
        assert_eq!(account().first_name(), "Roberto");
    }
}
