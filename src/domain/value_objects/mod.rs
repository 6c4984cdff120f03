//! Value Objects for the purchasing portal

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
///
/// Amounts are `rust_decimal` values so cart arithmetic and the checkout
/// surcharge stay exact (250.00 x 1.05 is 262.50, not 262.499...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn brl(amount: Decimal) -> Self { Self::new(amount, "BRL") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }

    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }

    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount - other.amount, &self.currency))
    }

    pub fn multiply(&self, qty: u32) -> Money { Money::new(self.amount * Decimal::from(qty), &self.currency) }

    /// Scale by an arbitrary factor, rounded to cents. Used for the checkout surcharge.
    pub fn scale(&self, factor: Decimal) -> Money {
        Money::new((self.amount * factor).round_dp(2), &self.currency)
    }
}

impl Default for Money { fn default() -> Self { Self::zero("BRL") } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}

#[derive(Debug, Clone)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

/// Quantity value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
    /// Apply a signed delta, never dropping below `floor`.
    pub fn apply_delta(&self, delta: i32, floor: u32) -> Self {
        let next = i64::from(self.0) + i64::from(delta);
        Self(next.max(i64::from(floor)) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_add() {
        let a = Money::brl(Decimal::new(100, 0));
        let b = Money::brl(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let a = Money::brl(Decimal::new(10, 0));
        let b = Money::new(Decimal::new(10, 0), "USD");
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn test_money_scale_rounds_to_cents() {
        let subtotal = Money::brl(Decimal::new(12345, 2)); // 123.45
        let surcharge = subtotal.scale(Decimal::new(5, 2)); // x 0.05
        assert_eq!(surcharge.amount(), Decimal::new(617, 2)); // 6.17
    }

    #[test]
    fn test_quantity_delta_floor() {
        let q = Quantity::new(2);
        assert_eq!(q.apply_delta(-5, 1).value(), 1);
        assert_eq!(q.apply_delta(3, 1).value(), 5);
    }
}
