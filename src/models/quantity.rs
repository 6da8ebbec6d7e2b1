//! Quantity of an item in its unit of measure

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A strictly positive decimal quantity (e.g. 2.5 kg, 12 pieces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a quantity, returning `None` unless `value > 0`
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Cost of this quantity at the given unit price
    ///
    /// Saturates at `Decimal::MAX` rather than overflowing.
    pub fn cost_at(&self, price_per_unit: Money) -> Money {
        Money::new(self.0.saturating_mul(price_per_unit.amount()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("quantity must be positive, got {}", value))
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_only() {
        assert!(Quantity::new(Decimal::ONE).is_some());
        assert!(Quantity::new(Decimal::ZERO).is_none());
        assert!(Quantity::new(Decimal::NEGATIVE_ONE).is_none());
    }

    #[test]
    fn test_cost_at_is_exact() {
        let qty = Quantity::new(Decimal::new(25, 1)).unwrap(); // 2.5
        let cost = qty.cost_at(Money::from_cents(199));
        assert_eq!(cost.amount(), Decimal::new(4975, 3));
    }

    #[test]
    fn test_cost_at_saturates() {
        let qty = Quantity::new(Decimal::MAX).unwrap();
        assert_eq!(qty.cost_at(Money::from_cents(200)).amount(), Decimal::MAX);
    }

    #[test]
    fn test_display_normalizes() {
        let qty = Quantity::new(Decimal::new(2500, 3)).unwrap();
        assert_eq!(qty.to_string(), "2.5");
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Quantity>("\"0\"").is_err());
        assert!(serde_json::from_str::<Quantity>("\"1.5\"").is_ok());
    }
}
