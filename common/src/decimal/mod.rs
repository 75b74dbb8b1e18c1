//! Decimal type utilities for precise price arithmetic

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

use crate::error::Result;

/// Price type with fixed-point precision
pub type Price = Decimal;

/// Quantity type; orders are sized in whole units
pub type Quantity = u64;

/// Sum of many quantities, wide enough that no book of `u64` orders overflows it
pub type TotalQuantity = u128;

/// Amount type (price * quantity)
pub type Amount = Decimal;

/// Notional value of `quantity` units at `price`
///
/// Fails with [`crate::Error::DecimalError`] when the product does not fit a
/// `Decimal`.
pub fn notional(price: Price, quantity: Quantity) -> Result<Amount> {
    let amount = price
        .checked_mul(Decimal::from(quantity))
        .ok_or(rust_decimal::Error::ExceedsMaximumPossibleValue)?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn notional_multiplies_price_by_quantity() {
        assert_eq!(notional(dec!(2.5), 4).unwrap(), dec!(10));
        assert_eq!(notional(dec!(100), 0).unwrap(), Decimal::ZERO);
        assert_eq!(notional(dec!(1), u64::MAX).unwrap(), Decimal::from(u64::MAX));
    }

    #[test]
    fn notional_overflow_is_an_error() {
        let err = notional(Decimal::MAX, 2).unwrap_err();
        assert!(matches!(err, Error::DecimalError(_)));
    }
}
