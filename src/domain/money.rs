//! Monetary types for price and volume representation.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Volume represented as a Decimal for precision.
pub type Volume = Decimal;

/// Number of decimal places prices are rounded to before use.
pub const MAX_DECIMALS: u32 = 2;

/// Returns `1 - price`, the price of the complementary outcome.
#[must_use]
pub fn complement(price: Price) -> Price {
    Decimal::ONE - price
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn complement_sums_to_one() {
        assert_eq!(complement(dec!(0.37)), dec!(0.63));
        assert_eq!(complement(dec!(0.37)) + dec!(0.37), Decimal::ONE);
    }
}
