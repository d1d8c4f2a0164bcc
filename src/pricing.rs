//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Flat shipping fee charged on any order with a positive subtotal.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(99, 0, 0, false, 0);

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Shipping charged for a subtotal under a flat fee.
///
/// Empty orders ship free; anything else pays the flat fee regardless of size.
pub fn shipping_for(subtotal: Decimal, flat_fee: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO {
        flat_fee
    } else {
        Decimal::ZERO
    }
}

/// Render an amount in Indian rupees.
pub fn format_price(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::INR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_exactly() {
        assert_eq!(line_total(Decimal::new(12_999, 2), 2), Decimal::new(25_998, 2));
    }

    #[test]
    fn line_total_of_zero_units_is_zero() {
        assert_eq!(line_total(Decimal::new(12_999, 2), 0), Decimal::ZERO);
    }

    #[test]
    fn shipping_is_free_for_empty_subtotal() {
        assert_eq!(shipping_for(Decimal::ZERO, FLAT_SHIPPING_FEE), Decimal::ZERO);
    }

    #[test]
    fn shipping_is_flat_for_any_positive_subtotal() {
        assert_eq!(shipping_for(Decimal::new(1, 2), FLAT_SHIPPING_FEE), Decimal::from(99));
        assert_eq!(
            shipping_for(Decimal::from(50_000), FLAT_SHIPPING_FEE),
            Decimal::from(99)
        );
    }

    #[test]
    fn format_price_uses_rupee_symbol() {
        let formatted = format_price(Decimal::from(99));

        assert!(formatted.contains('₹'), "expected rupee symbol in {formatted}");
        assert!(formatted.contains("99"), "expected amount in {formatted}");
    }
}
