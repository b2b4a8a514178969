use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::LineItem;

/// Subtotal of one line: quantity × unit price, minus the percentage
/// discount, minus the fixed discount, never below zero.
///
/// Arithmetic saturates at the `Decimal` range instead of panicking.
pub fn line_subtotal(item: &LineItem) -> Decimal {
    let raw = item.quantity.saturating_mul(item.unit_price);
    let after_pct = apply_percent(raw, item.discount_percent);
    let after_fixed = after_pct.saturating_sub(item.discount_fixed);
    after_fixed.max(Decimal::ZERO)
}

/// `amount × (1 - percent / 100)`, unclamped.
pub(crate) fn apply_percent(amount: Decimal, percent: Decimal) -> Decimal {
    let factor = Decimal::ONE.saturating_sub(percent / dec!(100));
    amount.saturating_mul(factor)
}
