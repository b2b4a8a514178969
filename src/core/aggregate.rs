use rust_decimal::Decimal;
use tracing::trace;

use super::types::{DocumentDiscountConfig, DocumentTotals, LineItem};
use super::valuation::{apply_percent, line_subtotal};

/// Compute the full cost breakdown of a document.
///
/// Line subtotals come from [`line_subtotal`]. The global discount
/// (percentage first, then fixed amount) always reduces the subtotal.
/// It reduces the VAT base only when `discount_before_vat` is set;
/// otherwise VAT is charged on the undiscounted base of the
/// VAT-applicable lines.
pub fn aggregate(items: &[LineItem], config: &DocumentDiscountConfig) -> DocumentTotals {
    let amounts = items
        .iter()
        .map(|item| (line_subtotal(item), item.vat_applicable));
    let totals = aggregate_amounts(amounts, config);
    trace!(
        lines = items.len(),
        subtotal = %totals.subtotal,
        vat_base = %totals.vat_base,
        vat = %totals.vat,
        total = %totals.total,
        "document aggregated"
    );
    totals
}

/// Reduction over `(line subtotal, vat applicable)` pairs.
pub(crate) fn aggregate_amounts(
    amounts: impl IntoIterator<Item = (Decimal, bool)>,
    config: &DocumentDiscountConfig,
) -> DocumentTotals {
    let (subtotal_items, vat_base_raw) = amounts.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(all, taxable), (amount, vat_applicable)| {
            let taxable = if vat_applicable {
                taxable.saturating_add(amount)
            } else {
                taxable
            };
            (all.saturating_add(amount), taxable)
        },
    );

    let subtotal = apply_global_discount(subtotal_items, config);
    let vat_base = if config.discount_before_vat {
        apply_global_discount(vat_base_raw, config)
    } else {
        vat_base_raw.max(Decimal::ZERO)
    };

    let vat = if config.vat_enabled {
        vat_base.saturating_mul(config.vat_rate)
    } else {
        Decimal::ZERO
    };

    DocumentTotals {
        subtotal_items,
        global_discount_percent: config.global_discount_percent,
        global_discount_fixed: config.global_discount_fixed,
        subtotal,
        discount_total: subtotal_items.saturating_sub(subtotal),
        vat_base,
        vat,
        total: subtotal.saturating_add(vat),
    }
}

fn apply_global_discount(amount: Decimal, config: &DocumentDiscountConfig) -> Decimal {
    apply_percent(amount, config.global_discount_percent)
        .saturating_sub(config.global_discount_fixed)
        .max(Decimal::ZERO)
}
