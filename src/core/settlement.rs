use rust_decimal::{Decimal, RoundingStrategy};
use tracing::trace;

use super::aggregate::aggregate_amounts;
use super::types::{DocumentDiscountConfig, DocumentTotals, InvoiceTotals, LineItem};
use super::valuation::line_subtotal;

/// Monetary scale of issued invoices.
pub const INVOICE_SCALE: u32 = 2;

/// Scale of the per-line VAT proportion before it is applied.
const PROPORTION_SCALE: u32 = 10;

/// Settle an invoice at cent precision.
///
/// Line subtotals are rounded half-up to cents before aggregation, the
/// VAT amount is rounded once on the document, and that amount is then
/// spread over the VAT-applicable lines in proportion to their subtotal.
/// The last VAT-applicable line absorbs the rounding residue, so the
/// shares always add up to the document VAT.
pub fn settle_invoice(items: &[LineItem], config: &DocumentDiscountConfig) -> InvoiceTotals {
    let amounts: Vec<(Decimal, bool)> = items
        .iter()
        .map(|item| (round_half_up(line_subtotal(item)), item.vat_applicable))
        .collect();

    let raw = aggregate_amounts(amounts.iter().copied(), config);
    let subtotal = round_half_up(raw.subtotal);
    let vat_base = round_half_up(raw.vat_base);
    let vat = if config.vat_enabled {
        round_half_up(vat_base.saturating_mul(config.vat_rate))
    } else {
        Decimal::ZERO
    };

    let totals = DocumentTotals {
        subtotal_items: raw.subtotal_items,
        global_discount_percent: raw.global_discount_percent,
        global_discount_fixed: raw.global_discount_fixed,
        subtotal,
        discount_total: raw.subtotal_items.saturating_sub(subtotal),
        vat_base,
        vat,
        total: subtotal.saturating_add(vat),
    };
    let line_vat = allocate_vat(&amounts, vat);

    trace!(
        lines = items.len(),
        subtotal = %totals.subtotal,
        vat = %totals.vat,
        total = %totals.total,
        "invoice settled"
    );
    InvoiceTotals { totals, line_vat }
}

fn allocate_vat(amounts: &[(Decimal, bool)], vat: Decimal) -> Vec<Decimal> {
    let mut shares = vec![Decimal::ZERO; amounts.len()];
    if vat <= Decimal::ZERO {
        return shares;
    }
    let weights = vat_weights(amounts);
    let base = weights
        .iter()
        .fold(Decimal::ZERO, |acc, w| acc.saturating_add(*w));
    if base <= Decimal::ZERO {
        return shares;
    }

    // Shares are capped by what is left, so they never sum past `vat`.
    let mut allocated = Decimal::ZERO;
    let mut last = None;
    for (i, (weight, (_, applicable))) in weights.iter().zip(amounts).enumerate() {
        if !applicable {
            continue;
        }
        let proportion = weight
            .checked_div(base)
            .unwrap_or(Decimal::ZERO)
            .round_dp_with_strategy(PROPORTION_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let share = round_half_up(vat.saturating_mul(proportion)).min(vat - allocated);
        shares[i] = share;
        allocated += share;
        last = Some(i);
    }
    if let Some(i) = last {
        shares[i] += vat - allocated;
    }
    shares
}

/// Weight of each line in the VAT base; zero for exempt lines.
///
/// When the applicable amounts would overflow as a sum, every weight is
/// scaled down by the line count first.
fn vat_weights(amounts: &[(Decimal, bool)]) -> Vec<Decimal> {
    let applicable = || amounts.iter().map(|&(a, ok)| if ok { a } else { Decimal::ZERO });
    let fits = applicable()
        .try_fold(Decimal::ZERO, |acc, a| acc.checked_add(a))
        .is_some();
    if fits {
        return applicable().collect();
    }
    let divisor = Decimal::from(amounts.len()).saturating_add(Decimal::ONE);
    applicable()
        .map(|a| a.checked_div(divisor).unwrap_or(Decimal::ZERO))
        .collect()
}

/// Round to cents using half-up (commercial rounding).
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(INVOICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
