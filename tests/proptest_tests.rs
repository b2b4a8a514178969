//! Property-based tests for valuation and tax id validation.
//!
//! Run with: `cargo test --test proptest_tests`

use factura::core::*;
use factura::nif::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Amount with 2 decimals, -100.00 to 99999.99 (negatives exercise clamping).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-10_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Percentage 0.00 to 150.00 (over 100 exercises clamping).
fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=15_000i64).prop_map(|p| Decimal::new(p, 2))
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (
        (0u32..=500u32).prop_map(Decimal::from),
        arb_amount(),
        arb_percent(),
        arb_amount(),
        any::<bool>(),
    )
        .prop_map(|(qty, price, pct, fixed, vat)| LineItem {
            discount_percent: pct,
            discount_fixed: fixed,
            vat_applicable: vat,
            ..LineItem::new(qty, price)
        })
}

/// Lines whose product often saturates at `Decimal::MAX`.
fn arb_huge_line() -> impl Strategy<Value = LineItem> {
    (any::<u64>(), any::<u64>(), any::<bool>()).prop_map(|(qty, price, vat)| LineItem {
        vat_applicable: vat,
        ..LineItem::new(Decimal::from(qty), Decimal::from(price))
    })
}

fn arb_lines() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_line(), 0..=8)
}

fn arb_config() -> impl Strategy<Value = DocumentDiscountConfig> {
    (arb_percent(), arb_amount(), any::<bool>(), any::<bool>()).prop_map(
        |(pct, fixed, before, vat)| DocumentDiscountConfig {
            global_discount_percent: pct,
            global_discount_fixed: fixed.abs(),
            discount_before_vat: before,
            vat_enabled: vat,
            ..DocumentDiscountConfig::default()
        },
    )
}

fn arb_dni() -> impl Strategy<Value = String> {
    (0u32..100_000_000u32).prop_map(|n| format!("{n:08}{}", dni_letter(n)))
}

fn arb_nie() -> impl Strategy<Value = String> {
    (prop::sample::select(vec!['X', 'Y', 'Z']), 0u32..10_000_000u32).prop_map(|(p, n)| {
        let lead = nie_lead_digit(p).unwrap();
        format!("{p}{n:07}{}", dni_letter(lead * 10_000_000 + n))
    })
}

fn arb_cif() -> impl Strategy<Value = String> {
    (
        prop::sample::select("ABCDEFGHJKLMNPQRSUVW".chars().collect::<Vec<_>>()),
        0u32..10_000_000u32,
        any::<bool>(),
    )
        .prop_map(|(entity, n, as_letter)| {
            let digits = format!("{n:07}");
            let d = cif_control_digit(&digits).unwrap();
            let control = if as_letter {
                CIF_CONTROL_LETTERS[d as usize] as char
            } else {
                char::from_digit(d, 10).unwrap()
            };
            format!("{entity}{digits}{control}")
        })
}

// ── Valuation properties ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn line_subtotal_is_never_negative(line in arb_line()) {
        prop_assert!(line_subtotal(&line) >= Decimal::ZERO);
    }

    #[test]
    fn totals_are_internally_consistent(lines in arb_lines(), config in arb_config()) {
        let t = aggregate(&lines, &config);
        prop_assert!(t.subtotal >= Decimal::ZERO);
        prop_assert!(t.vat_base >= Decimal::ZERO);
        prop_assert!(t.vat_base <= t.subtotal_items);
        prop_assert_eq!(t.discount_total, t.subtotal_items - t.subtotal);
        prop_assert_eq!(t.total, t.subtotal + t.vat);
        if !config.vat_enabled {
            prop_assert_eq!(t.vat, Decimal::ZERO);
        }
    }

    #[test]
    fn zero_global_discount_is_a_no_op(lines in arb_lines(), before in any::<bool>()) {
        let config = DocumentDiscountConfig {
            discount_before_vat: before,
            ..DocumentDiscountConfig::default()
        };
        let t = aggregate(&lines, &config);
        let sum: Decimal = lines.iter().map(line_subtotal).sum();
        prop_assert_eq!(t.subtotal, sum);
        prop_assert_eq!(t.discount_total, Decimal::ZERO);
    }

    #[test]
    fn aggregate_is_idempotent(lines in arb_lines(), config in arb_config()) {
        prop_assert_eq!(aggregate(&lines, &config), aggregate(&lines, &config));
    }

    #[test]
    fn discount_after_vat_never_lowers_the_base(lines in arb_lines(), config in arb_config()) {
        let before = aggregate(&lines, &DocumentDiscountConfig { discount_before_vat: true, ..config.clone() });
        let after = aggregate(&lines, &DocumentDiscountConfig { discount_before_vat: false, ..config });
        prop_assert!(after.vat_base >= before.vat_base);
        prop_assert_eq!(after.subtotal, before.subtotal);
    }

    #[test]
    fn settlement_is_cent_exact(lines in arb_lines(), config in arb_config()) {
        let inv = settle_invoice(&lines, &config);
        prop_assert_eq!(inv.line_vat.len(), lines.len());
        let shares: Decimal = inv.line_vat.iter().sum();
        prop_assert_eq!(shares, inv.totals.vat);
        prop_assert!(inv.totals.total.scale() <= INVOICE_SCALE);
        prop_assert_eq!(inv.totals.total, inv.totals.subtotal + inv.totals.vat);
    }

    #[test]
    fn settlement_of_huge_lines_stays_exact(
        lines in prop::collection::vec(arb_huge_line(), 1..=6),
        config in arb_config(),
    ) {
        let inv = settle_invoice(&lines, &config);
        let shares: Decimal = inv.line_vat.iter().sum();
        prop_assert_eq!(shares, inv.totals.vat);
        prop_assert!(inv.line_vat.iter().all(|s| *s >= Decimal::ZERO));
    }

    #[test]
    fn coerced_floats_are_finite(v in any::<f64>()) {
        let d = coerce::amount_from_f64(v);
        if !v.is_finite() {
            prop_assert_eq!(d, Decimal::ZERO);
        }
    }
}

// ── Tax id properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn generated_dni_is_valid(id in arb_dni()) {
        prop_assert!(is_valid_tax_id(Some(&id)));
        prop_assert_eq!(detect_kind(&id), Some(TaxIdKind::Dni));
    }

    #[test]
    fn generated_nie_is_valid(id in arb_nie()) {
        prop_assert!(is_valid_tax_id(Some(&id)));
        prop_assert_eq!(detect_kind(&id), Some(TaxIdKind::Nie));
    }

    #[test]
    fn generated_cif_is_valid(id in arb_cif()) {
        prop_assert!(is_valid_tax_id(Some(&id)));
        prop_assert_eq!(detect_kind(&id), Some(TaxIdKind::Cif));
    }

    #[test]
    fn wrong_dni_letter_is_rejected(n in 0u32..100_000_000u32, shift in 1usize..23) {
        let right = DNI_LETTERS.iter().position(|&b| b as char == dni_letter(n)).unwrap();
        let wrong = DNI_LETTERS[(right + shift) % 23] as char;
        let id = format!("{n:08}{wrong}");
        prop_assert!(!is_valid_tax_id(Some(&id)));
    }

    #[test]
    fn wrong_cif_digit_is_rejected(n in 0u32..10_000_000u32, shift in 1u32..10) {
        let digits = format!("{n:07}");
        let d = cif_control_digit(&digits).unwrap();
        let id = format!("B{digits}{}", (d + shift) % 10);
        prop_assert!(!is_valid_tax_id(Some(&id)));
    }

    #[test]
    fn validator_never_panics(s in "\\PC{0,16}") {
        let _ = is_valid_tax_id(Some(&s));
        let _ = nif_validator(Some(&s));
    }

    #[test]
    fn formatting_noise_is_ignored(id in arb_dni()) {
        let noisy = format!(" {}-{} ", &id[..4], id[4..].to_lowercase());
        prop_assert!(is_valid_tax_id(Some(&noisy)));
    }
}

#[test]
fn scenario_holds_under_reordering() {
    let a = LineItem::new(dec!(2), dec!(10));
    let b = LineItem::new(dec!(1), dec!(5));
    let config = DocumentDiscountConfig {
        global_discount_percent: dec!(10),
        ..DocumentDiscountConfig::default()
    };
    assert_eq!(
        aggregate(&[a.clone(), b.clone()], &config),
        aggregate(&[b, a], &config)
    );
}
