use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::aggregate::aggregate;
use super::coerce::{self, lenient};
use super::settlement::settle_invoice;

/// General Spanish IVA rate (21 %).
pub const VAT_RATE: Decimal = dec!(0.21);

/// One billable row of a quote or invoice.
///
/// Field names on the wire follow the form model of the front-end
/// (`cantidad`, `precioUnitario`, ...). Amount fields accept numbers,
/// numeric strings or `null`; anything unusable reads as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Quantity (> 0 expected, not enforced).
    #[serde(rename = "cantidad", default, with = "lenient")]
    pub quantity: Decimal,
    /// Net price per unit (>= 0 expected).
    #[serde(rename = "precioUnitario", default, with = "lenient")]
    pub unit_price: Decimal,
    /// Line discount in percent, applied first.
    #[serde(rename = "descuentoPorcentaje", default, with = "lenient")]
    pub discount_percent: Decimal,
    /// Line discount in currency units, applied after the percentage.
    #[serde(rename = "descuentoFijo", default, with = "lenient")]
    pub discount_fixed: Decimal,
    /// Whether the line counts toward the VAT base.
    #[serde(
        rename = "aplicaIva",
        default = "coerce::default_true",
        deserialize_with = "coerce::true_unless_false"
    )]
    pub vat_applicable: bool,
    /// Display only; hidden lines still count toward every total.
    #[serde(
        rename = "visiblePdf",
        default = "coerce::default_true",
        deserialize_with = "coerce::true_unless_false"
    )]
    pub visible_on_document: bool,
    /// Origin flag: manual task line rather than a catalogue material.
    #[serde(rename = "esTareaManual", default)]
    pub manual_task: bool,
    /// Material name or free-text task description.
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItem {
    /// A VAT-applicable, visible line without discounts.
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            discount_fixed: Decimal::ZERO,
            vat_applicable: true,
            visible_on_document: true,
            manual_task: false,
            description: None,
        }
    }
}

/// Document-level discount and VAT settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDiscountConfig {
    #[serde(rename = "descuentoGlobalPorcentaje", default, with = "lenient")]
    pub global_discount_percent: Decimal,
    #[serde(rename = "descuentoGlobalFijo", default, with = "lenient")]
    pub global_discount_fixed: Decimal,
    /// `true`: the global discount also reduces the VAT base.
    /// `false`: VAT is computed on the undiscounted base.
    #[serde(
        rename = "descuentoAntesIva",
        default = "coerce::default_true",
        deserialize_with = "coerce::true_unless_false"
    )]
    pub discount_before_vat: bool,
    #[serde(
        rename = "ivaHabilitado",
        default = "coerce::default_true",
        deserialize_with = "coerce::true_unless_false"
    )]
    pub vat_enabled: bool,
    /// VAT rate as a fraction (0.21 for 21 %).
    #[serde(rename = "tipoIva", default = "default_vat_rate", with = "lenient")]
    pub vat_rate: Decimal,
}

fn default_vat_rate() -> Decimal {
    VAT_RATE
}

impl Default for DocumentDiscountConfig {
    fn default() -> Self {
        Self {
            global_discount_percent: Decimal::ZERO,
            global_discount_fixed: Decimal::ZERO,
            discount_before_vat: true,
            vat_enabled: true,
            vat_rate: VAT_RATE,
        }
    }
}

/// Cost breakdown of a document, derived from its lines and settings.
///
/// Never stored on its own: recompute it whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Sum of line subtotals before the global discount.
    #[serde(with = "lenient")]
    pub subtotal_items: Decimal,
    /// Global discount percentage the totals were computed with.
    #[serde(rename = "descuentoPorcentaje", with = "lenient")]
    pub global_discount_percent: Decimal,
    /// Global fixed discount the totals were computed with.
    #[serde(rename = "descuentoFijo", with = "lenient")]
    pub global_discount_fixed: Decimal,
    /// Subtotal after the global discount.
    #[serde(with = "lenient")]
    pub subtotal: Decimal,
    /// `subtotal_items - subtotal`.
    #[serde(rename = "descuentoTotal", with = "lenient")]
    pub discount_total: Decimal,
    /// Amount the VAT rate is applied to.
    #[serde(rename = "baseIva", with = "lenient")]
    pub vat_base: Decimal,
    #[serde(rename = "iva", with = "lenient")]
    pub vat: Decimal,
    /// `subtotal + vat`.
    #[serde(with = "lenient")]
    pub total: Decimal,
}

/// Invoice totals at cent precision with the VAT share of every line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    #[serde(flatten)]
    pub totals: DocumentTotals,
    /// VAT share per input line, in input order; zero for lines outside
    /// the VAT base. Sums exactly to `totals.vat`.
    #[serde(rename = "cuotasIva", default, with = "coerce::lenient_seq")]
    pub line_vat: Vec<Decimal>,
}

/// A quote or invoice body: ordered lines plus document settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(flatten)]
    pub config: DocumentDiscountConfig,
}

impl Document {
    /// Full-precision totals, as shown while the document is edited.
    pub fn totals(&self) -> DocumentTotals {
        aggregate(&self.items, &self.config)
    }

    /// Cent-rounded totals with per-line VAT shares, as issued.
    pub fn settle(&self) -> InvoiceTotals {
        settle_invoice(&self.items, &self.config)
    }
}

/// A company or client record as far as invoicing is concerned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(rename = "nombre")]
    pub name: String,
    /// DNI, NIE or CIF as typed by the user.
    #[serde(default, alias = "dni")]
    pub nif: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "codigoPostal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "provincia", default)]
    pub province: Option<String>,
    #[serde(rename = "pais", default)]
    pub country: Option<String>,
}
