use rust_decimal::Decimal;

use super::error::FacturaError;
use super::types::*;

/// Upper bound on lines per document.
pub const MAX_LINES: usize = 10_000;

/// Builder for quote and invoice bodies.
///
/// ```
/// use factura::core::*;
/// use rust_decimal_macros::dec;
///
/// let doc = DocumentBuilder::new()
///     .add_line(LineItemBuilder::new(dec!(2), dec!(10)).build())
///     .add_line(LineItemBuilder::new(dec!(1), dec!(5)).build())
///     .global_discount_percent(dec!(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(doc.totals().total, dec!(27.225));
/// ```
pub struct DocumentBuilder {
    items: Vec<LineItem>,
    config: DocumentDiscountConfig,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            config: DocumentDiscountConfig::default(),
        }
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.items.push(line);
        self
    }

    pub fn global_discount_percent(mut self, percent: Decimal) -> Self {
        self.config.global_discount_percent = percent;
        self
    }

    pub fn global_discount_fixed(mut self, amount: Decimal) -> Self {
        self.config.global_discount_fixed = amount;
        self
    }

    /// Charge VAT on the undiscounted base; the global discount then only
    /// reduces the subtotal.
    pub fn discount_after_vat(mut self) -> Self {
        self.config.discount_before_vat = false;
        self
    }

    pub fn vat_enabled(mut self, enabled: bool) -> Self {
        self.config.vat_enabled = enabled;
        self
    }

    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.config.vat_rate = rate;
        self
    }

    /// Build the document. Empty documents are allowed (a quote being
    /// edited starts with no lines).
    pub fn build(self) -> Result<Document, FacturaError> {
        if self.items.len() > MAX_LINES {
            return Err(FacturaError::Builder(format!(
                "document cannot have more than {MAX_LINES} line items"
            )));
        }
        if self.config.vat_rate.is_sign_negative() {
            return Err(FacturaError::Builder(format!(
                "VAT rate must not be negative, got {}",
                self.config.vat_rate
            )));
        }

        Ok(Document {
            items: self.items,
            config: self.config,
        })
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            item: LineItem::new(quantity, unit_price),
        }
    }

    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.item.discount_percent = percent;
        self
    }

    pub fn discount_fixed(mut self, amount: Decimal) -> Self {
        self.item.discount_fixed = amount;
        self
    }

    /// Keep the line out of the VAT base.
    pub fn vat_exempt(mut self) -> Self {
        self.item.vat_applicable = false;
        self
    }

    /// Leave the line off the rendered document; it still counts.
    pub fn hidden(mut self) -> Self {
        self.item.visible_on_document = false;
        self
    }

    pub fn manual_task(mut self, description: impl Into<String>) -> Self {
        self.item.manual_task = true;
        self.item.description = Some(description.into());
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.item.description = Some(desc.into());
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

/// Builder for Party (company or client).
pub struct PartyBuilder {
    party: Party,
}

impl PartyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            party: Party {
                name: name.into(),
                ..Party::default()
            },
        }
    }

    pub fn nif(mut self, nif: impl Into<String>) -> Self {
        self.party.nif = Some(nif.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.party.email = Some(email.into());
        self
    }

    pub fn address(
        mut self,
        postal_code: impl Into<String>,
        province: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.party.postal_code = Some(postal_code.into());
        self.party.province = Some(province.into());
        self.party.country = Some(country.into());
        self
    }

    pub fn build(self) -> Party {
        self.party
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults() {
        let doc = DocumentBuilder::new().build().unwrap();
        assert!(doc.items.is_empty());
        assert_eq!(doc.config, DocumentDiscountConfig::default());
    }

    #[test]
    fn line_builder_sets_flags() {
        let line = LineItemBuilder::new(dec!(1), dec!(40))
            .discount_percent(dec!(5))
            .discount_fixed(dec!(2))
            .vat_exempt()
            .hidden()
            .manual_task("Montaje")
            .build();
        assert_eq!(line.discount_percent, dec!(5));
        assert_eq!(line.discount_fixed, dec!(2));
        assert!(!line.vat_applicable);
        assert!(!line.visible_on_document);
        assert!(line.manual_task);
        assert_eq!(line.description.as_deref(), Some("Montaje"));
    }

    #[test]
    fn rejects_negative_vat_rate() {
        let err = DocumentBuilder::new().vat_rate(dec!(-0.21)).build();
        assert!(matches!(err, Err(FacturaError::Builder(_))));
    }

    #[test]
    fn rejects_too_many_lines() {
        let mut builder = DocumentBuilder::new();
        for _ in 0..=MAX_LINES {
            builder = builder.add_line(LineItem::new(dec!(1), dec!(1)));
        }
        assert!(builder.build().is_err());
    }

    #[test]
    fn after_vat_toggle() {
        let doc = DocumentBuilder::new().discount_after_vat().build().unwrap();
        assert!(!doc.config.discount_before_vat);
    }
}
