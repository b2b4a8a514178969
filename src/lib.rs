//! # factura
//!
//! Valuation core of a Spanish quoting and invoicing application:
//! line discounts, document totals with IVA, invoice settlement and
//! numbering, and DNI/NIE/CIF validation.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Values typed into forms are coerced at the boundary (see
//! [`core::coerce`]), so malformed input reads as zero instead of
//! poisoning a total.
//!
//! ## Quick Start
//!
//! ```rust
//! use factura::core::*;
//! use factura::nif::is_valid_tax_id;
//! use rust_decimal_macros::dec;
//!
//! let lines = vec![
//!     LineItemBuilder::new(dec!(2), dec!(10)).build(),
//!     LineItemBuilder::new(dec!(1), dec!(5)).build(),
//! ];
//! let config = DocumentDiscountConfig {
//!     global_discount_percent: dec!(10),
//!     ..DocumentDiscountConfig::default()
//! };
//!
//! let totals = aggregate(&lines, &config);
//! assert_eq!(totals.subtotal, dec!(22.5));
//! assert_eq!(totals.vat, dec!(4.725));
//! assert_eq!(totals.total, dec!(27.225));
//!
//! assert!(is_valid_tax_id(Some("12345678Z")));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line valuation, document totals, invoice settlement, numbering, record checks |
//! | `nif` | DNI/NIE/CIF validation only |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "nif")]
pub mod nif;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
