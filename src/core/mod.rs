//! Quote and invoice valuation, numbering and pre-issue record checks.
//!
//! Line subtotals feed the document aggregation; invoices are settled at
//! cent precision on top of it. Every amount is a [`rust_decimal::Decimal`].

mod aggregate;
mod builder;
pub mod coerce;
mod error;
mod numbering;
mod settlement;
mod types;
mod validation;
mod valuation;

pub use aggregate::aggregate;
pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use settlement::{INVOICE_SCALE, round_half_up, settle_invoice};
pub use types::*;
pub use validation::validate_for_invoicing;
pub use valuation::line_subtotal;
