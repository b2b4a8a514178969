//! Spanish tax identifier validation (DNI, NIE, CIF).
//!
//! Values are normalized (whitespace and dashes removed, uppercased),
//! classified by shape, then checked against their control character.
//!
//! # Example
//!
//! ```
//! use factura::nif::*;
//!
//! assert!(is_valid_tax_id(Some("12345678Z")));
//! assert!(!is_valid_tax_id(Some("12345678A")));
//! // Blank input is left to a separate "required" check.
//! assert!(is_valid_tax_id(None));
//!
//! let id = TaxId::parse("x-1234567-l").unwrap();
//! assert_eq!(id.kind(), TaxIdKind::Nie);
//! assert_eq!(id.as_str(), "X1234567L");
//! ```

mod checksum;
mod validator;

pub use checksum::{
    CIF_CONTROL_LETTERS, DNI_LETTERS, cif_control_digit, dni_letter, nie_lead_digit,
};
pub use validator::{
    FieldError, TaxId, TaxIdError, TaxIdKind, detect_kind, is_valid_tax_id, nif_validator,
    normalize,
};
