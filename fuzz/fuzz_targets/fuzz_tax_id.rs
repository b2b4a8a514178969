#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let valid = factura::nif::is_valid_tax_id(Some(s));
        // The field validator must agree with the predicate.
        assert_eq!(valid, factura::nif::nif_validator(Some(s)).is_none());
        if let Ok(id) = factura::nif::TaxId::parse(s) {
            assert!(factura::nif::is_valid_tax_id(Some(id.as_str())));
        }
    }
});
