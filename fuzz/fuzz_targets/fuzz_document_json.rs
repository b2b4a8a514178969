#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding may fail; valuing a decoded document must not panic.
    if let Ok(doc) = serde_json::from_slice::<factura::Document>(data) {
        let totals = doc.totals();
        assert!(!totals.subtotal.is_sign_negative() || totals.subtotal.is_zero());
        let _ = doc.settle();
    }
});
