#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(n) = factura::parse_invoice_number(s) {
            let mut seq = factura::InvoiceNumberSequence::resume(&n.series, n.year, [s]);
            let _ = seq.next_number();
        }
    }
});
