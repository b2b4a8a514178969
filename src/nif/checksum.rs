//! Control character algorithms for DNI, NIE and CIF.
//!
//! All functions expect an already normalized, format-checked 9-byte
//! identifier; classification lives in the validator.

/// DNI/NIE control letters indexed by `number mod 23`.
pub const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// CIF control letters indexed by the control digit.
pub const CIF_CONTROL_LETTERS: &[u8; 10] = b"JABCDEFGHI";

/// Digit sum of `2 × d` for every digit `d`.
const CIF_DOUBLED_DIGIT_SUM: [u32; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Control letter for a DNI number (or a NIE number with its lead digit).
pub fn dni_letter(number: u32) -> char {
    DNI_LETTERS[(number % 23) as usize] as char
}

/// Lead digit a NIE prefix stands for (X=0, Y=1, Z=2).
pub fn nie_lead_digit(prefix: char) -> Option<u32> {
    match prefix {
        'X' => Some(0),
        'Y' => Some(1),
        'Z' => Some(2),
        _ => None,
    }
}

/// Control digit of the 7 central CIF digits.
///
/// Digits at even 0-based positions contribute the digit sum of their
/// double, digits at odd positions contribute themselves. Returns `None`
/// unless the input is exactly 7 ASCII digits.
pub fn cif_control_digit(digits: &str) -> Option<u32> {
    if digits.len() != 7 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = digits
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 0 {
                CIF_DOUBLED_DIGIT_SUM[d as usize]
            } else {
                d
            }
        })
        .sum();
    Some((10 - sum % 10) % 10)
}

fn digits_value(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

pub(crate) fn dni_matches(n: &[u8]) -> bool {
    let number = digits_value(&n[..8]);
    dni_letter(number) as u8 == n[8]
}

pub(crate) fn nie_matches(n: &[u8]) -> bool {
    let Some(lead) = nie_lead_digit(n[0] as char) else {
        return false;
    };
    let number = lead * 10_000_000 + digits_value(&n[1..8]);
    dni_letter(number) as u8 == n[8]
}

pub(crate) fn cif_matches(n: &[u8]) -> bool {
    // Format checks guarantee ASCII, so the slice is valid UTF-8.
    let Some(control) = std::str::from_utf8(&n[1..8])
        .ok()
        .and_then(cif_control_digit)
    else {
        return false;
    };
    match n[8] {
        b @ b'0'..=b'9' => u32::from(b - b'0') == control,
        b => CIF_CONTROL_LETTERS[control as usize] == b,
    }
}
