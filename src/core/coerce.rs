//! Numeric coercion at the crate boundary.
//!
//! Form values reach the crate as JSON numbers, numeric strings, `null`,
//! or not at all. Anything that does not denote a finite number becomes
//! zero, so a single bad field cannot poison a document total.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::Serializer;
use tracing::debug;

/// Convert a floating point form value to a [`Decimal`].
///
/// `NaN`, infinities and magnitudes outside the `Decimal` range yield zero.
/// Finite values go through their shortest round-trip representation, so
/// `0.1` becomes exactly `0.1` rather than its binary approximation.
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        debug!(value, "non-finite amount coerced to zero");
        return Decimal::ZERO;
    }
    match parse_decimal(&value.to_string()) {
        Some(d) => d,
        None => {
            debug!(value, "amount out of range coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Parse a textual form value. Blank input is zero, as is anything
/// that is not a plain or scientific-notation number.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    match parse_decimal(trimmed) {
        Some(d) => d,
        None => {
            debug!(input = trimmed, "unparsable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        Ok(amount_from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Ok(parse_amount(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Decimal, E> {
        debug!(value = v, "boolean amount coerced to zero");
        Ok(Decimal::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Decimal, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// serde adapter for amount fields: reads leniently, writes JSON numbers.
///
/// Use together with `#[serde(default)]` so a missing field is zero too.
pub mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(json_number(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// [`lenient`] for lists of amounts, such as per-line VAT shares.
pub mod lenient_seq {
    use super::*;

    pub fn serialize<S: Serializer>(values: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(json_number))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Decimal>, D::Error> {
        let amounts = Option::<Vec<LenientAmount>>::deserialize(deserializer)?;
        Ok(amounts
            .unwrap_or_default()
            .into_iter()
            .map(|LenientAmount(d)| d)
            .collect())
    }
}

struct LenientAmount(Decimal);

impl<'de> Deserialize<'de> for LenientAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor).map(LenientAmount)
    }
}

/// Goes through the decimal text so the result is the `f64` nearest
/// to the exact value.
fn json_number(value: &Decimal) -> f64 {
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or(0.0)
}

pub(crate) fn default_true() -> bool {
    true
}

/// Optional flags default to `true` when missing or `null`.
pub(crate) fn true_unless_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}
