use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::checksum::{cif_matches, dni_matches, nie_matches};

/// Which Spanish identifier a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxIdKind {
    /// Documento Nacional de Identidad: 8 digits + control letter.
    Dni,
    /// Número de Identidad de Extranjero: X/Y/Z + 7 digits + control letter.
    Nie,
    /// Legal entity code: entity letter + 7 digits + control digit or letter.
    Cif,
}

impl TaxIdKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dni => "DNI",
            Self::Nie => "NIE",
            Self::Cif => "CIF",
        }
    }
}

impl fmt::Display for TaxIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a tax identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxIdError {
    #[error("tax id is empty")]
    Empty,

    #[error("tax id must have 9 characters after normalization, got {0}")]
    Length(usize),

    #[error("'{0}' is neither a DNI, a NIE nor a CIF")]
    UnknownFormat(String),

    #[error("'{value}' has an invalid {kind} control character")]
    Checksum { kind: TaxIdKind, value: String },
}

impl TaxIdError {
    /// Short machine-readable reason, free of the identifier itself.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Length(_) => "length",
            Self::UnknownFormat(_) => "format",
            Self::Checksum { .. } => "checksum",
        }
    }
}

/// A checksum-verified DNI, NIE or CIF in normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId {
    value: String,
    kind: TaxIdKind,
}

impl TaxId {
    /// Normalize, classify and checksum `input`.
    pub fn parse(input: &str) -> Result<Self, TaxIdError> {
        let value = normalize(input);
        if value.is_empty() {
            return Err(TaxIdError::Empty);
        }
        let kind = classify(&value)?;

        let bytes = value.as_bytes();
        let valid = match kind {
            TaxIdKind::Cif => cif_matches(bytes),
            TaxIdKind::Nie => nie_matches(bytes),
            TaxIdKind::Dni => dni_matches(bytes),
        };
        if !valid {
            return Err(TaxIdError::Checksum { kind, value });
        }
        Ok(Self { value, kind })
    }

    pub fn kind(&self) -> TaxIdKind {
        self.kind
    }

    /// The normalized 9-character identifier.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> Self {
        id.value
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Strip whitespace and dashes, uppercase the rest.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Format-only classification of a raw identifier (no checksum).
pub fn detect_kind(input: &str) -> Option<TaxIdKind> {
    classify(&normalize(input)).ok()
}

fn classify(n: &str) -> Result<TaxIdKind, TaxIdError> {
    if n.chars().count() != 9 {
        return Err(TaxIdError::Length(n.chars().count()));
    }
    if !n.is_ascii() {
        return Err(TaxIdError::UnknownFormat(n.into()));
    }

    type Pattern = fn(&[u8]) -> bool;
    // Disjoint by construction: CIF entity letters exclude X/Y/Z and digits.
    let patterns: &[(TaxIdKind, Pattern)] = &[
        (TaxIdKind::Cif, |n| {
            is_cif_entity_letter(n[0])
                && n[1..8].iter().all(u8::is_ascii_digit)
                && matches!(n[8], b'0'..=b'9' | b'A'..=b'J')
        }),
        (TaxIdKind::Nie, |n| {
            matches!(n[0], b'X' | b'Y' | b'Z')
                && n[1..8].iter().all(u8::is_ascii_digit)
                && n[8].is_ascii_uppercase()
        }),
        (TaxIdKind::Dni, |n| {
            n[..8].iter().all(u8::is_ascii_digit) && n[8].is_ascii_uppercase()
        }),
    ];

    let bytes = n.as_bytes();
    patterns
        .iter()
        .find(|(_, matches)| matches(bytes))
        .map(|(kind, _)| *kind)
        .ok_or_else(|| TaxIdError::UnknownFormat(n.into()))
}

/// Entity-type letters a CIF may start with: A-H, J-N, P-S, U, V, W.
fn is_cif_entity_letter(b: u8) -> bool {
    matches!(b, b'A'..=b'H' | b'J'..=b'N' | b'P'..=b'S' | b'U' | b'V' | b'W')
}

/// Validate a DNI, NIE or CIF as typed in a client record.
///
/// A missing or blank value is valid: whether the field is required is
/// decided by the caller. Any non-blank value must normalize to a
/// well-formed identifier with a correct control character.
pub fn is_valid_tax_id(value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return true;
    };
    if raw.trim().is_empty() {
        return true;
    }
    match TaxId::parse(raw) {
        Ok(_) => true,
        Err(e) => {
            debug!(reason = e.code(), "tax id rejected");
            false
        }
    }
}

/// Error marker produced by form-field validators.
///
/// Serializes as `{"nifInvalido": {"value": "<raw input>"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum FieldError {
    #[serde(rename = "nifInvalido")]
    #[error("invalid NIF '{value}'")]
    InvalidTaxId { value: String },
}

/// Field validator for NIF inputs: `None` when valid or empty, otherwise
/// an error marker carrying the raw value.
pub fn nif_validator(value: Option<&str>) -> Option<FieldError> {
    if is_valid_tax_id(value) {
        return None;
    }
    Some(FieldError::InvalidTaxId {
        value: value.unwrap_or_default().to_string(),
    })
}
