use crate::nif::is_valid_tax_id;

use super::error::ValidationError;
use super::types::Party;

/// Check that the issuing company and the client carry the data an
/// invoice needs before one is issued.
///
/// Returns all validation errors found (not just the first).
pub fn validate_for_invoicing(company: Option<&Party>, client: &Party) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match company {
        Some(company) => validate_party(company, "company", &mut errors),
        None => errors.push(ValidationError::new(
            "company",
            "company details must be configured before issuing invoices",
        )),
    }
    validate_party(client, "client", &mut errors);

    errors
}

fn validate_party(party: &Party, prefix: &str, errors: &mut Vec<ValidationError>) {
    let required = [
        ("postal_code", &party.postal_code),
        ("province", &party.province),
        ("country", &party.country),
    ];
    for (field, value) in required {
        if is_blank(value.as_deref()) {
            errors.push(ValidationError::new(
                format!("{prefix}.{field}"),
                format!("{} is required for invoicing", field.replace('_', " ")),
            ));
        }
    }

    if !is_valid_tax_id(party.nif.as_deref()) {
        errors.push(ValidationError::new(
            format!("{prefix}.nif"),
            "NIF is not a valid DNI, NIE or CIF",
        ));
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
