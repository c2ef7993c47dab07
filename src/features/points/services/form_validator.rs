//! Sanitization and validation for the admin point form.
//!
//! Rules are independent and every violation is collected, so the form can
//! surface all problems in one round trip. Coordinates are parsed as
//! fixed-point decimals; floats never enter the pipeline.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::features::points::dtos::{RawPointForm, ValidatedPoint};
use crate::shared::validation::sanitize_text;

/// Sanitize every submitted field. The output always carries all three keys
/// so the caller can re-render the form with prior input on failure.
pub fn sanitize(input: &RawPointForm) -> RawPointForm {
    RawPointForm {
        name: sanitize_text(&input.name),
        latitude: sanitize_text(&input.latitude),
        longitude: sanitize_text(&input.longitude),
    }
}

/// Validate a sanitized form. Returns the typed point on success, otherwise
/// every violation found.
pub fn validate(form: &RawPointForm) -> Result<ValidatedPoint, Vec<String>> {
    let mut errors = Vec::new();

    if form.name.is_empty() {
        errors.push("Name is required.".to_string());
    }

    let latitude = parse_coordinate(
        &form.latitude,
        Decimal::from(-90),
        Decimal::from(90),
        "Latitude must be a number.",
        "Latitude must be between -90 and 90.",
        &mut errors,
    );

    let longitude = parse_coordinate(
        &form.longitude,
        Decimal::from(-180),
        Decimal::from(180),
        "Longitude must be a number.",
        "Longitude must be between -180 and 180.",
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    // Both coordinates parsed or we would have returned above.
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(ValidatedPoint {
            name: form.name.clone(),
            latitude,
            longitude,
        }),
        _ => Err(vec!["Coordinates could not be parsed.".to_string()]),
    }
}

/// Sanitize then validate. Always returns the sanitized form alongside the
/// outcome so failed submissions keep the user's input.
pub fn check(input: &RawPointForm) -> (RawPointForm, Result<ValidatedPoint, Vec<String>>) {
    let sanitized = sanitize(input);
    let outcome = validate(&sanitized);
    (sanitized, outcome)
}

fn parse_coordinate(
    raw: &str,
    min: Decimal,
    max: Decimal,
    not_a_number: &str,
    out_of_range: &str,
    errors: &mut Vec<String>,
) -> Option<Decimal> {
    if raw.is_empty() {
        errors.push(not_a_number.to_string());
        return None;
    }
    match Decimal::from_str(raw) {
        Ok(value) if value < min || value > max => {
            errors.push(out_of_range.to_string());
            None
        }
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(not_a_number.to_string());
            None
        }
    }
}
