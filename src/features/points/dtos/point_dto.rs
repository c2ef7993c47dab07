use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Admin form fields exactly as submitted.
///
/// Every field defaults to the empty string when absent from the request
/// body, so a failed submission can always be re-rendered with the values
/// the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPointForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

/// A sanitized and validated submission, safe to hand to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPoint {
    pub name: String,
    pub latitude: Decimal,
    pub longitude: Decimal,
}
