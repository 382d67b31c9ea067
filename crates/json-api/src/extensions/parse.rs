//! Request field parsing helpers.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse stringly-typed request fields, mapping failures to 400s.
pub(crate) trait ParseFieldExt {
    fn into_money(self, field: &str) -> Result<Decimal, StatusError>;

    fn into_timestamp(self, field: &str) -> Result<Timestamp, StatusError>;
}

impl ParseFieldExt for &str {
    fn into_money(self, field: &str) -> Result<Decimal, StatusError> {
        Decimal::from_str(self.trim()).or_400(&format!("could not parse \"{field}\" as a decimal"))
    }

    fn into_timestamp(self, field: &str) -> Result<Timestamp, StatusError> {
        self.parse::<Timestamp>()
            .or_400(&format!("could not parse \"{field}\" as a timestamp"))
    }
}
