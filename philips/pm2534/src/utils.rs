//! Utilities for parsing responses and formatting arguments of the PM2534.

use instrumentrs::InstrumentError;

/// Get the value token of a query response.
///
/// The PM2534 echoes the mnemonic in front of the value, e.g., `"FNC VDC"`. The value is the last
/// whitespace delimited token of the line. A line without any whitespace has no value token and
/// cannot be parsed.
pub(crate) fn value_token(resp: &str) -> Result<&str, InstrumentError> {
    resp.trim_end()
        .rsplit_once(char::is_whitespace)
        .map(|(_, value)| value)
        .ok_or_else(|| InstrumentError::ResponseParseError(resp.to_string()))
}

/// Parse the value token of a query response into any type that implements `FromStr`.
pub(crate) fn parse_value<F: std::str::FromStr>(resp: &str) -> Result<F, InstrumentError> {
    value_token(resp)?
        .parse::<F>()
        .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))
}

/// Format a float in scientific notation with three decimals and a signed two digit exponent.
///
/// This is the format the PM2534 expects for numeric arguments, e.g., `3.000E+00`.
pub(crate) fn format_sci(value: f64) -> String {
    let formatted = format!("{value:.3E}");
    match formatted.split_once('E') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or_default();
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}E{sign}{:02}", exp.unsigned_abs())
        }
        None => formatted,
    }
}

/// Ensure that an integer setting lies within `[min, max]`.
pub(crate) fn check_int_range(value: u8, min: u8, max: u8) -> Result<u8, InstrumentError> {
    if !(min..=max).contains(&value) {
        log::warn!("Rejected value {value}, allowed range is [{min}, {max}]");
        return Err(InstrumentError::IntValueOutOfRange {
            value: value.into(),
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(value)
}
