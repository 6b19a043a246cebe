//! Settings of the PM2534 that are exchanged as fixed tokens with the instrument.

use std::{fmt::Display, str::FromStr};

use instrumentrs::InstrumentError;

use crate::utils::format_sci;

/// Measurement functions of the PM2534.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// DC voltage in volts.
    Vdc,
    /// AC voltage in volts.
    Vac,
    /// Resistance (2-wire) in ohms.
    Rtw,
    /// Resistance (4-wire) in ohms.
    Rfw,
    /// DC current in amperes.
    Idc,
    /// AC current in amperes.
    Iac,
    /// Temperature in degrees Celsius.
    Tdc,
}

impl Function {
    /// All functions the PM2534 supports.
    pub const ALL: [Function; 7] = [
        Function::Vdc,
        Function::Vac,
        Function::Rtw,
        Function::Rfw,
        Function::Idc,
        Function::Iac,
        Function::Tdc,
    ];

    /// Convert the function to the string that is used in commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Vdc => "VDC",
            Function::Vac => "VAC",
            Function::Rtw => "RTW",
            Function::Rfw => "RFW",
            Function::Idc => "IDC",
            Function::Iac => "IAC",
            Function::Tdc => "TDC",
        }
    }

    /// Convert a function token returned by the instrument to a `Function`.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        Self::from_token(value)
            .ok_or_else(|| InstrumentError::ResponseParseError(value.to_string()))
    }

    fn from_token(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.as_str() == value)
    }
}

impl FromStr for Function {
    type Err = InstrumentError;

    /// Parse a function from its command token, e.g., `"VDC"`. Tokens are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            InstrumentError::InvalidArgument(format!(
                "Unknown function '{s}'. Valid functions are VDC, VAC, RTW, RFW, IDC, IAC, TDC."
            ))
        })
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Vdc => write!(f, "DC voltage"),
            Function::Vac => write!(f, "AC voltage"),
            Function::Rtw => write!(f, "Resistance (2-wire)"),
            Function::Rfw => write!(f, "Resistance (4-wire)"),
            Function::Idc => write!(f, "DC current"),
            Function::Iac => write!(f, "AC current"),
            Function::Tdc => write!(f, "Temperature"),
        }
    }
}

/// Trigger sources of the PM2534.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    /// Internal trigger.
    Internal,
    /// IEEE bus trigger.
    Bus,
    /// External trigger.
    External,
    /// Keyboard trigger.
    Keyboard,
}

impl TriggerSource {
    /// All trigger sources the PM2534 supports.
    pub const ALL: [TriggerSource; 4] = [
        TriggerSource::Internal,
        TriggerSource::Bus,
        TriggerSource::External,
        TriggerSource::Keyboard,
    ];

    /// Convert the trigger source to the string that is used in commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Internal => "I",
            TriggerSource::Bus => "B",
            TriggerSource::External => "E",
            TriggerSource::Keyboard => "K",
        }
    }

    /// Convert a trigger token returned by the instrument to a `TriggerSource`.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        Self::from_token(value)
            .ok_or_else(|| InstrumentError::ResponseParseError(value.to_string()))
    }

    fn from_token(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|src| src.as_str() == value)
    }
}

impl FromStr for TriggerSource {
    type Err = InstrumentError;

    /// Parse a trigger source from its single letter command token, e.g., `"B"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            InstrumentError::InvalidArgument(format!(
                "Unknown trigger source '{s}'. Valid trigger sources are I, B, E, K."
            ))
        })
    }
}

impl TryFrom<char> for TriggerSource {
    type Error = InstrumentError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        value.to_string().parse()
    }
}

impl Display for TriggerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerSource::Internal => write!(f, "Internal trigger"),
            TriggerSource::Bus => write!(f, "IEEE bus trigger"),
            TriggerSource::External => write!(f, "External trigger"),
            TriggerSource::Keyboard => write!(f, "Keyboard trigger"),
        }
    }
}

/// The measurement range of the PM2534.
///
/// Ranges are 3 times powers of ten, however, the instrument picks a reasonable range for any
/// value in the ballpark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range {
    /// Automatic range selection.
    Auto,
    /// Fixed range in the unit of the current function.
    Value(f64),
}

impl Range {
    /// Convert the range to the string that is used in commands.
    ///
    /// Fixed ranges are formatted in scientific notation, e.g., `3.000E+00`. Ranges that are not
    /// finite cannot be sent to the instrument and return an error.
    pub(crate) fn to_cmd_str(self) -> Result<String, InstrumentError> {
        match self {
            Range::Auto => Ok("AUTO".to_string()),
            Range::Value(value) if value.is_finite() => Ok(format_sci(value)),
            Range::Value(value) => Err(InstrumentError::InvalidArgument(format!(
                "Range must be a finite number, got {value}."
            ))),
        }
    }

    /// Convert a range token returned by the instrument to a `Range`.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        if value == "AUTO" {
            return Ok(Range::Auto);
        }
        value
            .parse::<f64>()
            .map(Range::Value)
            .map_err(|_| InstrumentError::ResponseParseError(value.to_string()))
    }
}

impl From<f64> for Range {
    fn from(value: f64) -> Self {
        Range::Value(value)
    }
}

impl FromStr for Range {
    type Err = InstrumentError;

    /// Parse a range from a string. The only string that is accepted is `"AUTO"` (in any case),
    /// fixed ranges must be given as a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("AUTO") {
            Ok(Range::Auto)
        } else {
            Err(InstrumentError::InvalidArgument(format!(
                "Unknown value for range: '{s}'."
            )))
        }
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Range::Auto => write!(f, "AUTO"),
            Range::Value(value) => write!(f, "{value}"),
        }
    }
}
