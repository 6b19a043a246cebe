//! Module to attach units to the readings of the PM2534.

use std::fmt::Display;

use measurements::{Current, Resistance, Temperature, Voltage};

use crate::Function;

/// A reading of the PM2534 together with the unit of the function it was taken with.
#[derive(Debug, Clone, PartialEq)]
pub enum Pm2534Measurement {
    /// Measurement of an AC or DC voltage.
    Voltage(Voltage),
    /// Measurement of an AC or DC current.
    Current(Current),
    /// Measurement of a 2-wire or 4-wire resistance.
    Resistance(Resistance),
    /// Measurement of a temperature.
    Temperature(Temperature),
}

impl Pm2534Measurement {
    /// Attach the unit of the given function to a plain reading.
    ///
    /// The PM2534 returns voltages in volts, currents in amperes, resistances in ohms and
    /// temperatures in degrees Celsius.
    ///
    /// # Arguments
    /// - `function`: The function the reading was taken with.
    /// - `value`: The reading as returned by the instrument.
    pub fn from_reading(function: Function, value: f64) -> Self {
        match function {
            Function::Vdc | Function::Vac => Pm2534Measurement::Voltage(Voltage::from_volts(value)),
            Function::Idc | Function::Iac => {
                Pm2534Measurement::Current(Current::from_amperes(value))
            }
            Function::Rtw | Function::Rfw => {
                Pm2534Measurement::Resistance(Resistance::from_ohms(value))
            }
            Function::Tdc => Pm2534Measurement::Temperature(Temperature::from_celsius(value)),
        }
    }
}

impl Display for Pm2534Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pm2534Measurement::Voltage(v) => write!(f, "{v}"),
            Pm2534Measurement::Current(c) => write!(f, "{c}"),
            Pm2534Measurement::Resistance(r) => write!(f, "{r}"),
            Pm2534Measurement::Temperature(t) => write!(f, "{t}"),
        }
    }
}
