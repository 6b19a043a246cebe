//! This module provides the implementation for an instrument controlled via a serial port.
//!
//! It includes a blocking implementation of the [`InstrumentInterface`](crate::InstrumentInterface)
//! trait using the `serialport` crate. A GPIB-USB adapter that runs in transparent mode shows up
//! as such a serial port.

use std::time::Duration;

use serialport::{SerialPort, SerialPortBuilder};

use crate::{Instrument, InstrumentError};

/// A blocking serial port interface using the `serialport` crate.
///
/// This is a thin constructor that returns an [`Instrument`] wrapping the opened serial port.
#[derive(Debug)]
pub struct SerialInterface {}

impl SerialInterface {
    /// Try to create an instrument interface with a simple serial port configuration.
    ///
    /// Only the port and the baud rate are configured, everything else is left at the
    /// `serialport` defaults (8 data bits, no parity, one stop bit). The timeout is set to three
    /// seconds.
    ///
    /// # Arguments
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    /// * `baud` - The baud rate.
    pub fn simple(
        port: &str,
        baud: u32,
    ) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let spb = serialport::new(port, baud).timeout(Duration::from_secs(3));
        SerialInterface::full(spb)
    }

    /// Try to create an instrument interface from a fully configured serial port builder.
    ///
    /// The timeout of the builder is used as the timeout of the instrument interface. The
    /// terminator is by default set to `"\n"`.
    ///
    /// # Arguments
    /// * `spb` - A `SerialPortBuilder` to configure the serial port. See
    ///   [`serialport::SerialPortBuilder`] and the [`serialport::new`] function for more details.
    pub fn full(
        spb: SerialPortBuilder,
    ) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let port = spb.open()?;
        let timeout = port.timeout();
        log::debug!("Opened serial port {:?} with timeout {timeout:?}", port.name());
        Ok(Instrument::new(port, timeout))
    }
}
