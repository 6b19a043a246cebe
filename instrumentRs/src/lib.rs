//! InstrumentRs: Talk to your (scientific) equipment from with Rust
//!
//! The InstrumentRs library provides standardized interfaces to talk to scientific equipment via
//! various different ports. To do so, it provides an [`InstrumentInterface`] trait and its
//! implementations. Furthermore, we also provide an [`InstrumentError`] error type that instrument
//! drivers should return.
//!
//! # Currently implemented interfaces are:
//! - Any port that implements [`std::io::Read`] and [`std::io::Write`] via [`Instrument`].
//! - Serial (blocking) using the [`serialport`] crate, see [`SerialInterface`]. Requires the
//!   `serial` feature.
//! - TCP/IP (blocking) using [`std::net::TcpStream`], see [`TcpIpInterface`].
//! - A [`LoopbackInterface`] to test your drivers without hardware.
//!
//! GPIB instruments are reached through an adapter that presents the bus as one of the ports
//! above, e.g., a GPIB-USB adapter in transparent mode or a GPIB-Ethernet gateway. Addressing the
//! instrument on the bus is left to the adapter.
//!
//! # Logging
//!
//! All traffic is logged with the [`log`] facade on `trace` level. InstrumentRs never installs a
//! logger itself, this is up to your application.
//!
//! # License
//!
//! Licensed under either of
//!
//! - Apache License, Version 2.0 ([LICENSE-APACHE](http://www.apache.org/licenses/LICENSE-2.0))
//! - MIT license ([LICENSE-MIT](http://opensource.org/licenses/MIT))
//!
//! at your option.

#![warn(missing_docs)]

mod instrument;
mod loopback;
#[cfg(feature = "serial")]
mod serial;
mod tcp_ip;

pub use instrument::{Instrument, InstrumentError};
pub use loopback::LoopbackInterface;
#[cfg(feature = "serial")]
pub use serial::SerialInterface;
pub use tcp_ip::TcpIpInterface;

use std::time::{Duration, Instant};

/// The `InstrumentInterface` trait defines the interface for controlling instruments.
///
/// Implementors only have to provide the two raw methods [`InstrumentInterface::read_exact`] and
/// [`InstrumentInterface::write_raw`]. Everything line based, i.e., sending commands, reading
/// responses until the terminator, and querying, is built on top of these two.
pub trait InstrumentInterface {
    /// Read exactly as many bytes as fit into `buf` from the instrument.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError>;

    /// Write raw bytes to the instrument and flush the interface.
    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError>;

    /// Get the terminator that is appended to commands and ends responses.
    fn get_terminator(&self) -> &str {
        "\n"
    }

    /// Set the terminator of an interface from a `&str`.
    ///
    /// # Arguments:
    /// - `_terminator` - A string slice that will be used as the terminator for commands
    fn set_terminator(&mut self, _terminator: &str) {}

    /// Get the timeout that is used when waiting for a response.
    fn get_timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Write a string to the instrument as is, i.e., without appending the terminator.
    fn write(&mut self, data: &str) -> Result<(), InstrumentError> {
        self.write_raw(data.as_bytes())
    }

    /// Send a command to the instrument.
    ///
    /// This function takes the command, appends the terminator, and writes it to the instrument.
    ///
    /// # Arguments:
    /// - `cmd` - A string slice that will be sent to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        log::trace!("Sending command: {cmd}");
        let cmd = format!("{cmd}{}", self.get_terminator());
        self.write(&cmd)
    }

    /// Read from the instrument until the response ends with the terminator.
    ///
    /// The response is read byte by byte. If no terminator is encountered, the function will
    /// block until the timeout is reached and then return [`InstrumentError::Timeout`]. The bytes
    /// are decoded once the terminator arrived, invalid UTF-8 sequences are logged and skipped.
    /// The returned response is trimmed of trailing whitespace, which includes the terminator.
    fn read_until_terminator(&mut self) -> Result<String, InstrumentError> {
        let timeout = self.get_timeout();
        let mut response: Vec<u8> = Vec::new();
        let mut single_buf = [0u8];

        let tic = Instant::now();
        while tic.elapsed() < timeout {
            self.read_exact(&mut single_buf)?;
            response.push(single_buf[0]);
            if response.ends_with(self.get_terminator().as_bytes()) {
                let mut retval = String::with_capacity(response.len());
                for chunk in response.utf8_chunks() {
                    retval.push_str(chunk.valid());
                    if !chunk.invalid().is_empty() {
                        log::warn!("Received invalid UTF-8 data: {:?}", chunk.invalid());
                    }
                }
                let retval = retval.trim_end().to_string();
                log::trace!("Received response: {retval}");
                return Ok(retval);
            }
        }

        Err(InstrumentError::Timeout(timeout))
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// This function uses [`InstrumentInterface::sendcmd`] to send the command and then
    /// [`InstrumentInterface::read_until_terminator`] to get the response. A timeout is reported
    /// as [`InstrumentError::TimeoutQuery`] containing the command that was sent.
    ///
    /// # Arguments
    /// * `cmd` - The command to send to the instrument for which we expect a response.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.sendcmd(cmd)?;
        self.read_until_terminator().map_err(|err| match err {
            InstrumentError::Timeout(timeout) => InstrumentError::TimeoutQuery {
                query: cmd.to_string(),
                timeout,
            },
            err => err,
        })
    }
}
