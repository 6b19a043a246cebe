//! This module provides the implementation for an instrument controlled via TCP/IP.
//!
//! It includes a blocking implementation of the [`InstrumentInterface`](crate::InstrumentInterface)
//! trait using the [`std::net::TcpStream`] struct, e.g., for a GPIB-Ethernet gateway.

use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::{Instrument, InstrumentError};

/// A blocking TCP/IP interface using the [`std::net::TcpStream`] struct.
#[derive(Debug)]
pub struct TcpIpInterface {}

impl TcpIpInterface {
    /// Try to create a new TCP/IP instrument interface.
    ///
    /// The terminator is by default set to `"\n"`, but can be changed using the `set_terminator`
    /// function. Not that the terminator is automatically appended to commands and reading
    /// responses will read until the terminator is found.
    ///
    /// Read and write timeouts of the stream are set to three seconds. The reason for this is that
    /// we do not want to infinitely block, as this is not wanted for instrument communications,
    /// especially when they are blocking.
    ///
    /// # Arguments
    /// * `sock_addr` - Socket address.
    pub fn simple<A: ToSocketAddrs>(
        sock_addr: A,
    ) -> Result<Instrument<TcpStream>, InstrumentError> {
        let stream = TcpStream::connect(sock_addr)?;
        let timeout = Duration::from_secs(3);
        stream.set_write_timeout(Some(timeout))?;
        stream.set_read_timeout(Some(timeout))?;
        log::debug!("Connected to {:?}", stream.peer_addr());
        Ok(Instrument::new(stream, timeout))
    }
}
