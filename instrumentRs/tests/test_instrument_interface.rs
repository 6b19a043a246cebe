//! Tests for the default implementation of the [`InstrumentInterface`] trait.

use std::{collections::VecDeque, time::Duration};

use rstest::*;

use instrumentrs::{InstrumentError, InstrumentInterface};

/// Minimal interface that only implements the required methods.
///
/// Bytes written are collected in `written`, bytes read are taken from `to_read`.
struct TestInstrument {
    to_read: VecDeque<u8>,
    written: Vec<u8>,
}

impl InstrumentInterface for TestInstrument {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        for byte in buf.iter_mut() {
            *byte = self.to_read.pop_front().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "nothing left to read")
            })?;
        }
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.written.extend_from_slice(data);
        Ok(())
    }
}

fn crt_inst(to_read: &[u8]) -> TestInstrument {
    TestInstrument {
        to_read: to_read.iter().copied().collect(),
        written: Vec::new(),
    }
}

#[fixture]
fn inst() -> TestInstrument {
    crt_inst(b"")
}

#[rstest]
fn test_default_get_terminator(mut inst: TestInstrument) {
    assert_eq!(inst.get_terminator(), "\n");

    // default implementation ignores new terminators
    inst.set_terminator("\r\n");
    assert_eq!(inst.get_terminator(), "\n");
}

#[rstest]
fn test_default_get_timeout(inst: TestInstrument) {
    assert_eq!(inst.get_timeout(), Duration::from_secs(3));
}

/// `write` sends the string as is, `sendcmd` appends the terminator.
#[rstest]
fn test_default_write_sendcmd(mut inst: TestInstrument) {
    inst.write("X").unwrap();
    inst.sendcmd("NUL NEW").unwrap();
    assert_eq!(inst.written, b"XNUL NEW\n");
}

#[rstest]
fn test_default_query() {
    let mut inst = crt_inst(b"FNC VDC\n");
    assert_eq!(inst.query("FNC ?").unwrap(), "FNC VDC");
    assert_eq!(inst.written, b"FNC ?\n");
}

/// Responses are trimmed at the end, e.g., of a carriage return before the terminator.
#[rstest]
fn test_default_read_until_terminator_trims() {
    let mut inst = crt_inst(b"MSP 2 \r\n");
    assert_eq!(inst.read_until_terminator().unwrap(), "MSP 2");
}

/// Leading whitespace is part of the response.
#[rstest]
fn test_default_read_until_terminator_keeps_leading_whitespace() {
    let mut inst = crt_inst(b" FNC VDC\n");
    assert_eq!(inst.read_until_terminator().unwrap(), " FNC VDC");
}

/// Invalid UTF-8 bytes are skipped.
#[rstest]
fn test_default_read_until_terminator_invalid_utf8() {
    let mut inst = crt_inst(b"DSP \xffON\n");
    assert_eq!(inst.read_until_terminator().unwrap(), "DSP ON");
}

/// Multi-byte characters are decoded as a whole.
#[rstest]
fn test_default_read_until_terminator_multibyte() {
    let mut inst = crt_inst("TMP 21.5 °C\n".as_bytes());
    assert_eq!(inst.read_until_terminator().unwrap(), "TMP 21.5 °C");
}

/// Transport errors while querying are handed through unchanged.
#[rstest]
fn test_default_query_io_error(mut inst: TestInstrument) {
    match inst.query("ID?") {
        Err(InstrumentError::Io(err)) => {
            assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
        }
        _ => panic!("Expected an IO error, but got a different result."),
    }
}
