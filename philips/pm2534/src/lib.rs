//! A rust driver for the Philips PM2534 bench multimeter.
//!
//! The PM2534 is controlled via GPIB with a set of three-letter mnemonics. Queries are answered
//! with a single line that echoes the mnemonic followed by the value, e.g., `"FNC VDC"`. This
//! driver talks to the meter through any interface that implements the
//! [`InstrumentInterface`] trait, e.g., a GPIB-USB adapter that shows up as a serial port.
//!
//! # Example
//!
//! ```no_run
//! use instrumentrs::SerialInterface;
//! use philips_pm2534::{Function, Pm2534, Range};
//!
//! // GPIB adapter in transparent mode at the given serial port.
//! let interface = SerialInterface::simple("/dev/ttyUSB0", 9600).unwrap();
//! let mut meter = Pm2534::new(interface);
//!
//! // Measure DC voltages in the 3 V range.
//! meter.set_function(Function::Vdc).unwrap();
//! meter.set_range(Range::Value(3.0)).unwrap();
//!
//! for _ in 0..100 {
//!     println!("{}", meter.get_reading().unwrap());
//! }
//! ```

#![warn(missing_docs)]

mod settings;
mod units;
mod utils;

pub use settings::{Function, Range, TriggerSource};
pub use units::Pm2534Measurement;

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface};

use utils::{check_int_range, parse_value, value_token};

/// A rust driver for the PM2534.
///
/// The driver keeps no state of the instrument, every getter queries the meter. The interface is
/// shared between clones of the driver. Every command, or command and response pair for queries,
/// is exchanged while holding the interface lock, such that clones can be used from multiple
/// threads without mixing up responses.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Pm2534<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Pm2534<T> {
    /// Create a new PM2534 instance with the given instrument interface.
    ///
    /// No communication with the instrument takes place here.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn new(interface: T) -> Self {
        Pm2534 {
            interface: Arc::new(Mutex::new(interface)),
        }
    }

    /// Query the device ID string of the meter.
    ///
    /// The whole response line is returned.
    pub fn get_id(&mut self) -> Result<String, InstrumentError> {
        let resp = self.query("ID?")?;
        if resp.is_empty() {
            return Err(InstrumentError::ResponseParseError(resp));
        }
        Ok(resp)
    }

    /// Get the current measurement function.
    pub fn get_function(&mut self) -> Result<Function, InstrumentError> {
        let resp = self.query("FNC ?")?;
        Function::from_cmd_str(value_token(&resp)?)
    }

    /// Set the measurement function.
    ///
    /// To set the function from a string, parse it first, e.g., `"VDC".parse::<Function>()?`.
    pub fn set_function(&mut self, function: Function) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("FNC {}", function.as_str()))
    }

    /// Get the measurement range.
    ///
    /// Returns [`Range::Auto`] if autoranging is enabled, otherwise the fixed range.
    pub fn get_range(&mut self) -> Result<Range, InstrumentError> {
        let resp = self.query("RNG ?")?;
        Range::from_cmd_str(value_token(&resp)?)
    }

    /// Set the measurement range.
    ///
    /// Fixed ranges are given in the unit of the current function, e.g., `Range::Value(3.0)` for
    /// the 3 V range, or `3.0.into()`. Autoranging can also be set from a string with
    /// `"auto".parse::<Range>()?`.
    pub fn set_range(&mut self, range: Range) -> Result<(), InstrumentError> {
        let range = range.to_cmd_str()?;
        self.sendcmd(&format!("RNG {range}"))
    }

    /// Get the conversion speed, an integer between 1 and 4.
    pub fn get_speed(&mut self) -> Result<u8, InstrumentError> {
        let resp = self.query("MSP ?")?;
        parse_value(&resp)
    }

    /// Set the conversion speed.
    ///
    /// Higher conversion speeds will reduce the resolution.
    ///
    /// # Arguments
    /// * `speed` - Conversion speed between 1 and 4.
    pub fn set_speed(&mut self, speed: u8) -> Result<(), InstrumentError> {
        let speed = check_int_range(speed, 1, 4)?;
        self.sendcmd(&format!("MSP {speed}"))
    }

    /// Get the resolution, i.e., the number of digits in the results.
    pub fn get_resolution(&mut self) -> Result<u8, InstrumentError> {
        let resp = self.query("RSL ?")?;
        parse_value(&resp)
    }

    /// Set the resolution.
    ///
    /// Higher resolutions will decrease the conversion speed.
    ///
    /// # Arguments
    /// * `resolution` - Number of digits between 4 and 7.
    pub fn set_resolution(&mut self, resolution: u8) -> Result<(), InstrumentError> {
        let resolution = check_int_range(resolution, 4, 7)?;
        self.sendcmd(&format!("RSL {resolution}"))
    }

    /// Get whether filtering is enabled.
    pub fn get_filter(&mut self) -> Result<bool, InstrumentError> {
        self.query_on_off("FIL")
    }

    /// Enable or disable filtering.
    pub fn set_filter(&mut self, value: bool) -> Result<(), InstrumentError> {
        self.send_on_off("FIL", value)
    }

    /// Get whether the internal settling time is enabled.
    pub fn get_settling_time(&mut self) -> Result<bool, InstrumentError> {
        self.query_on_off("IST")
    }

    /// Enable or disable the internal settling time.
    pub fn set_settling_time(&mut self, value: bool) -> Result<(), InstrumentError> {
        self.send_on_off("IST", value)
    }

    /// Get whether display updating is enabled.
    pub fn get_display(&mut self) -> Result<bool, InstrumentError> {
        self.query_on_off("DSP")
    }

    /// Enable or disable display updating.
    ///
    /// Display updates take some of the meter's CPU time. Disabling the display can therefore
    /// give faster conversion speeds.
    pub fn set_display(&mut self, value: bool) -> Result<(), InstrumentError> {
        self.send_on_off("DSP", value)
    }

    /// Get whether the reception of System 21 interface responses is enabled.
    pub fn get_system21_responses(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query("AID ?")?;
        Ok(value_token(&resp)? == "E")
    }

    /// Enable or disable the reception of System 21 interface responses.
    pub fn set_system21_responses(&mut self, value: bool) -> Result<(), InstrumentError> {
        let value = if value { "E" } else { "D" };
        self.sendcmd(&format!("AID {value}"))
    }

    /// Get whether calibration mode is enabled.
    pub fn get_calibration(&mut self) -> Result<bool, InstrumentError> {
        self.query_on_off("CAL")
    }

    /// Enable or disable calibration mode.
    pub fn set_calibration(&mut self, value: bool) -> Result<(), InstrumentError> {
        self.send_on_off("CAL", value)
    }

    /// Get whether the null offset function is enabled.
    pub fn get_null(&mut self) -> Result<bool, InstrumentError> {
        self.query_on_off("NUL")
    }

    /// Enable or disable the null offset function.
    ///
    /// The null offset itself is stored with [`Pm2534::store_null`].
    pub fn set_null(&mut self, value: bool) -> Result<(), InstrumentError> {
        self.send_on_off("NUL", value)
    }

    /// Get the trigger source.
    pub fn get_trigger(&mut self) -> Result<TriggerSource, InstrumentError> {
        let resp = self.query("TRG ?")?;
        TriggerSource::from_cmd_str(value_token(&resp)?)
    }

    /// Set the trigger source.
    pub fn set_trigger(&mut self, trigger: TriggerSource) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("TRG {}", trigger.as_str()))
    }

    /// The display text cannot be read back, this always returns `None`.
    ///
    /// No communication with the instrument takes place.
    pub fn get_text(&self) -> Option<String> {
        None
    }

    /// Show a text on the display of the meter.
    ///
    /// Turn off display updating first with `set_display(false)`, otherwise the text is
    /// overwritten by the next reading.
    pub fn set_text(&mut self, text: &str) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("TXT {text}"))
    }

    /// Get a reading from the meter.
    ///
    /// No command is sent. The meter sends its readings by itself, this reads the next available
    /// line and returns its value.
    pub fn get_reading(&mut self) -> Result<f64, InstrumentError> {
        let resp = {
            let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
            intf.read_until_terminator()?
        };
        log::debug!("PM2534 reading: {resp}");
        parse_value(&resp)
    }

    /// Get a reading from the meter with the unit of the given function attached.
    ///
    /// The function is not queried from the meter, pass the function that is currently set.
    pub fn get_measurement(
        &mut self,
        function: Function,
    ) -> Result<Pm2534Measurement, InstrumentError> {
        let value = self.get_reading()?;
        Ok(Pm2534Measurement::from_reading(function, value))
    }

    /// Start a measurement.
    pub fn start(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("X")
    }

    /// Enter the self diagnostic mode.
    pub fn enter_diagnostic_mode(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("TST")
    }

    /// Store the current reading as the new null offset.
    pub fn store_null(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("NUL NEW")
    }

    /// Query a setting that is reported as `ON`/`OFF`. Anything but `ON` is reported as `false`.
    fn query_on_off(&mut self, mnemonic: &str) -> Result<bool, InstrumentError> {
        let resp = self.query(&format!("{mnemonic} ?"))?;
        Ok(value_token(&resp)? == "ON")
    }

    /// Set a setting that takes `ON`/`OFF` as argument.
    fn send_on_off(&mut self, mnemonic: &str, value: bool) -> Result<(), InstrumentError> {
        let value = if value { "ON" } else { "OFF" };
        self.sendcmd(&format!("{mnemonic} {value}"))
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        log::debug!("PM2534 command: {cmd}");
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// Command and response are exchanged without releasing the interface lock in between.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let resp = {
            let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
            intf.query(cmd)?
        };
        log::debug!("PM2534 query: {cmd} -> {resp}");
        Ok(resp)
    }
}

impl<T: InstrumentInterface> Clone for Pm2534<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
