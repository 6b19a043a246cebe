use std::{thread, time::Duration};

use instrumentrs::SerialInterface;

use philips_pm2534::{Function, Pm2534, Range};

fn main() {
    // Run with `RUST_LOG=debug` to see the traffic to and from the meter.
    env_logger::init();

    // GPIB-USB adapter in transparent mode.
    let port = "/dev/ttyUSB0";
    let baud = 9600;

    let serial_inst = SerialInterface::simple(port, baud).expect("Failed to open serial port");
    let mut inst = Pm2534::new(serial_inst);

    println!("Instrument ID: {}", inst.get_id().unwrap());

    inst.set_function(Function::Vdc).unwrap();
    println!("Function: {}", inst.get_function().unwrap());

    inst.set_speed(2).unwrap();
    println!("Speed: {}", inst.get_speed().unwrap());

    inst.set_range(Range::Value(30.0)).unwrap();
    println!("Range: {}", inst.get_range().unwrap());

    println!("Filter: {}", inst.get_filter().unwrap());
    inst.set_filter(true).unwrap();
    println!("Filter: {}", inst.get_filter().unwrap());

    // Show a text for a while, then turn off display updating for faster readings.
    inst.set_text("HI").unwrap();
    thread::sleep(Duration::from_secs(5));
    inst.set_display(false).unwrap();

    for _ in 0..100 {
        match inst.get_measurement(Function::Vdc) {
            Ok(meas) => println!("{meas}"),
            Err(err) => eprintln!("Reading failed: {err}"),
        }
    }

    inst.set_display(true).unwrap();
}
