//! Locate the serial port a Raspberry Pi Pico (or any other USB device with a
//! known VID/PID pair) is attached to.

pub mod error;
pub mod ports;

pub use error::LocateError;
pub use ports::{
    PortDescriptor, PortSource, RASPBERRY_PI_PICO, SystemPorts, UsbId, find_pico_port, find_port,
    find_target_port, list_ports,
};
