use std::fmt;

use log::{debug, trace};
use serialport::{SerialPortInfo, SerialPortType, available_ports};

use crate::error::Result;

/// A USB (vendor ID, product ID) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UsbId {
    pub vid: u16,
    pub pid: u16,
}

impl UsbId {
    pub const fn new(vid: u16, pid: u16) -> Self {
        Self { vid, pid }
    }
}

impl fmt::Display for UsbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vid, self.pid)
    }
}

/// Raspberry Pi Pico running the stock USB CDC stdio firmware.
pub const RASPBERRY_PI_PICO: UsbId = UsbId::new(0x2E8A, 0x000A);

/// One serial port as currently reported by the operating system.
///
/// `vid` and `pid` are only present for USB-backed ports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortDescriptor {
    pub path: String,
    pub vid: Option<u16>,
    pub pid: Option<u16>,
}

impl PortDescriptor {
    /// A port backed by a USB device.
    pub fn usb(path: impl Into<String>, vid: u16, pid: u16) -> Self {
        Self {
            path: path.into(),
            vid: Some(vid),
            pid: Some(pid),
        }
    }

    /// A port with no USB identity (PCI, Bluetooth, unknown).
    pub fn other(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            vid: None,
            pid: None,
        }
    }

    /// The USB identity of this port, if it has both identifiers.
    pub fn usb_id(&self) -> Option<UsbId> {
        Some(UsbId::new(self.vid?, self.pid?))
    }

    /// True when both identifiers are present and equal to `target`.
    pub fn matches(&self, target: UsbId) -> bool {
        self.vid == Some(target.vid) && self.pid == Some(target.pid)
    }
}

impl From<&SerialPortInfo> for PortDescriptor {
    fn from(info: &SerialPortInfo) -> Self {
        match &info.port_type {
            SerialPortType::UsbPort(usb_info) => {
                Self::usb(info.port_name.clone(), usb_info.vid, usb_info.pid)
            }
            _ => Self::other(info.port_name.clone()),
        }
    }
}

impl From<SerialPortInfo> for PortDescriptor {
    fn from(info: SerialPortInfo) -> Self {
        Self::from(&info)
    }
}

/// Anything that can list the serial ports currently attached to the host.
pub trait PortSource {
    /// Returns the ports in the order the platform reports them.
    fn ports(&self) -> Result<Vec<PortDescriptor>>;
}

/// The host operating system, queried through `serialport`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemPorts;

impl PortSource for SystemPorts {
    fn ports(&self) -> Result<Vec<PortDescriptor>> {
        let ports = available_ports()?;
        debug!("Platform reported {} serial port(s)", ports.len());
        Ok(ports.iter().map(PortDescriptor::from).collect())
    }
}

/// Finds the first port in `ports` whose identifiers equal `target`.
///
/// The slice is scanned in order; when several ports match, the earliest wins.
pub fn find_port(ports: &[PortDescriptor], target: UsbId) -> Option<&PortDescriptor> {
    ports.iter().find(|port| {
        let hit = port.matches(target);
        trace!(
            "{}: vid={:?} pid={:?} -> {}",
            port.path,
            port.vid,
            port.pid,
            if hit { "match" } else { "skip" }
        );
        hit
    })
}

/// Queries `source` once and returns the device path of the first port
/// matching `target`.
///
/// # Returns
/// * `Ok(Some(path))` - the first matching port
/// * `Ok(None)` - the query succeeded but nothing matched
/// * `Err(_)` - the platform could not be queried
pub fn find_target_port<S: PortSource + ?Sized>(
    source: &S,
    target: UsbId,
) -> Result<Option<String>> {
    debug!("Looking for USB device {}", target);
    let ports = source.ports()?;
    let found = find_port(&ports, target).map(|port| port.path.clone());
    match &found {
        Some(path) => debug!("Device {} found on {}", target, path),
        None => debug!("Device {} not present among {} port(s)", target, ports.len()),
    }
    Ok(found)
}

/// Finds the port of a Raspberry Pi Pico attached to this host.
///
/// Queries the real platform, so it is only exercised with hardware attached;
/// the matching itself is covered through [`find_target_port`].
pub fn find_pico_port() -> Result<Option<String>> {
    find_target_port(&SystemPorts, RASPBERRY_PI_PICO)
}

/// Lists every serial port `source` reports, in platform order.
pub fn list_ports<S: PortSource + ?Sized>(source: &S) -> Result<Vec<PortDescriptor>> {
    source.ports()
}
