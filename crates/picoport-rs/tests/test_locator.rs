use std::cell::Cell;
use std::io;

use picoport_rs::{
    LocateError, PortDescriptor, PortSource, RASPBERRY_PI_PICO, UsbId, find_target_port,
    list_ports,
};
use serialport::ErrorKind;

/// A fixed list of ports, counting how often it was queried.
struct FixedPorts {
    ports: Vec<PortDescriptor>,
    queries: Cell<usize>,
}

impl FixedPorts {
    fn new(ports: Vec<PortDescriptor>) -> Self {
        Self {
            ports,
            queries: Cell::new(0),
        }
    }
}

impl PortSource for FixedPorts {
    fn ports(&self) -> Result<Vec<PortDescriptor>, LocateError> {
        self.queries.set(self.queries.get() + 1);
        Ok(self.ports.clone())
    }
}

/// A platform that refuses to be queried.
struct DeniedPorts;

impl PortSource for DeniedPorts {
    fn ports(&self) -> Result<Vec<PortDescriptor>, LocateError> {
        Err(serialport::Error::new(
            ErrorKind::Io(io::ErrorKind::PermissionDenied),
            "permission denied reading /sys/class/tty",
        )
        .into())
    }
}

#[test]
fn finds_pico_after_unrelated_port() {
    let source = FixedPorts::new(vec![
        PortDescriptor::usb("/dev/ttyUSB0", 0x1234, 0x5678),
        PortDescriptor::usb("/dev/ttyACM0", 0x2E8A, 0x000A),
    ]);
    let found = find_target_port(&source, RASPBERRY_PI_PICO).unwrap();
    assert_eq!(found.as_deref(), Some("/dev/ttyACM0"));
    assert_eq!(source.queries.get(), 1);
}

#[test]
fn unrelated_port_only_is_not_found() {
    let source = FixedPorts::new(vec![PortDescriptor::usb("/dev/ttyUSB0", 0x1234, 0x5678)]);
    assert_eq!(find_target_port(&source, RASPBERRY_PI_PICO).unwrap(), None);
}

#[test]
fn empty_enumeration_is_not_found() {
    let source = FixedPorts::new(Vec::new());
    assert_eq!(find_target_port(&source, RASPBERRY_PI_PICO).unwrap(), None);
}

#[test]
fn skips_ports_without_usb_ids() {
    let source = FixedPorts::new(vec![
        PortDescriptor::other("COM3"),
        PortDescriptor::usb("COM4", 0x2E8A, 0x000A),
    ]);
    let found = find_target_port(&source, RASPBERRY_PI_PICO).unwrap();
    assert_eq!(found.as_deref(), Some("COM4"));
}

#[test]
fn partial_ids_are_never_a_match() {
    let source = FixedPorts::new(vec![
        PortDescriptor {
            path: "/dev/ttyACM0".into(),
            vid: Some(0x2E8A),
            pid: None,
        },
        PortDescriptor {
            path: "/dev/ttyACM1".into(),
            vid: None,
            pid: Some(0x000A),
        },
    ]);
    assert_eq!(find_target_port(&source, RASPBERRY_PI_PICO).unwrap(), None);
}

#[test]
fn first_of_two_boards_wins() {
    let a = PortDescriptor::usb("/dev/ttyACM0", 0x2E8A, 0x000A);
    let b = PortDescriptor::usb("/dev/ttyACM1", 0x2E8A, 0x000A);

    let forward = FixedPorts::new(vec![a.clone(), b.clone()]);
    let reversed = FixedPorts::new(vec![b, a]);

    assert_eq!(
        find_target_port(&forward, RASPBERRY_PI_PICO).unwrap().as_deref(),
        Some("/dev/ttyACM0")
    );
    assert_eq!(
        find_target_port(&reversed, RASPBERRY_PI_PICO).unwrap().as_deref(),
        Some("/dev/ttyACM1")
    );
}

#[test]
fn repeated_lookups_agree() {
    let source = FixedPorts::new(vec![
        PortDescriptor::other("/dev/ttyS0"),
        PortDescriptor::usb("/dev/ttyACM3", 0x2E8A, 0x000A),
    ]);
    let first = find_target_port(&source, RASPBERRY_PI_PICO).unwrap();
    let second = find_target_port(&source, RASPBERRY_PI_PICO).unwrap();
    assert_eq!(first, second);
    assert_eq!(source.queries.get(), 2);
}

#[test]
fn other_targets_can_be_located() {
    let rp2040_boot = UsbId::new(0x2E8A, 0x0003);
    let source = FixedPorts::new(vec![
        PortDescriptor::usb("/dev/ttyACM0", 0x2E8A, 0x000A),
        PortDescriptor::usb("/dev/ttyACM1", 0x2E8A, 0x0003),
    ]);
    let found = find_target_port(&source, rp2040_boot).unwrap();
    assert_eq!(found.as_deref(), Some("/dev/ttyACM1"));
}

#[test]
fn permission_denied_is_an_error_not_a_miss() {
    let err = find_target_port(&DeniedPorts, RASPBERRY_PI_PICO).unwrap_err();
    let LocateError::PlatformQuery(inner) = &err;
    assert_eq!(inner.kind(), ErrorKind::Io(io::ErrorKind::PermissionDenied));
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn list_ports_preserves_platform_order() {
    let ports = vec![
        PortDescriptor::usb("/dev/ttyACM1", 0x2E8A, 0x000A),
        PortDescriptor::other("/dev/ttyS0"),
        PortDescriptor::usb("/dev/ttyACM0", 0x2E8A, 0x000A),
    ];
    let source = FixedPorts::new(ports.clone());
    assert_eq!(list_ports(&source).unwrap(), ports);
    assert!(list_ports(&DeniedPorts).is_err());
}
