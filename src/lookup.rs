use log::debug;
use picoport_rs::{find_port, find_target_port, list_ports, LocateError, PortSource, UsbId};

use crate::report;

/// Result of one run: the `--list` lines (empty unless asked for) and the
/// path of the matching port.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Lookup {
    pub listing: Vec<String>,
    pub found: Option<String>,
}

impl Lookup {
    pub fn found(found: Option<String>) -> Self {
        Self {
            listing: Vec::new(),
            found,
        }
    }
}

/// Queries `source` exactly once. With `list` set, every port is rendered in
/// platform order and the match is taken from that same enumeration.
pub fn locate<S: PortSource + ?Sized>(
    source: &S,
    target: UsbId,
    list: bool,
) -> Result<Lookup, LocateError> {
    if !list {
        return find_target_port(source, target).map(Lookup::found);
    }

    let ports = list_ports(source)?;
    debug!("Listing {} port(s)", ports.len());
    Ok(Lookup {
        listing: ports.iter().map(report::render_port).collect(),
        found: find_port(&ports, target).map(|port| port.path.clone()),
    })
}
