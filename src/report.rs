use picoport_rs::PortDescriptor;

/// The single result line printed on stdout.
pub fn render_outcome(device: &str, port: Option<&str>) -> String {
    match port {
        Some(path) => format!("{device} found on port: {path}"),
        None => format!("{device} not found."),
    }
}

/// One line of the `--list` output.
pub fn render_port(port: &PortDescriptor) -> String {
    match port.usb_id() {
        Some(id) => format!("{}  {}", port.path, id),
        None => format!("{}  (no USB id)", port.path),
    }
}
