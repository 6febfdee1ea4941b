use thiserror::Error;

/// Failure to ask the operating system for its serial ports.
///
/// A query that succeeds but finds no matching port is not an error; the
/// locator reports that as `Ok(None)`.
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("serial port enumeration failed: {0}")]
    PlatformQuery(#[from] serialport::Error),
}

pub type Result<T> = std::result::Result<T, LocateError>;
