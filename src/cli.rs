use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Report the serial port a Raspberry Pi Pico is attached to.
#[derive(Parser, Debug, Default)]
#[command(name = "pico-finder", version, about)]
pub struct Cli {
    /// USB vendor ID to look for (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_usb_id)]
    pub vid: Option<u16>,

    /// USB product ID to look for (hex with 0x prefix, or decimal)
    #[arg(long, value_parser = parse_usb_id)]
    pub pid: Option<u16>,

    /// Configuration file [default: pico-finder.toml]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print every serial port before the result
    #[arg(short, long)]
    pub list: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parses a 16-bit USB identifier written as `0x2E8A` or `11914`.
pub fn parse_usb_id(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("`{s}` is not a 16-bit USB id: {e}"))
}
