use std::fmt;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use picoport_rs::{UsbId, RASPBERRY_PI_PICO};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::cli::{parse_usb_id, Cli};

pub const DEFAULT_CONFIG_FILE: &str = "pico-finder.toml";
pub const ENV_PREFIX: &str = "PICO_FINDER_";
pub const DEFAULT_NAME: &str = "Raspberry Pi Pico";

/// Which device to look for and what to call it in messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub name: String,
    #[serde(deserialize_with = "deserialize_usb_id")]
    pub vid: u16,
    #[serde(deserialize_with = "deserialize_usb_id")]
    pub pid: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            vid: RASPBERRY_PI_PICO.vid,
            pid: RASPBERRY_PI_PICO.pid,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `PICO_FINDER_*` variables.
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Resolves the configuration, with command line flags taking precedence
    /// over every other source.
    pub fn load(cli: &Cli) -> Result<Self, figment::Error> {
        let file = match &cli.config {
            Some(path) if !path.exists() => {
                return Err(format!("config file {} does not exist", path.display()).into());
            }
            Some(path) => path.as_path(),
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        let mut figment = Self::figment(file);
        if let Some(vid) = cli.vid {
            figment = figment.merge(Serialized::default("vid", vid));
        }
        if let Some(pid) = cli.pid {
            figment = figment.merge(Serialized::default("pid", pid));
        }
        figment.extract()
    }

    pub fn target(&self) -> UsbId {
        UsbId::new(self.vid, self.pid)
    }

    /// The name used in messages. The Pico's default name is not reused when
    /// the IDs point at some other device.
    pub fn display_name(&self) -> String {
        if self.name == DEFAULT_NAME && self.target() != RASPBERRY_PI_PICO {
            format!("USB device {}", self.target())
        } else {
            self.name.clone()
        }
    }
}

/// Accepts a USB id as an integer (TOML, decimal env values) or as a string
/// such as `"0x2E8A"` (hex env values).
fn deserialize_usb_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    struct UsbIdVisitor;

    impl de::Visitor<'_> for UsbIdVisitor {
        type Value = u16;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a 16-bit USB id, as an integer or a `0x`-prefixed hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u16, E> {
            u16::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u16, E> {
            u16::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u16, E> {
            parse_usb_id(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(UsbIdVisitor)
}
