//! Bus interface modes with IP-XACT naming.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The role a bus interface plays on its component instance.
///
/// Only the master, slave, and their mirrored variants take part in path
/// legality. The system and monitor modes exist in design data but never
/// form a route, and [`Undefined`](InterfaceMode::Undefined) marks synthetic
/// interfaces created for address spaces without a bus interface.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum InterfaceMode {
    /// Initiates transactions from an address space.
    Master,
    /// Responds to transactions through a memory map.
    Slave,
    /// Interconnect-side counterpart of a master.
    MirroredMaster,
    /// Interconnect-side counterpart of a slave.
    MirroredSlave,
    /// System-group interface.
    System,
    /// Interconnect-side counterpart of a system interface.
    MirroredSystem,
    /// Passive observer of another interface.
    Monitor,
    /// No bus role.
    Undefined,
}

impl InterfaceMode {
    /// All modes, in declaration order.
    pub const ALL: [InterfaceMode; 8] = [
        InterfaceMode::Master,
        InterfaceMode::Slave,
        InterfaceMode::MirroredMaster,
        InterfaceMode::MirroredSlave,
        InterfaceMode::System,
        InterfaceMode::MirroredSystem,
        InterfaceMode::Monitor,
        InterfaceMode::Undefined,
    ];

    /// Returns the IP-XACT spelling of this mode (e.g., `mirroredMaster`).
    pub fn as_str(self) -> &'static str {
        match self {
            InterfaceMode::Master => "master",
            InterfaceMode::Slave => "slave",
            InterfaceMode::MirroredMaster => "mirroredMaster",
            InterfaceMode::MirroredSlave => "mirroredSlave",
            InterfaceMode::System => "system",
            InterfaceMode::MirroredSystem => "mirroredSystem",
            InterfaceMode::Monitor => "monitor",
            InterfaceMode::Undefined => "undefined",
        }
    }
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing interface mode strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    /// The input string that failed to parse.
    pub input: String,
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid interface mode: '{}'", self.input)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for InterfaceMode {
    type Err = ParseModeError;

    /// Parses a mode name case-insensitively. IP-XACT 2014 `initiator`/`target`
    /// names are accepted as aliases of master/slave.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mode = match lower.as_str() {
            "master" | "initiator" => InterfaceMode::Master,
            "slave" | "target" => InterfaceMode::Slave,
            "mirroredmaster" | "mirroredinitiator" => InterfaceMode::MirroredMaster,
            "mirroredslave" | "mirroredtarget" => InterfaceMode::MirroredSlave,
            "system" => InterfaceMode::System,
            "mirroredsystem" => InterfaceMode::MirroredSystem,
            "monitor" => InterfaceMode::Monitor,
            "undefined" | "" => InterfaceMode::Undefined,
            _ => {
                return Err(ParseModeError {
                    input: s.to_string(),
                })
            }
        };
        Ok(mode)
    }
}

impl Serialize for InterfaceMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InterfaceMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
