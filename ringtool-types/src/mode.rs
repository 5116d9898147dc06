//! Operating mode of the tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating mode.
///
/// The discriminants are the wire encoding used in bits [1:0] of the
/// packed status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Mode {
    /// Buffer is held; processing ticks are no-ops.
    #[default]
    Idle = 0,
    /// Processing ticks recirculate the buffered bytes.
    Run = 1,
    /// Diagnostic mode.
    Diag = 2,
}

impl Mode {
    /// All valid modes, in encoding order.
    pub const ALL: [Mode; 3] = [Mode::Idle, Mode::Run, Mode::Diag];

    /// The numeric encoding of this mode.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Mode {
    type Error = u32;

    /// Decode a raw mode value, handing back the raw value if it is out of range.
    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Mode::Idle),
            1 => Ok(Mode::Run),
            2 => Ok(Mode::Diag),
            other => Err(other),
        }
    }
}

impl From<Mode> for u32 {
    fn from(mode: Mode) -> Self {
        mode.as_u32()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::Run => "run",
            Mode::Diag => "diag",
        };
        f.write_str(name)
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Mode::Idle),
            "run" => Ok(Mode::Run),
            "diag" => Ok(Mode::Diag),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_matches_discriminants() {
        assert_eq!(u32::from(Mode::Idle), 0);
        assert_eq!(u32::from(Mode::Run), 1);
        assert_eq!(u32::from(Mode::Diag), 2);
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(Mode::try_from(1), Ok(Mode::Run));
        assert_eq!(Mode::try_from(3), Err(3));
        assert_eq!(Mode::try_from(99), Err(99));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("RUN".parse::<Mode>().unwrap(), Mode::Run);
        assert_eq!("diag".parse::<Mode>().unwrap(), Mode::Diag);
        assert!("sleep".parse::<Mode>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in Mode::ALL {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(Mode::default(), Mode::Idle);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mode::Run).unwrap();
        assert_eq!(json, "\"run\"");
    }
}
