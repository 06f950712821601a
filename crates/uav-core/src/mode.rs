//! Operating strategy and the capability set it unlocks.
//!
//! The mode is chosen once at construction.  The tick loop never compares
//! modes directly; it reads [`Capabilities`] instead.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Operating strategy for one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Hybrid: offloading and threat handling both active.
    Pure,
    /// Threat logic disabled, offloading active.
    Ecop,
    /// Offloading disabled, threat logic active.
    MpcOnly,
}

/// What a [`Mode`] allows the per-slot loop to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub runs_threats:    bool,
    pub runs_offloading: bool,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pure, Mode::Ecop, Mode::MpcOnly];

    pub fn capabilities(self) -> Capabilities {
        match self {
            Mode::Pure    => Capabilities { runs_threats: true,  runs_offloading: true },
            Mode::Ecop    => Capabilities { runs_threats: false, runs_offloading: true },
            Mode::MpcOnly => Capabilities { runs_threats: true,  runs_offloading: false },
        }
    }

    /// Whether the threat population is created at construction.
    ///
    /// Checked independently of [`Capabilities::runs_threats`], which gates
    /// the per-slot processing.
    pub fn spawns_threats(self) -> bool {
        !matches!(self, Mode::Ecop)
    }

    /// Canonical upper-case label (`PURE`, `ECOP`, `MPC-ONLY`).
    pub fn label(self) -> &'static str {
        match self {
            Mode::Pure    => "PURE",
            Mode::Ecop    => "ECOP",
            Mode::MpcOnly => "MPC-ONLY",
        }
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PURE" | "HYBRID"        => Ok(Mode::Pure),
            "ECOP"                   => Ok(Mode::Ecop),
            "MPC_ONLY" | "MPC-ONLY"  => Ok(Mode::MpcOnly),
            other => Err(CoreError::Parse(format!(
                "unrecognized mode {other:?}: expected PURE, ECOP, or MPC_ONLY"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl serde::Serialize for Mode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> serde::Deserialize<'de> for Mode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
