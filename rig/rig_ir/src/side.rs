//! Module sides.

use std::fmt;
use std::str::FromStr;

use rig_diagnostic::{errors, RigError};

/// Which side of the character a module builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Center,
    Left,
    Right,
}

impl Side {
    /// Naming prefix (`C`, `L`, `R`).
    pub fn prefix(self) -> &'static str {
        match self {
            Side::Center => "C",
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    /// Sign applied to mirrored values: `-1.0` on the right side.
    pub fn mirror_factor(self) -> f64 {
        match self {
            Side::Right => -1.0,
            Side::Center | Side::Left => 1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Side {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(Side::Center),
            "L" => Ok(Side::Left),
            "R" => Ok(Side::Right),
            _ => Err(errors::invalid_side(s)),
        }
    }
}
