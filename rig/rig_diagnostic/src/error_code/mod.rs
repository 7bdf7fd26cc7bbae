//! Error codes for all rig build diagnostics.
//!
//! Each code is a unique identifier (e.g., `R2002`) whose first digit names
//! the error family.

use std::fmt;

/// Error codes for all rig build diagnostics.
///
/// Format: R#### where the first digit indicates the family:
/// - R1xxx: Invalid arguments (step names, hook shapes, reentrant dispatch, cycles)
/// - R2xxx: Lookups that found nothing (modules, outputs, hooks, scripts)
/// - R3xxx: Uniqueness violations
/// - R4xxx: Values that cannot be processed
/// - R5xxx: Persistence and environment failures
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Argument Errors (R1xxx)
    /// Unknown build step name
    R1001,
    /// Malformed hook text
    R1002,
    /// Module is already running a step
    R1003,
    /// Unknown side prefix
    R1004,
    /// Node parented under itself or a descendant
    R1005,

    // Lookup Errors (R2xxx)
    /// Unknown module key
    R2001,
    /// Module has no such output
    R2002,
    /// Hook target not found
    R2003,
    /// Module provides no out hooks
    R2004,
    /// Build script not found
    R2005,
    /// Scene node not found
    R2006,

    // Uniqueness Errors (R3xxx)
    /// Duplicate module key
    R3001,

    // Value Errors (R4xxx)
    /// Export is not a build script
    R4001,
    /// Rig data cannot be applied
    R4002,

    // Persistence / Environment Errors (R5xxx)
    /// Rig data I/O failure
    R5001,
    /// Environment not configured
    R5002,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::R1001,
        ErrorCode::R1002,
        ErrorCode::R1003,
        ErrorCode::R1004,
        ErrorCode::R1005,
        ErrorCode::R2001,
        ErrorCode::R2002,
        ErrorCode::R2003,
        ErrorCode::R2004,
        ErrorCode::R2005,
        ErrorCode::R2006,
        ErrorCode::R3001,
        ErrorCode::R4001,
        ErrorCode::R4002,
        ErrorCode::R5001,
        ErrorCode::R5002,
    ];

    /// Get the code as a string (e.g., "R2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::R1001 => "R1001",
            ErrorCode::R1002 => "R1002",
            ErrorCode::R1003 => "R1003",
            ErrorCode::R1004 => "R1004",
            ErrorCode::R1005 => "R1005",
            ErrorCode::R2001 => "R2001",
            ErrorCode::R2002 => "R2002",
            ErrorCode::R2003 => "R2003",
            ErrorCode::R2004 => "R2004",
            ErrorCode::R2005 => "R2005",
            ErrorCode::R2006 => "R2006",
            ErrorCode::R3001 => "R3001",
            ErrorCode::R4001 => "R4001",
            ErrorCode::R4002 => "R4002",
            ErrorCode::R5001 => "R5001",
            ErrorCode::R5002 => "R5002",
        }
    }

    /// Short description used by `explain`-style tooling.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::R1001 => "unknown build step name",
            ErrorCode::R1002 => "malformed hook",
            ErrorCode::R1003 => "module is already running a step",
            ErrorCode::R1004 => "unknown side prefix",
            ErrorCode::R1005 => "parenting cycle",
            ErrorCode::R2001 => "unknown module key",
            ErrorCode::R2002 => "module has no such output",
            ErrorCode::R2003 => "hook target not found",
            ErrorCode::R2004 => "module provides no out hooks",
            ErrorCode::R2005 => "build script not found",
            ErrorCode::R2006 => "scene node not found",
            ErrorCode::R3001 => "duplicate module key",
            ErrorCode::R4001 => "export is not a build script",
            ErrorCode::R4002 => "rig data cannot be applied",
            ErrorCode::R5001 => "rig data i/o failure",
            ErrorCode::R5002 => "environment not configured",
        }
    }

    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::R1001
                | ErrorCode::R1002
                | ErrorCode::R1003
                | ErrorCode::R1004
                | ErrorCode::R1005
        )
    }

    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::R2001
                | ErrorCode::R2002
                | ErrorCode::R2003
                | ErrorCode::R2004
                | ErrorCode::R2005
                | ErrorCode::R2006
        )
    }

    pub fn is_uniqueness_error(&self) -> bool {
        matches!(self, ErrorCode::R3001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
