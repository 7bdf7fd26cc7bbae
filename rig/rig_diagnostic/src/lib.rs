//! Diagnostics for the rig build framework.
//!
//! Every failure in the framework is a [`RigError`]:
//! - a structured [`RigErrorKind`] (what went wrong, with the data needed to fix it)
//! - an [`ErrorCategory`] (the abstract kind callers match on)
//! - a stable [`ErrorCode`] for searchability
//! - optional notes with operator-facing context
//!
//! Errors are raised where they are detected and are never retried. They
//! propagate up to the build driver, which halts the build.
//!
//! Constructors live in [`errors`]; prefer them over building kinds by hand.

mod error;
mod error_code;
pub mod errors;

pub use error::{ErrorCategory, RigError, RigErrorKind, RigResult};
pub use error_code::ErrorCode;
