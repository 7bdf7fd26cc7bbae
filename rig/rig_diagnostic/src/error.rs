//! The framework error type.

use crate::ErrorCode;

/// Result of any fallible rig operation.
pub type RigResult<T> = Result<T, RigError>;

/// Abstract error kinds callers match on.
///
/// These are the categories the build driver reports; the structured
/// [`RigErrorKind`] carries the details.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input: unknown step names, malformed hooks.
    InvalidArgument,
    /// A lookup found nothing: module keys, outputs, hook targets, scripts.
    NotFound,
    /// A key that must be unique is already taken.
    NotUnique,
    /// A value exists but cannot be processed.
    Value,
    /// Persistence failed.
    Io,
    /// The environment is not configured.
    Environment,
}

/// Structured error category with the data needed to fix it.
///
/// The `Display` impl is the operator-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RigErrorKind {
    // Argument
    #[error("invalid build step `{name}`; must be one of {expected:?}")]
    InvalidBuildStep {
        name: String,
        expected: &'static [&'static str],
    },
    #[error("malformed hook `{text}`: {reason}")]
    MalformedHook { text: String, reason: String },
    #[error("module `{module_key}` is already running `{step}`")]
    ModuleBusy { module_key: String, step: String },
    #[error("invalid side `{text}`; must be one of C, L, R")]
    InvalidSide { text: String },
    #[error("cannot parent `{node}` under `{parent}`: it is the node itself or one of its descendants")]
    ParentCycle { node: String, parent: String },

    // Lookup
    #[error("module `{module_key}` does not exist")]
    UnknownModule { module_key: String },
    #[error("module `{module_key}` has no output \"{index}\"! available {suffix} outputs: {available:?}")]
    MissingOutput {
        module_key: String,
        suffix: &'static str,
        index: String,
        available: Vec<String>,
    },
    #[error("module `{module_key}` is unable to find provided hook `{hook}`")]
    HookNotFound { module_key: String, hook: String },
    #[error("rig module `{module_key}` does not provide out hooks")]
    NoOutHooks { module_key: String },
    #[error("cannot find a build script named `{name}`")]
    ScriptNotFound { name: String },
    #[error("scene node `{name}` does not exist")]
    NodeNotFound { name: String },

    // Uniqueness
    #[error("module name must be unique: {module_key}")]
    NotUnique { module_key: String },

    // Value
    #[error("`{name}` is not a build script")]
    NotABuildScript { name: String },
    #[error("cannot apply {category} rig data for `{module_key}`: {reason}")]
    InvalidRigData {
        module_key: String,
        category: String,
        reason: String,
    },

    // Persistence / environment
    #[error("rig data i/o failed at `{path}`: {message}")]
    Io { path: String, message: String },
    #[error("environment variable `{variable}` is not set: {message}")]
    Environment { variable: String, message: String },
}

impl RigErrorKind {
    /// The abstract category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RigErrorKind::InvalidBuildStep { .. }
            | RigErrorKind::MalformedHook { .. }
            | RigErrorKind::ModuleBusy { .. }
            | RigErrorKind::InvalidSide { .. }
            | RigErrorKind::ParentCycle { .. } => ErrorCategory::InvalidArgument,
            RigErrorKind::UnknownModule { .. }
            | RigErrorKind::MissingOutput { .. }
            | RigErrorKind::HookNotFound { .. }
            | RigErrorKind::NoOutHooks { .. }
            | RigErrorKind::ScriptNotFound { .. }
            | RigErrorKind::NodeNotFound { .. } => ErrorCategory::NotFound,
            RigErrorKind::NotUnique { .. } => ErrorCategory::NotUnique,
            RigErrorKind::NotABuildScript { .. } | RigErrorKind::InvalidRigData { .. } => {
                ErrorCategory::Value
            }
            RigErrorKind::Io { .. } => ErrorCategory::Io,
            RigErrorKind::Environment { .. } => ErrorCategory::Environment,
        }
    }

    /// The stable error code of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RigErrorKind::InvalidBuildStep { .. } => ErrorCode::R1001,
            RigErrorKind::MalformedHook { .. } => ErrorCode::R1002,
            RigErrorKind::ModuleBusy { .. } => ErrorCode::R1003,
            RigErrorKind::InvalidSide { .. } => ErrorCode::R1004,
            RigErrorKind::ParentCycle { .. } => ErrorCode::R1005,
            RigErrorKind::UnknownModule { .. } => ErrorCode::R2001,
            RigErrorKind::MissingOutput { .. } => ErrorCode::R2002,
            RigErrorKind::HookNotFound { .. } => ErrorCode::R2003,
            RigErrorKind::NoOutHooks { .. } => ErrorCode::R2004,
            RigErrorKind::ScriptNotFound { .. } => ErrorCode::R2005,
            RigErrorKind::NodeNotFound { .. } => ErrorCode::R2006,
            RigErrorKind::NotUnique { .. } => ErrorCode::R3001,
            RigErrorKind::NotABuildScript { .. } => ErrorCode::R4001,
            RigErrorKind::InvalidRigData { .. } => ErrorCode::R4002,
            RigErrorKind::Io { .. } => ErrorCode::R5001,
            RigErrorKind::Environment { .. } => ErrorCode::R5002,
        }
    }
}

/// A rig build error.
///
/// Raised synchronously where the problem is detected. Nothing in the
/// framework catches it; the build driver surfaces it and halts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("error[{}]: {kind}", .kind.code())]
pub struct RigError {
    /// Structured error category.
    pub kind: RigErrorKind,
    /// Secondary context for the operator (e.g. which step was running).
    pub notes: Vec<String>,
}

impl RigError {
    pub fn new(kind: RigErrorKind) -> Self {
        RigError {
            kind,
            notes: Vec::new(),
        }
    }

    /// Attach a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Full report: the message followed by one `note:` line per note.
    pub fn render(&self) -> String {
        let mut out = self.to_string();
        for note in &self.notes {
            out.push_str("\n  note: ");
            out.push_str(note);
        }
        out
    }
}

impl From<RigErrorKind> for RigError {
    fn from(kind: RigErrorKind) -> Self {
        RigError::new(kind)
    }
}
