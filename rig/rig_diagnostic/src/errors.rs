//! Centralized error constructors.
//!
//! A single import point for building every [`RigError`]. Keeping the
//! constructors here keeps message wording in one place.

use crate::{RigError, RigErrorKind};

// Argument Errors

pub fn invalid_build_step(name: &str, expected: &'static [&'static str]) -> RigError {
    RigErrorKind::InvalidBuildStep {
        name: name.to_string(),
        expected,
    }
    .into()
}

pub fn malformed_hook(text: &str, reason: impl Into<String>) -> RigError {
    RigErrorKind::MalformedHook {
        text: text.to_string(),
        reason: reason.into(),
    }
    .into()
}

pub fn module_busy(module_key: &str, step: &str) -> RigError {
    RigErrorKind::ModuleBusy {
        module_key: module_key.to_string(),
        step: step.to_string(),
    }
    .into()
}

pub fn invalid_side(text: &str) -> RigError {
    RigErrorKind::InvalidSide {
        text: text.to_string(),
    }
    .into()
}

pub fn parent_cycle(node: &str, parent: &str) -> RigError {
    RigErrorKind::ParentCycle {
        node: node.to_string(),
        parent: parent.to_string(),
    }
    .into()
}

// Lookup Errors

pub fn unknown_module(module_key: &str) -> RigError {
    RigErrorKind::UnknownModule {
        module_key: module_key.to_string(),
    }
    .into()
}

pub fn missing_output(
    module_key: &str,
    suffix: &'static str,
    index: &str,
    available: Vec<String>,
) -> RigError {
    RigErrorKind::MissingOutput {
        module_key: module_key.to_string(),
        suffix,
        index: index.to_string(),
        available,
    }
    .into()
}

pub fn hook_not_found(module_key: &str, hook: &str) -> RigError {
    RigErrorKind::HookNotFound {
        module_key: module_key.to_string(),
        hook: hook.to_string(),
    }
    .into()
}

pub fn no_out_hooks(module_key: &str) -> RigError {
    RigErrorKind::NoOutHooks {
        module_key: module_key.to_string(),
    }
    .into()
}

pub fn script_not_found(name: &str) -> RigError {
    RigErrorKind::ScriptNotFound {
        name: name.to_string(),
    }
    .into()
}

pub fn node_not_found(name: &str) -> RigError {
    RigErrorKind::NodeNotFound {
        name: name.to_string(),
    }
    .into()
}

// Uniqueness Errors

pub fn not_unique(module_key: &str) -> RigError {
    RigErrorKind::NotUnique {
        module_key: module_key.to_string(),
    }
    .into()
}

// Value Errors

pub fn not_a_build_script(name: &str) -> RigError {
    RigErrorKind::NotABuildScript {
        name: name.to_string(),
    }
    .into()
}

pub fn invalid_rig_data(module_key: &str, category: &str, reason: impl Into<String>) -> RigError {
    RigErrorKind::InvalidRigData {
        module_key: module_key.to_string(),
        category: category.to_string(),
        reason: reason.into(),
    }
    .into()
}

// Persistence / Environment Errors

pub fn io_error(path: &std::path::Path, err: &dyn std::error::Error) -> RigError {
    RigErrorKind::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
    .into()
}

pub fn environment_not_set(variable: &str, message: impl Into<String>) -> RigError {
    RigErrorKind::Environment {
        variable: variable.to_string(),
        message: message.into(),
    }
    .into()
}
