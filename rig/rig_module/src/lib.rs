//! Rig Module - the composable building blocks of a rig and the graph that
//! drives them.
//!
//! # Architecture
//!
//! A rig is a tree of [`RigModule`]s owned by a [`ModuleGraph`] arena. The
//! graph is the module registry: keys are unique across the whole tree and
//! every module is reachable by key or by [`ModuleId`](rig_ir::ModuleId).
//!
//! Dispatching a [`BuildStep`](rig_ir::BuildStep) visits every module in the
//! tree. The graph owns the traversal: children run in insertion order, and
//! each module only decides whether its own work runs before or after them
//! ([`StepOrder`]). Module code gets a [`StepContext`] for the duration of
//! its own work, through which it reaches the scene, stores outputs and
//! resolves hooks to other modules.
//!
//! Outputs are late-bound: a module looks another module's output up by
//! [`OutputPointer`](rig_ir::OutputPointer) at the moment it needs it.

mod context;
mod graph;
mod groups;
mod module;
mod outputs;
mod puppet;
mod stage;

pub use context::StepContext;
pub use graph::{Composer, ModuleGraph, RigEnv};
pub use groups::{AssetGroups, ModuleGroups};
pub use module::{RigModule, StepOrder};
pub use outputs::{OutputData, OutputRegistry};
pub use puppet::PuppetModule;
pub use stage::{StageFn, StageTable};

#[cfg(test)]
mod test_helpers;
