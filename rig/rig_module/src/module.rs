//! The module trait.

use rig_diagnostic::{errors, RigResult};
use rig_ir::{BuildStep, ModuleIdentity, NodeId, OutputIndex};

use crate::{Composer, StepContext};

/// Whether a module's own work for a step runs before or after its
/// children are visited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepOrder {
    BeforeChildren,
    /// Children first, then this module. Parents building on top of what
    /// their children created use this.
    #[default]
    AfterChildren,
}

/// A building block of a rig.
///
/// Implementors describe themselves and the work they do per
/// [`BuildStep`]. They never visit their children themselves; the
/// [`ModuleGraph`](crate::ModuleGraph) does that for every step, so a module
/// cannot skip or repeat its descendants.
pub trait RigModule: 'static {
    fn identity(&self) -> &ModuleIdentity;

    /// Add child modules. Called once, right after this module has been
    /// registered.
    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()> {
        let _ = composer;
        Ok(())
    }

    fn step_order(&self, step: BuildStep) -> StepOrder {
        let _ = step;
        StepOrder::AfterChildren
    }

    /// This module's own work for `step`. Does nothing by default.
    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        let _ = (step, cx);
        Ok(())
    }

    /// Node other modules attach to when they hook `[this_module, index]`.
    fn out_hook(&self, index: &OutputIndex) -> RigResult<NodeId> {
        let _ = index;
        Err(errors::no_out_hooks(self.identity().key().as_str()))
    }
}
