//! Step handler tables.
//!
//! Modules with work in several steps can register one handler per step
//! instead of matching on [`BuildStep`] by hand:
//!
//! ```ignore
//! let stages = StageTable::new()
//!     .on(BuildStep::SkeletonBuild, Spine::build_joints)
//!     .on_before_children(BuildStep::PuppetBuild, Spine::build_controls);
//! ```

use rig_diagnostic::RigResult;
use rig_ir::BuildStep;

use crate::{StepContext, StepOrder};

/// Handler for one build step of module type `M`.
pub type StageFn<M> = fn(&mut M, &mut StepContext<'_>) -> RigResult<()>;

/// Per-step handlers and their [`StepOrder`], indexed by step.
pub struct StageTable<M> {
    stages: [Option<(StepOrder, StageFn<M>)>; BuildStep::COUNT],
}

impl<M> StageTable<M> {
    pub fn new() -> Self {
        StageTable {
            stages: [None; BuildStep::COUNT],
        }
    }

    /// Run `handler` for `step`, after the children.
    #[must_use]
    pub fn on(self, step: BuildStep, handler: StageFn<M>) -> Self {
        self.with(step, StepOrder::AfterChildren, handler)
    }

    /// Run `handler` for `step`, before the children.
    #[must_use]
    pub fn on_before_children(self, step: BuildStep, handler: StageFn<M>) -> Self {
        self.with(step, StepOrder::BeforeChildren, handler)
    }

    #[must_use]
    pub fn with(mut self, step: BuildStep, order: StepOrder, handler: StageFn<M>) -> Self {
        self.stages[step.index()] = Some((order, handler));
        self
    }

    /// Order registered for `step`; steps without a handler run after the
    /// children.
    pub fn order(&self, step: BuildStep) -> StepOrder {
        self.stages[step.index()].map_or(StepOrder::AfterChildren, |(order, _)| order)
    }

    /// Run the handler for `step`, if any.
    pub fn run(&self, module: &mut M, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        match self.stages[step.index()] {
            Some((_, handler)) => handler(module, cx),
            None => Ok(()),
        }
    }
}

impl<M> Default for StageTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: a table is copyable whatever `M` is.
impl<M> Clone for StageTable<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for StageTable<M> {}
