//! Conventions shared by puppet modules: a hook to attach to, an optional
//! explicit parent joint, and the module's own joint chain.

use rig_diagnostic::{errors, RigResult};
use rig_ir::{Hook, ModuleIdentity, NodeId, OutputIndex, OutputKind, Side};

use crate::{OutputData, StepContext};

/// State and helpers for a module that builds a joint chain and attaches it
/// to the rest of the skeleton.
///
/// Concrete modules embed one and delegate [`RigModule::identity`] and
/// [`RigModule::out_hook`] to it.
///
/// [`RigModule::identity`]: crate::RigModule::identity
/// [`RigModule::out_hook`]: crate::RigModule::out_hook
#[derive(Clone, Debug)]
pub struct PuppetModule {
    identity: ModuleIdentity,
    pub size: f64,
    pub hook: Option<Hook>,
    pub parent_joint: Option<Hook>,
    pub joints: Vec<NodeId>,
}

impl PuppetModule {
    pub fn new(side: Side, module_name: impl Into<String>) -> Self {
        PuppetModule {
            identity: ModuleIdentity::new(side, module_name),
            size: 1.0,
            hook: None,
            parent_joint: None,
            joints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_hook(mut self, hook: impl Into<Hook>) -> Self {
        self.hook = Some(hook.into());
        self
    }

    #[must_use]
    pub fn with_parent_joint(mut self, parent_joint: impl Into<Hook>) -> Self {
        self.parent_joint = Some(parent_joint.into());
        self
    }

    #[inline]
    pub fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    /// Best matching joint for `hook`.
    ///
    /// Joint pointers resolve directly. Control and transform pointers try
    /// the joint at the same index, then joint 0 of that module. Pairs and
    /// node names give `None`.
    pub fn joint_from_hook(&self, cx: &StepContext<'_>, hook: &Hook) -> RigResult<Option<NodeId>> {
        let Hook::Pointer(pointer) = hook else {
            return Ok(None);
        };
        if pointer.kind() == OutputKind::Joint {
            return cx.get_output_data(pointer).map(Some);
        }

        let same_index = pointer.with_kind(OutputKind::Joint);
        for candidate in [same_index.clone(), same_index.with_index(0)] {
            match cx.get_output_data(&candidate) {
                Ok(joint) => return Ok(Some(joint)),
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }

    /// Parent the first joint under the explicit parent joint, or else under
    /// the joint found for the hook. Does nothing without either.
    pub fn connect_to_main_skeleton(&self, cx: &mut StepContext<'_>) -> RigResult<()> {
        let Some(&first) = self.joints.first() else {
            return Ok(());
        };
        let skeleton_parent = match (&self.parent_joint, &self.hook) {
            (Some(parent_joint), _) => Some(cx.get_hook(parent_joint)?),
            (None, Some(hook)) => self.joint_from_hook(cx, hook)?,
            (None, None) => None,
        };
        if let Some(parent) = skeleton_parent {
            tracing::debug!(module = %self.identity.key(), ?parent, "connecting to main skeleton");
            cx.scene().set_parent(first, Some(parent))?;
        }
        Ok(())
    }

    /// Joint at a position of the chain; negative positions count from the
    /// end.
    pub fn out_joint(&self, index: &OutputIndex) -> RigResult<NodeId> {
        let position = match index {
            OutputIndex::Position(position) => usize::try_from(*position)
                .ok()
                .or_else(|| index.from_end().and_then(|back| self.joints.len().checked_sub(back))),
            OutputIndex::Name(_) => None,
        };
        position
            .and_then(|position| self.joints.get(position).copied())
            .ok_or_else(|| {
                errors::missing_output(
                    self.identity.key().as_str(),
                    OutputKind::Joint.suffix(),
                    &index.to_string(),
                    (0..self.joints.len()).map(|i| i.to_string()).collect(),
                )
            })
    }

    /// Register the joint chain as this module's positional joint outputs.
    pub fn store_joint_outputs(&self, cx: &mut StepContext<'_>) {
        cx.store_output_data(OutputData::new().joints(self.joints.iter().copied()));
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
