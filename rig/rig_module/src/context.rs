//! What a module sees while it runs its own work for a step.

use rig_diagnostic::{errors, RigResult};
use rig_ir::{
    BuildStep, Hook, ModuleId, ModuleIdentity, ModuleKey, ModuleRef, NodeId, OutputPointer,
    PublishCategory,
};
use rig_scene::{RigDataArtifact, RigDataIo, Scene};

use crate::{AssetGroups, ModuleGraph, ModuleGroups, OutputData, RigEnv, RigModule};

/// Access to the graph and the host for one module and one step.
pub struct StepContext<'a> {
    graph: &'a mut ModuleGraph,
    scene: &'a mut dyn Scene,
    rigdata: &'a mut dyn RigDataIo,
    module: ModuleId,
    step: BuildStep,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        graph: &'a mut ModuleGraph,
        env: &'a mut RigEnv<'_>,
        module: ModuleId,
        step: BuildStep,
    ) -> Self {
        StepContext {
            graph,
            scene: &mut *env.scene,
            rigdata: &mut *env.rigdata,
            module,
            step,
        }
    }

    #[inline]
    pub fn step(&self) -> BuildStep {
        self.step
    }

    #[inline]
    pub fn module_id(&self) -> ModuleId {
        self.module
    }

    pub fn identity(&self) -> &ModuleIdentity {
        &self.slot().identity
    }

    pub fn module_key(&self) -> &ModuleKey {
        self.identity().key()
    }

    /// `"{module_key}_{name}"`.
    pub fn mk(&self, name: &str) -> String {
        self.identity().mk(name)
    }

    pub fn parent(&self) -> Option<ModuleId> {
        self.slot().parent
    }

    pub fn children(&self) -> &[ModuleId] {
        &self.slot().children
    }

    pub fn graph(&self) -> &ModuleGraph {
        &*self.graph
    }

    pub fn scene(&mut self) -> &mut dyn Scene {
        &mut *self.scene
    }

    pub fn scene_ref(&self) -> &dyn Scene {
        &*self.scene
    }

    /// Create this module's anchor groups under the parent's modules group
    /// (`MODULES_GRP` for direct children of the asset root).
    pub fn create_grps(&mut self) -> RigResult<ModuleGroups> {
        let parent_grp = self.parent().and_then(|parent| self.modules_grp_of(parent));
        let identity = self.identity().clone();
        let groups = ModuleGroups::create(&mut *self.scene, &identity, parent_grp)?;
        self.slot_mut().groups = Some(groups);
        Ok(groups)
    }

    /// Create `{key}_guides_GRP` under the module group.
    pub fn create_guides_grp(&mut self) -> RigResult<NodeId> {
        let groups = self.require_groups()?;
        let name = self.mk("guides_GRP");
        let guides = self.scene.create_group(&name, Some(groups.grp))?;
        if let Some(groups) = self.slot_mut().groups.as_mut() {
            groups.guides = Some(guides);
        }
        Ok(guides)
    }

    /// Delete the guides group, if there is one.
    pub fn delete_guides(&mut self) -> RigResult<()> {
        let guides = self
            .slot_mut()
            .groups
            .as_mut()
            .and_then(|groups| groups.guides.take());
        match guides {
            Some(guides) if self.scene.node_exists(guides) => self.scene.delete(guides),
            _ => Ok(()),
        }
    }

    pub fn groups(&self) -> Option<&ModuleGroups> {
        self.slot().groups.as_ref()
    }

    pub fn asset_groups(&self) -> Option<&AssetGroups> {
        self.graph.asset_groups()
    }

    /// Add nodes to this module's published nodes for `category`.
    pub fn publish_nodes(
        &mut self,
        category: PublishCategory,
        nodes: impl IntoIterator<Item = NodeId>,
    ) {
        self.slot_mut().published[category.index()].extend(nodes);
    }

    pub fn published(&self, category: PublishCategory) -> &[NodeId] {
        &self.slot().published[category.index()]
    }

    /// Register outputs of this module. Existing keys are overwritten in
    /// place.
    pub fn store_output_data(&mut self, data: OutputData) {
        tracing::debug!(module = %self.module_key(), "storing output data");
        data.store_into(&mut self.slot_mut().outputs);
    }

    pub fn get_output_data(&self, pointer: &OutputPointer) -> RigResult<NodeId> {
        self.graph.get_output_data(pointer)
    }

    /// Resolve `hook` for this module. A pair hook naming this module itself
    /// fails with `ModuleBusy`; use [`StepContext::get_hook_as`] for those.
    pub fn get_hook(&self, hook: &Hook) -> RigResult<NodeId> {
        self.graph.get_hook(self.module, hook, &*self.scene)
    }

    /// Like [`StepContext::get_hook`], with `own` (the running module)
    /// answering pair hooks that name it through [`RigModule::out_hook`].
    pub fn get_hook_as(&self, own: &dyn RigModule, hook: &Hook) -> RigResult<NodeId> {
        if let Hook::Pair(module, index) = hook {
            let names_self = match module {
                ModuleRef::Key(key) => key == self.module_key(),
                ModuleRef::Id(id) => *id == self.module,
            };
            if names_self && own.identity().key() == self.module_key() {
                return own.out_hook(index);
            }
        }
        self.get_hook(hook)
    }

    /// Publish this module's (and its descendants') nodes for `category`.
    pub fn publish_rigdata(
        &mut self,
        category: PublishCategory,
    ) -> RigResult<Vec<RigDataArtifact>> {
        self.graph
            .publish_rigdata(self.module, category, &*self.scene, &mut *self.rigdata)
    }

    /// Load the latest `category` data onto this module, and its
    /// descendants when `recursive`.
    pub fn load_rigdata(&mut self, category: PublishCategory, recursive: bool) -> RigResult<usize> {
        self.graph.load_rigdata(
            self.module,
            category,
            recursive,
            &mut *self.scene,
            &mut *self.rigdata,
        )
    }

    fn require_groups(&self) -> RigResult<ModuleGroups> {
        self.groups()
            .copied()
            .ok_or_else(|| errors::node_not_found(&self.mk("module_GRP")))
    }

    fn modules_grp_of(&self, id: ModuleId) -> Option<NodeId> {
        if let Some(groups) = self.graph.groups(id).ok().flatten() {
            return Some(groups.modules);
        }
        if id == self.graph.root() {
            return self.graph.asset_groups().map(|groups| groups.modules);
        }
        None
    }

    // The running module's slot always exists; the graph never removes one.
    fn slot(&self) -> &crate::graph::ModuleSlot {
        match self.graph.slot(self.module) {
            Ok(slot) => slot,
            Err(err) => panic!("running module has no slot: {err}"),
        }
    }

    fn slot_mut(&mut self) -> &mut crate::graph::ModuleSlot {
        match self.graph.slot_mut(self.module) {
            Ok(slot) => slot,
            Err(err) => panic!("running module has no slot: {err}"),
        }
    }
}
