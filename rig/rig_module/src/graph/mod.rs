//! The module graph: arena, key registry and step dispatch.
//!
//! Modules live in a flat arena indexed by [`ModuleId`]; the root is always
//! the first slot. A fresh graph is a fresh registry, so two builds never
//! see each other's modules.
//!
//! While a module runs its own work for a step it is taken out of its slot.
//! Everything else in the graph stays reachable through the [`StepContext`];
//! only the running module itself reads as busy.

use rig_diagnostic::{errors, RigError, RigResult};
use rig_ir::{
    BuildStep, Hook, ModuleId, ModuleIdentity, ModuleKey, ModuleRef, NodeId, OutputPointer,
    PublishCategory,
};
use rig_scene::{RigDataArtifact, RigDataIo, Scene};
use rustc_hash::FxHashMap;

use crate::{AssetGroups, ModuleGroups, OutputRegistry, RigModule, StepContext, StepOrder};

/// Host services a dispatch needs.
pub struct RigEnv<'a> {
    pub scene: &'a mut dyn Scene,
    pub rigdata: &'a mut dyn RigDataIo,
}

impl<'a> RigEnv<'a> {
    pub fn new(scene: &'a mut dyn Scene, rigdata: &'a mut dyn RigDataIo) -> Self {
        RigEnv { scene, rigdata }
    }
}

pub(crate) struct ModuleSlot {
    pub(crate) identity: ModuleIdentity,
    module: Option<Box<dyn RigModule>>,
    /// Step whose own work is running; `None` while composing.
    running: Option<BuildStep>,
    pub(crate) parent: Option<ModuleId>,
    pub(crate) children: Vec<ModuleId>,
    pub(crate) published: [Vec<NodeId>; PublishCategory::ALL.len()],
    pub(crate) outputs: OutputRegistry,
    pub(crate) groups: Option<ModuleGroups>,
}

impl ModuleSlot {
    fn busy(&self) -> RigError {
        let step = self.running.map_or("compose", BuildStep::name);
        errors::module_busy(self.identity.key().as_str(), step)
    }
}

/// All modules of one rig, keyed uniquely.
pub struct ModuleGraph {
    slots: Vec<ModuleSlot>,
    by_key: FxHashMap<ModuleKey, ModuleId>,
    asset_groups: Option<AssetGroups>,
}

impl ModuleGraph {
    /// Register `root` and let it compose its children.
    pub fn new(root: Box<dyn RigModule>) -> RigResult<Self> {
        Self::with_asset_groups(root, None)
    }

    /// Like [`ModuleGraph::new`], with the asset groups already in place so
    /// composing modules can see them.
    pub fn with_asset_groups(
        root: Box<dyn RigModule>,
        asset_groups: Option<AssetGroups>,
    ) -> RigResult<Self> {
        let mut graph = ModuleGraph {
            slots: Vec::new(),
            by_key: FxHashMap::default(),
            asset_groups,
        };
        graph.register(None, root)?;
        Ok(graph)
    }

    /// The asset root module every other module descends from.
    #[inline]
    pub fn root(&self) -> ModuleId {
        ModuleId::new(0)
    }

    pub fn asset_groups(&self) -> Option<&AssetGroups> {
        self.asset_groups.as_ref()
    }

    /// Number of registered modules, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn lookup(&self, key: &str) -> Option<ModuleId> {
        self.by_key.get(key).copied()
    }

    /// Like [`ModuleGraph::lookup`], failing with `NotFound`.
    pub fn resolve_key(&self, key: &str) -> RigResult<ModuleId> {
        self.lookup(key).ok_or_else(|| errors::unknown_module(key))
    }

    /// Module ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ModuleId> {
        (0..self.slots.len()).map(|index| {
            ModuleId::new(
                u32::try_from(index).unwrap_or_else(|_| panic!("module count exceeds u32::MAX")),
            )
        })
    }

    pub fn identity(&self, id: ModuleId) -> RigResult<&ModuleIdentity> {
        Ok(&self.slot(id)?.identity)
    }

    pub fn parent(&self, id: ModuleId) -> RigResult<Option<ModuleId>> {
        Ok(self.slot(id)?.parent)
    }

    pub fn children(&self, id: ModuleId) -> RigResult<&[ModuleId]> {
        Ok(&self.slot(id)?.children)
    }

    pub fn outputs(&self, id: ModuleId) -> RigResult<&OutputRegistry> {
        Ok(&self.slot(id)?.outputs)
    }

    pub fn groups(&self, id: ModuleId) -> RigResult<Option<&ModuleGroups>> {
        Ok(self.slot(id)?.groups.as_ref())
    }

    pub fn published(&self, id: ModuleId, category: PublishCategory) -> RigResult<&[NodeId]> {
        Ok(&self.slot(id)?.published[category.index()])
    }

    /// Register `module` as the last child of `parent`, then let it compose.
    ///
    /// Fails with `NotUnique` if the key is taken anywhere in the graph; the
    /// graph is left untouched in that case.
    pub fn add_module(
        &mut self,
        parent: ModuleId,
        module: Box<dyn RigModule>,
    ) -> RigResult<ModuleId> {
        self.slot(parent)?;
        self.register(Some(parent), module)
    }

    fn register(
        &mut self,
        parent: Option<ModuleId>,
        mut module: Box<dyn RigModule>,
    ) -> RigResult<ModuleId> {
        let identity = module.identity().clone();
        if self.by_key.contains_key(identity.key()) {
            return Err(errors::not_unique(identity.key().as_str()));
        }

        let id = ModuleId::new(
            u32::try_from(self.slots.len())
                .unwrap_or_else(|_| panic!("module count exceeds u32::MAX")),
        );
        tracing::debug!(module = %identity.key(), id = id.index(), "registered module");
        self.by_key.insert(identity.key().clone(), id);
        self.slots.push(ModuleSlot {
            identity,
            module: None,
            running: None,
            parent,
            children: Vec::new(),
            published: std::array::from_fn(|_| Vec::new()),
            outputs: OutputRegistry::new(),
            groups: None,
        });
        if let Some(parent) = parent {
            self.slot_mut(parent)?.children.push(id);
        }

        let result = module.compose(&mut Composer { graph: self, id });
        self.slot_mut(id)?.module = Some(module);
        result.map(|()| id)
    }

    /// Run `step` on `id` and everything below it.
    ///
    /// Children are visited in insertion order, exactly once each. The
    /// module's own work runs before or after them as its
    /// [`StepOrder`] says. The first error stops the walk.
    #[tracing::instrument(level = "trace", skip(self, env))]
    pub fn run_step(
        &mut self,
        id: ModuleId,
        step: BuildStep,
        env: &mut RigEnv<'_>,
    ) -> RigResult<()> {
        let order = {
            let slot = self.slot(id)?;
            slot.module.as_ref().ok_or_else(|| slot.busy())?.step_order(step)
        };

        if order == StepOrder::BeforeChildren {
            self.run_own(id, step, env)?;
        }
        let children = self.slot(id)?.children.clone();
        for child in children {
            self.run_step(child, step, env)?;
        }
        if order == StepOrder::AfterChildren {
            self.run_own(id, step, env)?;
        }
        Ok(())
    }

    fn run_own(&mut self, id: ModuleId, step: BuildStep, env: &mut RigEnv<'_>) -> RigResult<()> {
        let slot = self.slot_mut(id)?;
        let mut module = slot.module.take().ok_or_else(|| slot.busy())?;
        slot.running = Some(step);

        let result = {
            let mut cx = StepContext::new(self, env, id, step);
            module.run_step(step, &mut cx)
        };

        let slot = self.slot_mut(id)?;
        slot.module = Some(module);
        slot.running = None;
        result.map_err(|err| {
            err.with_note(format!("while running `{step}` on `{}`", slot.identity.key()))
        })
    }

    /// Node an output pointer points at right now.
    pub fn get_output_data(&self, pointer: &OutputPointer) -> RigResult<NodeId> {
        let id = self.resolve_key(pointer.module_key().as_str())?;
        let node = self.slot(id)?.outputs.resolve(
            pointer.module_key(),
            pointer.kind(),
            pointer.index(),
        )?;
        tracing::trace!(%pointer, ?node, "resolved output");
        Ok(node)
    }

    /// Resolve `hook` on behalf of module `requester`.
    ///
    /// Pointers read the output registry, pairs ask the named module's
    /// [`RigModule::out_hook`], and anything else must be an existing
    /// scene node.
    pub fn get_hook(
        &self,
        requester: ModuleId,
        hook: &Hook,
        scene: &dyn Scene,
    ) -> RigResult<NodeId> {
        match hook {
            Hook::Pointer(pointer) => self.get_output_data(pointer),
            Hook::Pair(module, index) => {
                let id = match module {
                    ModuleRef::Key(key) => self.resolve_key(key.as_str())?,
                    ModuleRef::Id(id) => *id,
                };
                let slot = self.slot(id)?;
                let module = slot.module.as_ref().ok_or_else(|| slot.busy())?;
                module.out_hook(index)
            }
            Hook::Node(name) => scene.find(name).ok_or_else(|| {
                let requester = self
                    .slot(requester)
                    .map(|slot| slot.identity.key().to_string())
                    .unwrap_or_default();
                errors::hook_not_found(&requester, name)
            }),
        }
    }

    /// Publish `category` for every module below `id`, children first, then
    /// `id` itself.
    pub fn publish_rigdata(
        &self,
        id: ModuleId,
        category: PublishCategory,
        scene: &dyn Scene,
        rigdata: &mut dyn RigDataIo,
    ) -> RigResult<Vec<RigDataArtifact>> {
        let mut artifacts = Vec::new();
        self.publish_into(id, category, scene, rigdata, &mut artifacts)?;
        Ok(artifacts)
    }

    fn publish_into(
        &self,
        id: ModuleId,
        category: PublishCategory,
        scene: &dyn Scene,
        rigdata: &mut dyn RigDataIo,
        artifacts: &mut Vec<RigDataArtifact>,
    ) -> RigResult<()> {
        let slot = self.slot(id)?;
        for &child in &slot.children {
            self.publish_into(child, category, scene, rigdata, artifacts)?;
        }
        let published = &slot.published[category.index()];
        if let Some(artifact) = rigdata.publish(slot.identity.key(), category, published, scene)? {
            artifacts.push(artifact);
        }
        Ok(())
    }

    /// Load the latest `category` data for `id` (and, if `recursive`, for
    /// every module below it first). Returns how many modules had data.
    pub fn load_rigdata(
        &self,
        id: ModuleId,
        category: PublishCategory,
        recursive: bool,
        scene: &mut dyn Scene,
        rigdata: &mut dyn RigDataIo,
    ) -> RigResult<usize> {
        let slot = self.slot(id)?;
        let mut loaded = 0;
        if recursive {
            for &child in &slot.children {
                loaded += self.load_rigdata(child, category, true, scene, rigdata)?;
            }
        }
        if rigdata.load(slot.identity.key(), category, scene)? {
            loaded += 1;
        }
        Ok(loaded)
    }

    pub(crate) fn slot(&self, id: ModuleId) -> RigResult<&ModuleSlot> {
        self.slots
            .get(id.index())
            .ok_or_else(|| errors::unknown_module(&format!("#{}", id.index())))
    }

    pub(crate) fn slot_mut(&mut self, id: ModuleId) -> RigResult<&mut ModuleSlot> {
        self.slots
            .get_mut(id.index())
            .ok_or_else(|| errors::unknown_module(&format!("#{}", id.index())))
    }
}

/// Handed to [`RigModule::compose`] to add children to the composing
/// module.
pub struct Composer<'a> {
    graph: &'a mut ModuleGraph,
    id: ModuleId,
}

impl Composer<'_> {
    /// Id of the module being composed.
    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn graph(&self) -> &ModuleGraph {
        &*self.graph
    }

    /// Add `module` as the next child.
    pub fn add_module(&mut self, module: impl RigModule) -> RigResult<ModuleId> {
        self.add_boxed(Box::new(module))
    }

    pub fn add_boxed(&mut self, module: Box<dyn RigModule>) -> RigResult<ModuleId> {
        self.graph.add_module(self.id, module)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
