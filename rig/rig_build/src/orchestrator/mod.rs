//! The resumable build orchestrator.

use rig_diagnostic::RigResult;
use rig_ir::{BuildStep, ModuleId, ModuleIdentity, PublishCategory, Side};
use rig_module::{
    AssetGroups, Composer, ModuleGraph, RigEnv, RigModule, StepContext, StepOrder,
};
use rig_scene::{RigDataArtifact, RigDataIo, Scene};

use crate::{BuildConfig, BuildScript};

/// Module name of the asset root; its key is `C_assetRootModule`.
pub const ASSET_ROOT_MODULE_NAME: &str = "assetRootModule";

/// Root of every build: forwards to the build script.
struct AssetRoot {
    identity: ModuleIdentity,
    script: Box<dyn BuildScript>,
}

impl RigModule for AssetRoot {
    fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()> {
        self.script.compose(composer)
    }

    fn step_order(&self, step: BuildStep) -> StepOrder {
        self.script.step_order(step)
    }

    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        self.script.run_step(step, cx)
    }
}

/// One build of one asset.
///
/// Remembers the last step it started and whether that run finished, so a
/// later [`RigBuild::run`] continues after it instead of starting over.
pub struct RigBuild {
    config: BuildConfig,
    graph: ModuleGraph,
    asset_groups: AssetGroups,
    current_step: Option<BuildStep>,
    current_step_completed: bool,
}

impl RigBuild {
    /// Prepare the scene and compose the module tree.
    ///
    /// The scene is cleared and the asset groups are created before the
    /// script composes, so a composing error leaves an empty asset behind.
    #[tracing::instrument(level = "debug", skip_all, fields(asset = %config.asset_name()))]
    pub fn new(
        config: BuildConfig,
        script: Box<dyn BuildScript>,
        scene: &mut dyn Scene,
    ) -> RigResult<Self> {
        scene.clear();
        let asset_groups = AssetGroups::create(scene, config.asset_name())?;
        let root = AssetRoot {
            identity: ModuleIdentity::new(Side::Center, ASSET_ROOT_MODULE_NAME),
            script,
        };
        let graph = ModuleGraph::with_asset_groups(Box::new(root), Some(asset_groups))?;
        tracing::debug!(modules = graph.len(), "composed rig");
        Ok(RigBuild {
            config,
            graph,
            asset_groups,
            current_step: None,
            current_step_completed: false,
        })
    }

    /// Run every step after the current one, up to and including
    /// `stop_after`.
    ///
    /// If `stop_after` is not after the current step nothing runs and the
    /// build is marked completed. An error leaves the failing step current
    /// and not completed.
    #[tracing::instrument(
        level = "debug",
        skip(self, env),
        fields(asset = %self.config.asset_name(), from = ?self.current_step)
    )]
    pub fn run(&mut self, stop_after: BuildStep, env: &mut RigEnv<'_>) -> RigResult<()> {
        if self.current_step.is_some_and(|current| current >= stop_after) {
            tracing::debug!(%stop_after, "requested step already executed");
            self.current_step_completed = true;
            return Ok(());
        }

        let root = self.graph.root();
        for step in BuildStep::ALL {
            if self.current_step.is_some_and(|current| step <= current) {
                continue;
            }
            self.current_step = Some(step);
            self.current_step_completed = false;
            tracing::debug!(%step, "running build step");
            self.graph.run_step(root, step, env)?;
            if step == stop_after {
                break;
            }
        }
        self.current_step_completed = true;
        Ok(())
    }

    /// [`RigBuild::run`] with the terminal step given by name, e.g.
    /// `("finalize", "post")` or `("puppet_build", "")`.
    pub fn run_named(&mut self, step: &str, sub_step: &str, env: &mut RigEnv<'_>) -> RigResult<()> {
        let stop_after = BuildStep::from_parts(step, sub_step)?;
        self.run(stop_after, env)
    }

    /// Last step started, `None` before the first run.
    pub fn current_step(&self) -> Option<BuildStep> {
        self.current_step
    }

    /// Whether the last run reached its terminal step without error.
    pub fn current_step_completed(&self) -> bool {
        self.current_step_completed
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn asset_groups(&self) -> &AssetGroups {
        &self.asset_groups
    }

    pub fn asset_root(&self) -> ModuleId {
        self.graph.root()
    }

    /// Publish `category` for the whole rig.
    pub fn publish_rigdata(
        &self,
        category: PublishCategory,
        scene: &dyn Scene,
        rigdata: &mut dyn RigDataIo,
    ) -> RigResult<Vec<RigDataArtifact>> {
        self.graph
            .publish_rigdata(self.graph.root(), category, scene, rigdata)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
