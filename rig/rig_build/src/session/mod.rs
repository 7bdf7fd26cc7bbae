//! Long-lived build entry point.
//!
//! A [`BuildSession`] holds the scene, the rig-data store and the last
//! [`RigBuild`]. Each [`BuildSession::build_rig`] call either continues
//! that build or starts a fresh one from a registered script.

use std::fmt;

use rig_diagnostic::RigResult;
use rig_ir::{BuildStep, PublishCategory};
use rig_module::RigEnv;
use rig_scene::{RigDataArtifact, RigDataIo, Scene};

use crate::{BuildConfig, RigBuild, ScriptRegistry};

/// Why a held build cannot be continued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResumeBlocker {
    NoExistingBuild,
    NeverStarted,
    /// The requested terminal step is not after the current step.
    AlreadyExecuted,
    /// The last run stopped on an error.
    LastStepIncomplete,
    /// The asset root group is gone from the scene.
    AssetRootMissing,
}

impl fmt::Display for ResumeBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResumeBlocker::NoExistingBuild => "no existing rig build found",
            ResumeBlocker::NeverStarted => "existing rig build was never started",
            ResumeBlocker::AlreadyExecuted => "requested end step was already executed",
            ResumeBlocker::LastStepIncomplete => "last rig step was not completed",
            ResumeBlocker::AssetRootMissing => "asset root group node not found",
        })
    }
}

/// Parameters of one [`BuildSession::build_rig`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildRequest {
    /// Registered name of the script to instantiate for a fresh build.
    pub script: String,
    pub stop_after: BuildStep,
    /// Start over even if the held build could continue.
    pub force_rebuild: bool,
}

impl BuildRequest {
    pub const DEFAULT_SCRIPT: &'static str = "rig_build";

    pub fn new(script: impl Into<String>) -> Self {
        BuildRequest {
            script: script.into(),
            stop_after: BuildStep::LAST,
            force_rebuild: false,
        }
    }

    #[must_use]
    pub fn stop_after(mut self, step: BuildStep) -> Self {
        self.stop_after = step;
        self
    }

    /// Terminal step by name, e.g. `("puppet_build", "")`.
    pub fn stop_after_named(self, step: &str, sub_step: &str) -> RigResult<Self> {
        Ok(self.stop_after(BuildStep::from_parts(step, sub_step)?))
    }

    #[must_use]
    pub fn force_rebuild(mut self, force: bool) -> Self {
        self.force_rebuild = force;
        self
    }
}

impl Default for BuildRequest {
    fn default() -> Self {
        BuildRequest::new(Self::DEFAULT_SCRIPT)
    }
}

pub struct BuildSession<S, D> {
    config: BuildConfig,
    scripts: ScriptRegistry,
    scene: S,
    rigdata: D,
    rig: Option<RigBuild>,
}

impl<S: Scene, D: RigDataIo> BuildSession<S, D> {
    /// Also installs the `RUST_LOG` subscriber, see [`init_tracing`](crate::init_tracing).
    pub fn new(config: BuildConfig, scripts: ScriptRegistry, scene: S, rigdata: D) -> Self {
        crate::init_tracing();
        BuildSession {
            config,
            scripts,
            scene,
            rigdata,
            rig: None,
        }
    }

    /// Continue the held build up to `request.stop_after` if possible,
    /// otherwise build from scratch.
    ///
    /// A fresh build replaces the held one before it runs, so a failing
    /// run stays inspectable through [`BuildSession::rig`].
    pub fn build_rig(&mut self, request: &BuildRequest) -> RigResult<()> {
        let resume = !request.force_rebuild
            && match self.resume_blocker(request.stop_after) {
                None => true,
                Some(blocker) => {
                    tracing::warn!(
                        reason = %blocker,
                        "cannot continue rig build, building from scratch"
                    );
                    false
                }
            };

        let mut env = RigEnv::new(&mut self.scene, &mut self.rigdata);
        match self.rig.as_mut() {
            Some(rig) if resume => {
                tracing::info!(
                    from = ?rig.current_step(),
                    to = %request.stop_after,
                    "continuing rig build"
                );
                rig.run(request.stop_after, &mut env)
            }
            _ => {
                let script = self.scripts.instantiate(&request.script)?;
                let rig = RigBuild::new(self.config.clone(), script, env.scene)?;
                self.rig.insert(rig).run(request.stop_after, &mut env)
            }
        }
    }

    /// Instantiate `script` and hold a fresh, not yet started build of it.
    ///
    /// The held build is only replaced if composing succeeds.
    pub fn prepare(&mut self, script: &str) -> RigResult<&mut RigBuild> {
        let script = self.scripts.instantiate(script)?;
        let rig = RigBuild::new(self.config.clone(), script, &mut self.scene)?;
        Ok(self.rig.insert(rig))
    }

    /// Why the held build cannot continue up to `stop_after`, if anything.
    pub fn resume_blocker(&self, stop_after: BuildStep) -> Option<ResumeBlocker> {
        let Some(rig) = &self.rig else {
            return Some(ResumeBlocker::NoExistingBuild);
        };
        let Some(current) = rig.current_step() else {
            return Some(ResumeBlocker::NeverStarted);
        };
        if current >= stop_after {
            return Some(ResumeBlocker::AlreadyExecuted);
        }
        if !rig.current_step_completed() {
            return Some(ResumeBlocker::LastStepIncomplete);
        }
        if !self.scene.node_exists(rig.asset_groups().root) {
            return Some(ResumeBlocker::AssetRootMissing);
        }
        None
    }

    /// Publish `category` for the held build. Nothing to publish without one.
    pub fn publish_rigdata(
        &mut self,
        category: PublishCategory,
    ) -> RigResult<Vec<RigDataArtifact>> {
        match &self.rig {
            Some(rig) => rig.publish_rigdata(category, &self.scene, &mut self.rigdata),
            None => Ok(Vec::new()),
        }
    }

    pub fn rig(&self) -> Option<&RigBuild> {
        self.rig.as_ref()
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn scripts_mut(&mut self) -> &mut ScriptRegistry {
        &mut self.scripts
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn rigdata(&self) -> &D {
        &self.rigdata
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
