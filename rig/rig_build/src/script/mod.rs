//! Build scripts and the registry that finds them by name.

use std::any::Any;

use rig_diagnostic::{errors, RigResult};
use rig_ir::BuildStep;
use rig_module::{Composer, StepContext, StepOrder};
use rustc_hash::FxHashMap;

/// What to build for an asset.
///
/// A build script becomes the asset root module of a [`RigBuild`](crate::RigBuild):
/// it composes the top-level modules and may do asset-wide work per step.
pub trait BuildScript: 'static {
    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()>;

    fn step_order(&self, step: BuildStep) -> StepOrder {
        let _ = step;
        StepOrder::AfterChildren
    }

    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        let _ = (step, cx);
        Ok(())
    }
}

type Export = Box<dyn Fn() -> Box<dyn Any>>;

/// Named build-script exports.
///
/// Entries registered through [`ScriptRegistry::register`] always produce a
/// build script. [`ScriptRegistry::register_export`] accepts anything;
/// the check happens when the export is instantiated.
#[derive(Default)]
pub struct ScriptRegistry {
    exports: FxHashMap<String, Export>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: BuildScript>(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> S + 'static,
    ) {
        self.register_export(name, move || {
            let script: Box<dyn BuildScript> = Box::new(factory());
            Box::new(script)
        });
    }

    /// Register an untyped export. Instantiating it succeeds only if it
    /// yields a `Box<dyn BuildScript>`.
    pub fn register_export(
        &mut self,
        name: impl Into<String>,
        export: impl Fn() -> Box<dyn Any> + 'static,
    ) {
        let name = name.into();
        if self.exports.insert(name.clone(), Box::new(export)).is_some() {
            tracing::debug!(%name, "replaced build script export");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.exports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn instantiate(&self, name: &str) -> RigResult<Box<dyn BuildScript>> {
        let export = self
            .exports
            .get(name)
            .ok_or_else(|| errors::script_not_found(name))?;
        export()
            .downcast::<Box<dyn BuildScript>>()
            .map(|script| *script)
            .map_err(|_| errors::not_a_build_script(name))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
