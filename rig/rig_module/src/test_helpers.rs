//! Test modules for exercising the graph without real rig parts.
//!
//! - [`Recorder`] logs every step it runs into a shared [`Log`].
//! - [`Scripted`] runs a closure for each step.
//! - [`run_steps`] dispatches steps on a graph against in-memory host
//!   services.

use std::cell::RefCell;
use std::rc::Rc;

use rig_diagnostic::RigResult;
use rig_ir::{BuildStep, ModuleIdentity, NodeId, OutputIndex, Side};
use rig_scene::{MemoryRigData, MemoryScene};

use crate::{Composer, ModuleGraph, PuppetModule, RigEnv, RigModule, StepContext, StepOrder};

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Logs `"{key}:{step}"` for every step and composes the given children.
pub struct Recorder {
    identity: ModuleIdentity,
    log: Log,
    order: StepOrder,
    children: Vec<Box<dyn RigModule>>,
}

impl Recorder {
    pub fn new(name: &str, log: &Log) -> Self {
        Recorder {
            identity: ModuleIdentity::new(Side::Center, name),
            log: Rc::clone(log),
            order: StepOrder::AfterChildren,
            children: Vec::new(),
        }
    }

    pub fn before_children(mut self) -> Self {
        self.order = StepOrder::BeforeChildren;
        self
    }

    pub fn child(mut self, child: impl RigModule) -> Self {
        self.children.push(Box::new(child));
        self
    }
}

impl RigModule for Recorder {
    fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()> {
        for child in self.children.drain(..) {
            composer.add_boxed(child)?;
        }
        Ok(())
    }

    fn step_order(&self, _step: BuildStep) -> StepOrder {
        self.order
    }

    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        self.log
            .borrow_mut()
            .push(format!("{}:{step}", cx.module_key()));
        Ok(())
    }
}

pub type StepFn = Box<dyn FnMut(BuildStep, &mut StepContext<'_>) -> RigResult<()>>;

/// Runs a closure for every step; hooks resolve through a [`PuppetModule`].
pub struct Scripted {
    pub puppet: PuppetModule,
    on_step: StepFn,
}

impl Scripted {
    pub fn new(
        name: &str,
        on_step: impl FnMut(BuildStep, &mut StepContext<'_>) -> RigResult<()> + 'static,
    ) -> Self {
        Scripted {
            puppet: PuppetModule::new(Side::Center, name),
            on_step: Box::new(on_step),
        }
    }

    pub fn with_joints(mut self, joints: Vec<NodeId>) -> Self {
        self.puppet.joints = joints;
        self
    }
}

impl RigModule for Scripted {
    fn identity(&self) -> &ModuleIdentity {
        self.puppet.identity()
    }

    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        (self.on_step)(step, cx)
    }

    fn out_hook(&self, index: &OutputIndex) -> RigResult<NodeId> {
        self.puppet.out_joint(index)
    }
}

/// Run `steps` on the whole graph.
pub fn run_steps(
    graph: &mut ModuleGraph,
    scene: &mut MemoryScene,
    rigdata: &mut MemoryRigData,
    steps: &[BuildStep],
) -> RigResult<()> {
    let mut env = RigEnv::new(scene, rigdata);
    let root = graph.root();
    for &step in steps {
        graph.run_step(root, step, &mut env)?;
    }
    Ok(())
}
