//! Build scripts for exercising the orchestrator and sessions.

use std::cell::RefCell;
use std::rc::Rc;

use rig_diagnostic::{errors, RigResult};
use rig_ir::{BuildStep, ModuleIdentity, Side};
use rig_module::{Composer, RigModule, StepContext};

use crate::BuildScript;

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

struct Empty {
    identity: ModuleIdentity,
}

impl RigModule for Empty {
    fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }
}

/// Composes one empty center module per name.
pub struct Bare {
    names: Vec<String>,
}

impl Bare {
    pub fn new(names: &[&str]) -> Self {
        Bare {
            names: names.iter().map(ToString::to_string).collect(),
        }
    }
}

impl BuildScript for Bare {
    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()> {
        for name in &self.names {
            composer.add_module(Empty {
                identity: ModuleIdentity::new(Side::Center, name.as_str()),
            })?;
        }
        Ok(())
    }
}

/// Logs every step the asset root runs; fails at `fail_at` if set.
pub struct Stepped {
    log: Log,
    fail_at: Option<BuildStep>,
}

impl Stepped {
    pub fn new(log: &Log) -> Self {
        Stepped {
            log: Rc::clone(log),
            fail_at: None,
        }
    }

    pub fn failing_at(mut self, step: BuildStep) -> Self {
        self.fail_at = Some(step);
        self
    }
}

impl BuildScript for Stepped {
    fn compose(&mut self, composer: &mut Composer<'_>) -> RigResult<()> {
        Bare::new(&["base"]).compose(composer)
    }

    fn run_step(&mut self, step: BuildStep, cx: &mut StepContext<'_>) -> RigResult<()> {
        if self.fail_at == Some(step) {
            return Err(errors::node_not_found(&cx.mk("missing_GRP")));
        }
        self.log.borrow_mut().push(step.to_string());
        Ok(())
    }
}
