//! Rig IR - value types shared by every rig crate.
//!
//! This crate contains the plain data the framework passes around:
//! - [`BuildStep`]: the 21 ordered lifecycle stages
//! - [`ModuleIdentity`] / [`ModuleKey`]: who a module is
//! - [`ModuleId`] / [`NodeId`]: arena handles for modules and scene nodes
//! - [`OutputPointer`]: a late-bound request for another module's output
//! - [`Hook`]: every way a module can name the thing it attaches to
//! - [`PublishCategory`]: the rig-data categories modules publish
//!
//! Nothing here touches the scene or the module graph.

mod build_step;
mod category;
mod hook;
mod identity;
mod node;
mod output;
mod side;

pub use build_step::{BuildStep, MainStep, Phase, SubStep};
pub use category::PublishCategory;
pub use hook::{Hook, ModuleRef};
pub use identity::{ModuleId, ModuleIdentity, ModuleKey};
pub use node::NodeId;
pub use output::{OutputIndex, OutputKind, OutputPointer};
pub use side::Side;
