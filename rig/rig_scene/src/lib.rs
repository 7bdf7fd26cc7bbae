//! Rig Scene - the host application as the framework sees it.
//!
//! The framework never talks to a DCC directly. Everything it needs from the
//! host goes through two capability traits:
//!
//! - [`Scene`]: create, parent, find and delete nodes; read and write
//!   attributes.
//! - [`RigDataIo`]: publish and reload hand-authored node state per module
//!   and [`PublishCategory`](rig_ir::PublishCategory).
//!
//! [`MemoryScene`], [`MemoryRigData`] and [`VersionedRigData`] implement them
//! in-process for tests and headless builds.

mod rigdata;
mod scene;

pub use rigdata::{
    MemoryRigData, NodeSnapshot, RigDataArtifact, RigDataIo, RigDataSnapshot, VersionedRigData,
};
pub use scene::{attr_names, AttrValue, MemoryScene, Scene};
