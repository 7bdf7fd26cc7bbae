//! The scene capability surface and its in-memory implementation.

use rig_diagnostic::{errors, RigError, RigResult};
use rig_ir::NodeId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Attribute names the framework itself writes.
pub mod attr_names {
    pub const INHERITS_TRANSFORM: &str = "inheritsTransform";
    pub const LOCKED: &str = "locked";
    pub const OVERRIDE_ENABLED: &str = "overrideEnabled";
    pub const OVERRIDE_DISPLAY_TYPE: &str = "overrideDisplayType";

    /// `overrideDisplayType` value for reference (unselectable) display.
    pub const DISPLAY_REFERENCE: i64 = 2;
}

/// Value of a node attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// What the framework needs from the host scene graph.
///
/// Nodes are addressed by [`NodeId`] handles. Names are unique within a
/// scene; an implementation renames on collision the way the host does.
pub trait Scene {
    /// Delete every node.
    fn clear(&mut self);

    /// Create an empty transform group and return its handle.
    ///
    /// The returned node may carry a different name if `name` is taken.
    fn create_group(&mut self, name: &str, parent: Option<NodeId>) -> RigResult<NodeId>;

    /// Reparent `node`; `None` moves it to the world.
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> RigResult<()>;

    fn node_exists(&self, node: NodeId) -> bool;

    /// Look a node up by its exact name.
    fn find(&self, name: &str) -> Option<NodeId>;

    fn node_name(&self, node: NodeId) -> Option<&str>;

    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    /// Children in creation order.
    fn children_of(&self, node: NodeId) -> Vec<NodeId>;

    /// Delete `node` and everything below it.
    fn delete(&mut self, node: NodeId) -> RigResult<()>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: AttrValue) -> RigResult<()>;

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue>;

    /// All attributes of `node` in the order they were first set.
    fn attrs(&self, node: NodeId) -> Vec<(String, AttrValue)>;
}

struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: Vec<(String, AttrValue)>,
}

/// In-process scene graph.
///
/// Handles are never reused, not even across [`Scene::clear`], so a stale
/// handle reads as a missing node instead of aliasing a new one.
#[derive(Default)]
pub struct MemoryScene {
    nodes: Vec<Option<NodeData>>,
    by_name: FxHashMap<String, NodeId>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Full `|`-separated path of a node, root first.
    pub fn path_of(&self, node: NodeId) -> Option<String> {
        let mut names = vec![self.node_name(node)?];
        let mut current = self.parent_of(node);
        while let Some(parent) = current {
            names.push(self.node_name(parent)?);
            current = self.parent_of(parent);
        }
        names.reverse();
        Some(names.join("|"))
    }

    fn data(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.raw() as usize)?.as_ref()
    }

    fn data_mut(&mut self, node: NodeId) -> RigResult<&mut NodeData> {
        self.nodes
            .get_mut(node.raw() as usize)
            .and_then(Option::as_mut)
            .ok_or_else(|| missing(node))
    }

    /// `name`, or `name1`, `name2`, ... for the first free one.
    fn unique_name(&self, name: &str) -> String {
        if !self.by_name.contains_key(name) {
            return name.to_string();
        }
        (1_u32..)
            .map(|n| format!("{name}{n}"))
            .find(|candidate| !self.by_name.contains_key(candidate))
            .unwrap_or_else(|| name.to_string())
    }

    fn detach(&mut self, node: NodeId) -> RigResult<()> {
        if let Some(parent) = self.data(node).and_then(|data| data.parent) {
            self.data_mut(parent)?.children.retain(|child| *child != node);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }
}

fn missing(node: NodeId) -> RigError {
    errors::node_not_found(&format!("#{}", node.raw()))
}

impl Scene for MemoryScene {
    fn clear(&mut self) {
        for slot in &mut self.nodes {
            *slot = None;
        }
        self.by_name.clear();
    }

    fn create_group(&mut self, name: &str, parent: Option<NodeId>) -> RigResult<NodeId> {
        if let Some(parent) = parent {
            if !self.node_exists(parent) {
                return Err(missing(parent));
            }
        }
        let id = NodeId::new(
            u32::try_from(self.nodes.len())
                .unwrap_or_else(|_| panic!("scene node count exceeds u32::MAX")),
        );
        let name = self.unique_name(name);

        self.nodes.push(Some(NodeData {
            name: name.clone(),
            parent,
            children: Vec::new(),
            attrs: Vec::new(),
        }));
        self.by_name.insert(name, id);
        if let Some(parent) = parent {
            self.data_mut(parent)?.children.push(id);
        }
        Ok(id)
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> RigResult<()> {
        if !self.node_exists(node) {
            return Err(missing(node));
        }
        if let Some(parent) = parent {
            if !self.node_exists(parent) {
                return Err(missing(parent));
            }
            if self.is_ancestor(node, parent) {
                return Err(errors::parent_cycle(
                    self.node_name(node).unwrap_or_default(),
                    self.node_name(parent).unwrap_or_default(),
                ));
            }
        }

        self.detach(node)?;
        self.data_mut(node)?.parent = parent;
        if let Some(parent) = parent {
            self.data_mut(parent)?.children.push(node);
        }
        Ok(())
    }

    fn node_exists(&self, node: NodeId) -> bool {
        self.data(node).is_some()
    }

    fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.data(node).map(|data| data.name.as_str())
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.data(node)?.parent
    }

    fn children_of(&self, node: NodeId) -> Vec<NodeId> {
        self.data(node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn delete(&mut self, node: NodeId) -> RigResult<()> {
        if !self.node_exists(node) {
            return Err(missing(node));
        }
        self.detach(node)?;

        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(data) = self.nodes.get_mut(id.raw() as usize).and_then(Option::take) {
                self.by_name.remove(&data.name);
                pending.extend(data.children);
            }
        }
        Ok(())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: AttrValue) -> RigResult<()> {
        let data = self.data_mut(node)?;
        match data.attrs.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => data.attrs.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&AttrValue> {
        self.data(node)?
            .attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    fn attrs(&self, node: NodeId) -> Vec<(String, AttrValue)> {
        self.data(node)
            .map(|data| data.attrs.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
