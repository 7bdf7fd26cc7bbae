//! Rig-data persistence: hand-authored node state that survives a rebuild.
//!
//! A module publishes the nodes it owns per [`PublishCategory`]; a later
//! build loads the latest published version back onto nodes of the same
//! name.
//!
//! # On-disk layout ([`VersionedRigData`])
//!
//! ```text
//! <root>/
//! └── <module_key>/
//!     ├── guides_v001/<module_key>_guides.bin   # bincode RigDataSnapshot
//!     ├── guides_v002/<module_key>_guides.bin
//!     └── ctls_v001/<module_key>_ctls.bin
//! ```

use std::path::{Path, PathBuf};

use rig_diagnostic::{errors, RigResult};
use rig_ir::{ModuleKey, NodeId, PublishCategory};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{AttrValue, Scene};

/// Captured state of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub attrs: Vec<(String, AttrValue)>,
}

/// Captured state of a module's published nodes in one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigDataSnapshot {
    pub module_key: String,
    pub category: String,
    pub nodes: Vec<NodeSnapshot>,
}

impl RigDataSnapshot {
    /// Capture `nodes` from the scene. Every node must exist.
    pub fn capture(
        module_key: &ModuleKey,
        category: PublishCategory,
        nodes: &[NodeId],
        scene: &dyn Scene,
    ) -> RigResult<Self> {
        let nodes = nodes
            .iter()
            .map(|&node| {
                let name = scene
                    .node_name(node)
                    .ok_or_else(|| errors::node_not_found(&format!("#{}", node.raw())))?;
                Ok(NodeSnapshot {
                    name: name.to_string(),
                    attrs: scene.attrs(node),
                })
            })
            .collect::<RigResult<Vec<_>>>()?;
        Ok(RigDataSnapshot {
            module_key: module_key.to_string(),
            category: category.tag().to_string(),
            nodes,
        })
    }

    /// Write the captured attributes back onto nodes found by name.
    ///
    /// Nodes that no longer exist are skipped. Returns how many were applied.
    pub fn apply(&self, scene: &mut dyn Scene) -> RigResult<usize> {
        let mut applied = 0;
        for snapshot in &self.nodes {
            let Some(node) = scene.find(&snapshot.name) else {
                tracing::warn!(
                    module = %self.module_key,
                    category = %self.category,
                    node = %snapshot.name,
                    "skipping rig data for missing node"
                );
                continue;
            };
            for (name, value) in &snapshot.attrs {
                scene.set_attr(node, name, value.clone())?;
            }
            applied += 1;
        }
        Ok(applied)
    }
}

/// Where a publish ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RigDataArtifact {
    pub module_key: ModuleKey,
    pub category: PublishCategory,
    /// 1-based version number.
    pub version: u32,
    /// File written, for stores that write files.
    pub path: Option<PathBuf>,
}

/// Persistence of published nodes.
pub trait RigDataIo {
    /// Store a new version of `nodes`. Publishing nothing is a no-op and
    /// returns `None`.
    fn publish(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        nodes: &[NodeId],
        scene: &dyn Scene,
    ) -> RigResult<Option<RigDataArtifact>>;

    /// Apply the latest stored version. `false` when there is nothing to load.
    fn load(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        scene: &mut dyn Scene,
    ) -> RigResult<bool>;
}

/// Keeps every published version in memory.
#[derive(Default)]
pub struct MemoryRigData {
    versions: FxHashMap<(ModuleKey, PublishCategory), Vec<RigDataSnapshot>>,
}

impl MemoryRigData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of versions published for a module and category.
    pub fn version_count(&self, module_key: &ModuleKey, category: PublishCategory) -> usize {
        self.versions
            .get(&(module_key.clone(), category))
            .map_or(0, Vec::len)
    }

    pub fn latest(
        &self,
        module_key: &ModuleKey,
        category: PublishCategory,
    ) -> Option<&RigDataSnapshot> {
        self.versions.get(&(module_key.clone(), category))?.last()
    }
}

impl RigDataIo for MemoryRigData {
    fn publish(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        nodes: &[NodeId],
        scene: &dyn Scene,
    ) -> RigResult<Option<RigDataArtifact>> {
        if nodes.is_empty() {
            return Ok(None);
        }
        let snapshot = RigDataSnapshot::capture(module_key, category, nodes, scene)?;
        let versions = self
            .versions
            .entry((module_key.clone(), category))
            .or_default();
        versions.push(snapshot);
        Ok(Some(RigDataArtifact {
            module_key: module_key.clone(),
            category,
            version: u32::try_from(versions.len()).unwrap_or(u32::MAX),
            path: None,
        }))
    }

    fn load(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        scene: &mut dyn Scene,
    ) -> RigResult<bool> {
        match self.latest(module_key, category) {
            Some(snapshot) => {
                snapshot.apply(scene)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Versioned bincode files under a root directory.
pub struct VersionedRigData {
    root: PathBuf,
}

impl VersionedRigData {
    /// Use `root` as the rig-data directory. Nothing is created until the
    /// first publish.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        VersionedRigData { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Latest published version, if any.
    pub fn latest_version(
        &self,
        module_key: &ModuleKey,
        category: PublishCategory,
    ) -> RigResult<Option<u32>> {
        let module_dir = self.root.join(module_key.as_str());
        if !module_dir.is_dir() {
            return Ok(None);
        }
        let prefix = format!("{}_v", category.tag());
        let entries =
            std::fs::read_dir(&module_dir).map_err(|e| errors::io_error(&module_dir, &e))?;

        let mut latest = None;
        for entry in entries {
            let entry = entry.map_err(|e| errors::io_error(&module_dir, &e))?;
            let file_name = entry.file_name();
            let version = file_name
                .to_str()
                .and_then(|name| name.strip_prefix(&prefix))
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|digits| digits.parse::<u32>().ok());
            if version > latest {
                latest = version;
            }
        }
        Ok(latest)
    }

    /// File holding a given version.
    pub fn version_path(
        &self,
        module_key: &ModuleKey,
        category: PublishCategory,
        version: u32,
    ) -> PathBuf {
        let tag = category.tag();
        self.root
            .join(module_key.as_str())
            .join(format!("{tag}_v{version:03}"))
            .join(format!("{module_key}_{tag}.bin"))
    }
}

impl RigDataIo for VersionedRigData {
    fn publish(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        nodes: &[NodeId],
        scene: &dyn Scene,
    ) -> RigResult<Option<RigDataArtifact>> {
        if nodes.is_empty() {
            return Ok(None);
        }
        let snapshot = RigDataSnapshot::capture(module_key, category, nodes, scene)?;
        let version = match self.latest_version(module_key, category)? {
            None => 1,
            Some(latest) => latest.checked_add(1).ok_or_else(|| {
                errors::invalid_rig_data(
                    module_key.as_str(),
                    category.tag(),
                    format!("no version number left after v{latest}"),
                )
            })?,
        };
        let path = self.version_path(module_key, category, version);

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| errors::io_error(dir, &e))?;
        }
        let data = bincode::serialize(&snapshot).map_err(|e| {
            errors::invalid_rig_data(module_key.as_str(), category.tag(), e.to_string())
        })?;
        std::fs::write(&path, data).map_err(|e| errors::io_error(&path, &e))?;

        tracing::debug!(
            module = %module_key,
            %category,
            version,
            path = %path.display(),
            "published rig data"
        );
        Ok(Some(RigDataArtifact {
            module_key: module_key.clone(),
            category,
            version,
            path: Some(path),
        }))
    }

    fn load(
        &mut self,
        module_key: &ModuleKey,
        category: PublishCategory,
        scene: &mut dyn Scene,
    ) -> RigResult<bool> {
        let Some(version) = self.latest_version(module_key, category)? else {
            return Ok(false);
        };
        let path = self.version_path(module_key, category, version);
        let data = std::fs::read(&path).map_err(|e| errors::io_error(&path, &e))?;
        let snapshot: RigDataSnapshot = bincode::deserialize(&data).map_err(|e| {
            errors::invalid_rig_data(module_key.as_str(), category.tag(), e.to_string())
        })?;

        let applied = snapshot.apply(scene)?;
        tracing::debug!(module = %module_key, %category, version, applied, "loaded rig data");
        Ok(true)
    }
}

#[cfg(test)]
mod tests;
