//! Per-module output registration.
//!
//! Each module keeps its outputs in insertion order per [`OutputKind`].
//! Keys are strings: positional outputs are stored under `"0"`, `"1"`, ...;
//! named ones under their name (`"root"`, `"00"`).

use rig_diagnostic::{errors, RigResult};
use rig_ir::{ModuleKey, NodeId, OutputIndex, OutputKind};

/// Outputs of one module.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputRegistry {
    entries: [Vec<(String, NodeId)>; 3],
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `key`, replacing an existing entry in place so
    /// its position is kept.
    pub fn insert(&mut self, kind: OutputKind, key: impl Into<String>, node: NodeId) {
        let key = key.into();
        let entries = &mut self.entries[kind.index()];
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = node,
            None => entries.push((key, node)),
        }
    }

    pub fn get(&self, kind: OutputKind, key: &str) -> Option<NodeId> {
        self.entries[kind.index()]
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| *node)
    }

    /// Keys in registration order.
    pub fn keys(&self, kind: OutputKind) -> impl Iterator<Item = &str> + '_ {
        self.entries[kind.index()].iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self, kind: OutputKind) -> usize {
        self.entries[kind.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Vec::is_empty)
    }

    /// Resolve `index` the way output pointers do.
    ///
    /// An exact key match wins. Otherwise a negative position counts back
    /// from the end of the numeric keys (those made only of ASCII digits),
    /// in registration order: with `["top", "00", "01"]`, `-1` is `"01"`.
    pub fn resolve(
        &self,
        module_key: &ModuleKey,
        kind: OutputKind,
        index: &OutputIndex,
    ) -> RigResult<NodeId> {
        let key = index.key();
        if let Some(node) = self.get(kind, &key) {
            return Ok(node);
        }

        if let Some(back) = index.from_end() {
            let numeric: Vec<&str> = self.keys(kind).filter(|key| is_numeric(key)).collect();
            if let Some(key) = numeric.len().checked_sub(back).map(|i| numeric[i]) {
                if let Some(node) = self.get(kind, key) {
                    return Ok(node);
                }
            }
        }

        Err(errors::missing_output(
            module_key.as_str(),
            kind.suffix(),
            &key,
            self.keys(kind).map(str::to_string).collect(),
        ))
    }
}

fn is_numeric(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Outputs a module hands to [`StepContext::store_output_data`].
///
/// [`StepContext::store_output_data`]: crate::StepContext::store_output_data
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputData {
    entries: Vec<(OutputKind, String, NodeId)>,
}

impl OutputData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joints stored under their position, `"0"` onwards.
    #[must_use]
    pub fn joints(self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.positional(OutputKind::Joint, nodes)
    }

    #[must_use]
    pub fn controls(self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.positional(OutputKind::Control, nodes)
    }

    #[must_use]
    pub fn transforms(self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.positional(OutputKind::Transform, nodes)
    }

    /// Joints stored under explicit keys.
    #[must_use]
    pub fn joints_keyed<K: Into<String>>(
        self,
        pairs: impl IntoIterator<Item = (K, NodeId)>,
    ) -> Self {
        self.keyed(OutputKind::Joint, pairs)
    }

    #[must_use]
    pub fn controls_keyed<K: Into<String>>(
        self,
        pairs: impl IntoIterator<Item = (K, NodeId)>,
    ) -> Self {
        self.keyed(OutputKind::Control, pairs)
    }

    #[must_use]
    pub fn transforms_keyed<K: Into<String>>(
        self,
        pairs: impl IntoIterator<Item = (K, NodeId)>,
    ) -> Self {
        self.keyed(OutputKind::Transform, pairs)
    }

    #[must_use]
    pub fn with(mut self, kind: OutputKind, key: impl Into<String>, node: NodeId) -> Self {
        self.entries.push((kind, key.into(), node));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn positional(self, kind: OutputKind, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.keyed(
            kind,
            nodes
                .into_iter()
                .enumerate()
                .map(|(position, node)| (position.to_string(), node)),
        )
    }

    fn keyed<K: Into<String>>(
        mut self,
        kind: OutputKind,
        pairs: impl IntoIterator<Item = (K, NodeId)>,
    ) -> Self {
        self.entries.extend(
            pairs
                .into_iter()
                .map(|(key, node)| (kind, key.into(), node)),
        );
        self
    }

    pub(crate) fn store_into(self, registry: &mut OutputRegistry) {
        for (kind, key, node) in self.entries {
            registry.insert(kind, key, node);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
