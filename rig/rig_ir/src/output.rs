//! Output pointers: late-bound requests for another module's outputs.

use std::fmt;

use crate::ModuleKey;

/// Kind of output a module publishes for others to attach to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputKind {
    Joint,
    Control,
    Transform,
}

impl OutputKind {
    pub const ALL: [OutputKind; 3] = [
        OutputKind::Joint,
        OutputKind::Control,
        OutputKind::Transform,
    ];

    /// Short tag used in messages and pointer text (`Jnt`, `Ctl`, `Trn`).
    pub fn suffix(self) -> &'static str {
        match self {
            OutputKind::Joint => "Jnt",
            OutputKind::Control => "Ctl",
            OutputKind::Transform => "Trn",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        OutputKind::ALL.into_iter().find(|kind| kind.suffix() == suffix)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Index of an output: a position (`0`, `-1`) or a name (`"root"`, `"fk0"`).
///
/// Positions are stored under their decimal text, so `Position(1)` and
/// `Name("1")` address the same slot. Only a negative `Position` falls back
/// to indexing from the end of the numeric keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputIndex {
    Position(i64),
    Name(String),
}

impl OutputIndex {
    /// Registry key for this index.
    pub fn key(&self) -> String {
        match self {
            OutputIndex::Position(position) => position.to_string(),
            OutputIndex::Name(name) => name.clone(),
        }
    }

    /// Distance from the end for negative positions (`-1` is `Some(1)`).
    pub fn from_end(&self) -> Option<usize> {
        match self {
            OutputIndex::Position(position) if *position < 0 => {
                usize::try_from(position.unsigned_abs()).ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for OutputIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputIndex::Position(position) => write!(f, "{position}"),
            OutputIndex::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for OutputIndex {
    fn from(position: i64) -> Self {
        OutputIndex::Position(position)
    }
}

impl From<i32> for OutputIndex {
    fn from(position: i32) -> Self {
        OutputIndex::Position(i64::from(position))
    }
}

impl From<&str> for OutputIndex {
    fn from(name: &str) -> Self {
        OutputIndex::Name(name.to_string())
    }
}

impl From<String> for OutputIndex {
    fn from(name: String) -> Self {
        OutputIndex::Name(name)
    }
}

/// A lookup request for an output of another module.
///
/// Not a live reference: resolving it reads whatever node is registered at
/// that moment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutputPointer {
    module_key: ModuleKey,
    kind: OutputKind,
    index: OutputIndex,
}

impl OutputPointer {
    pub fn new(
        kind: OutputKind,
        module_key: impl Into<ModuleKey>,
        index: impl Into<OutputIndex>,
    ) -> Self {
        OutputPointer {
            module_key: module_key.into(),
            kind,
            index: index.into(),
        }
    }

    /// Joint output of a module, e.g. `OutputPointer::jnt("C_spine", 0)`.
    pub fn jnt(module_key: impl Into<ModuleKey>, index: impl Into<OutputIndex>) -> Self {
        Self::new(OutputKind::Joint, module_key, index)
    }

    /// Control output of a module.
    pub fn ctl(module_key: impl Into<ModuleKey>, index: impl Into<OutputIndex>) -> Self {
        Self::new(OutputKind::Control, module_key, index)
    }

    /// Transform output of a module.
    pub fn trn(module_key: impl Into<ModuleKey>, index: impl Into<OutputIndex>) -> Self {
        Self::new(OutputKind::Transform, module_key, index)
    }

    #[inline]
    pub fn module_key(&self) -> &ModuleKey {
        &self.module_key
    }

    #[inline]
    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    #[inline]
    pub fn index(&self) -> &OutputIndex {
        &self.index
    }

    /// Same module and index, different kind.
    #[must_use]
    pub fn with_kind(&self, kind: OutputKind) -> Self {
        OutputPointer {
            kind,
            ..self.clone()
        }
    }

    /// Same module and kind, different index.
    #[must_use]
    pub fn with_index(&self, index: impl Into<OutputIndex>) -> Self {
        OutputPointer {
            index: index.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for OutputPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind.suffix(), self.module_key, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn positions_and_names_share_keys() {
        assert_eq!(OutputIndex::from(1).key(), "1");
        assert_eq!(OutputIndex::from("1").key(), "1");
        assert_eq!(OutputIndex::from("root").key(), "root");
    }

    #[test]
    fn only_negative_positions_index_from_end() {
        assert_eq!(OutputIndex::from(-1).from_end(), Some(1));
        assert_eq!(OutputIndex::from(-3_i64).from_end(), Some(3));
        assert_eq!(OutputIndex::from(0).from_end(), None);
        assert_eq!(OutputIndex::from("-1").from_end(), None);
    }

    #[test]
    fn pointer_display() {
        assert_eq!(OutputPointer::jnt("C_spine", 0).to_string(), "Jnt(C_spine, 0)");
        assert_eq!(OutputPointer::ctl("C_main", -1).to_string(), "Ctl(C_main, -1)");
        assert_eq!(OutputPointer::trn("L_arm", "ik").to_string(), "Trn(L_arm, ik)");
    }

    #[test]
    fn with_kind_and_index_keep_module() {
        let pointer = OutputPointer::ctl("C_neck", 2);
        let joint = pointer.with_kind(OutputKind::Joint).with_index(0);
        assert_eq!(joint, OutputPointer::jnt("C_neck", 0));
    }

    #[test]
    fn suffixes_round_trip() {
        for kind in OutputKind::ALL {
            assert_eq!(OutputKind::from_suffix(kind.suffix()), Some(kind));
        }
        assert_eq!(OutputKind::from_suffix("Geo"), None);
    }
}
