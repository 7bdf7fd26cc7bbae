//! Rig-data categories.

use std::fmt;

/// Category of nodes a module publishes as rig data.
///
/// Hand-authored edits in these categories survive a from-scratch rebuild
/// through the publish/load cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublishCategory {
    Guides,
    Ctls,
    Constraints,
    SkinClusters,
    Blendshapes,
    Rigsets,
    DrivenKeys,
}

impl PublishCategory {
    pub const ALL: [PublishCategory; 7] = [
        PublishCategory::Guides,
        PublishCategory::Ctls,
        PublishCategory::Constraints,
        PublishCategory::SkinClusters,
        PublishCategory::Blendshapes,
        PublishCategory::Rigsets,
        PublishCategory::DrivenKeys,
    ];

    /// Tag used in artifact names.
    pub fn tag(self) -> &'static str {
        match self {
            PublishCategory::Guides => "guides",
            PublishCategory::Ctls => "ctls",
            PublishCategory::Constraints => "constraints",
            PublishCategory::SkinClusters => "skinClusters",
            PublishCategory::Blendshapes => "blendshapes",
            PublishCategory::Rigsets => "rigsets",
            PublishCategory::DrivenKeys => "drivenKeys",
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PublishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
