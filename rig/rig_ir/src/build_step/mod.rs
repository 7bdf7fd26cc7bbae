//! Build steps: the ordered lifecycle every module goes through.
//!
//! There are 21 steps: seven main steps, each with a `_pre` and `_post`
//! sub-step around it. The total order is the position in [`BuildStep::ALL`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rig_diagnostic::{errors, RigError, RigResult};

/// Coarse grouping of build steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Skeleton,
    Puppet,
    Deform,
    Finalize,
}

/// The seven main steps, without their pre/post sub-steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MainStep {
    SkeletonBuild,
    SkeletonConnect,
    PuppetBuild,
    PuppetConnect,
    DeformBuild,
    DeformConnect,
    Finalize,
}

impl MainStep {
    pub const ALL: [MainStep; 7] = [
        MainStep::SkeletonBuild,
        MainStep::SkeletonConnect,
        MainStep::PuppetBuild,
        MainStep::PuppetConnect,
        MainStep::DeformBuild,
        MainStep::DeformConnect,
        MainStep::Finalize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MainStep::SkeletonBuild => "skeleton_build",
            MainStep::SkeletonConnect => "skeleton_connect",
            MainStep::PuppetBuild => "puppet_build",
            MainStep::PuppetConnect => "puppet_connect",
            MainStep::DeformBuild => "deform_build",
            MainStep::DeformConnect => "deform_connect",
            MainStep::Finalize => "finalize",
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            MainStep::SkeletonBuild | MainStep::SkeletonConnect => Phase::Skeleton,
            MainStep::PuppetBuild | MainStep::PuppetConnect => Phase::Puppet,
            MainStep::DeformBuild | MainStep::DeformConnect => Phase::Deform,
            MainStep::Finalize => Phase::Finalize,
        }
    }
}

/// Position of a step relative to its main step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubStep {
    Pre,
    Main,
    Post,
}

impl SubStep {
    /// Name suffix as used by step names and build requests (`""` for main).
    pub fn suffix(self) -> &'static str {
        match self {
            SubStep::Pre => "pre",
            SubStep::Main => "",
            SubStep::Post => "post",
        }
    }
}

/// One of the 21 canonical build steps.
///
/// `Ord` follows the canonical sequence. Steps compare against plain step
/// names too: `BuildStep::PuppetBuild < "puppet_build_post"`. A name that is
/// not a step compares as neither equal nor ordered; use
/// [`BuildStep::compare_name`] to get the error instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildStep {
    SkeletonBuildPre,
    SkeletonBuild,
    SkeletonBuildPost,
    SkeletonConnectPre,
    SkeletonConnect,
    SkeletonConnectPost,
    PuppetBuildPre,
    PuppetBuild,
    PuppetBuildPost,
    PuppetConnectPre,
    PuppetConnect,
    PuppetConnectPost,
    DeformBuildPre,
    DeformBuild,
    DeformBuildPost,
    DeformConnectPre,
    DeformConnect,
    DeformConnectPost,
    FinalizePre,
    Finalize,
    FinalizePost,
}

impl BuildStep {
    /// Number of build steps.
    pub const COUNT: usize = 21;

    /// All steps in canonical order.
    pub const ALL: [BuildStep; BuildStep::COUNT] = [
        BuildStep::SkeletonBuildPre,
        BuildStep::SkeletonBuild,
        BuildStep::SkeletonBuildPost,
        BuildStep::SkeletonConnectPre,
        BuildStep::SkeletonConnect,
        BuildStep::SkeletonConnectPost,
        BuildStep::PuppetBuildPre,
        BuildStep::PuppetBuild,
        BuildStep::PuppetBuildPost,
        BuildStep::PuppetConnectPre,
        BuildStep::PuppetConnect,
        BuildStep::PuppetConnectPost,
        BuildStep::DeformBuildPre,
        BuildStep::DeformBuild,
        BuildStep::DeformBuildPost,
        BuildStep::DeformConnectPre,
        BuildStep::DeformConnect,
        BuildStep::DeformConnectPost,
        BuildStep::FinalizePre,
        BuildStep::Finalize,
        BuildStep::FinalizePost,
    ];

    /// Canonical step names, index-aligned with [`BuildStep::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "skeleton_build_pre",
        "skeleton_build",
        "skeleton_build_post",
        "skeleton_connect_pre",
        "skeleton_connect",
        "skeleton_connect_post",
        "puppet_build_pre",
        "puppet_build",
        "puppet_build_post",
        "puppet_connect_pre",
        "puppet_connect",
        "puppet_connect_post",
        "deform_build_pre",
        "deform_build",
        "deform_build_post",
        "deform_connect_pre",
        "deform_connect",
        "deform_connect_post",
        "finalize_pre",
        "finalize",
        "finalize_post",
    ];

    pub const FIRST: BuildStep = BuildStep::SkeletonBuildPre;
    pub const LAST: BuildStep = BuildStep::FinalizePost;

    /// Position in the canonical sequence.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    /// Compose a step from its main step and sub-step.
    pub fn new(main: MainStep, sub: SubStep) -> Self {
        let sub_offset = match sub {
            SubStep::Pre => 0,
            SubStep::Main => 1,
            SubStep::Post => 2,
        };
        Self::ALL[main as usize * 3 + sub_offset]
    }

    /// Resolve a terminal step from a main step name and a sub-step name.
    ///
    /// An empty sub-step names the bare main step: `("puppet_build", "")` is
    /// `puppet_build`, `("finalize", "post")` is `finalize_post`.
    pub fn from_parts(main: &str, sub: &str) -> RigResult<Self> {
        if sub.is_empty() {
            main.parse()
        } else {
            format!("{main}_{sub}").parse()
        }
    }

    pub fn main_step(self) -> MainStep {
        MainStep::ALL[self.index() / 3]
    }

    pub fn sub_step(self) -> SubStep {
        match self.index() % 3 {
            0 => SubStep::Pre,
            1 => SubStep::Main,
            _ => SubStep::Post,
        }
    }

    pub fn phase(self) -> Phase {
        self.main_step().phase()
    }

    /// The step after this one, or `None` for the last step.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Compare against a step name, failing on unknown names.
    pub fn compare_name(self, other: &str) -> RigResult<Ordering> {
        let other: BuildStep = other.parse()?;
        Ok(self.cmp(&other))
    }
}

impl FromStr for BuildStep {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|name| *name == s)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| errors::invalid_build_step(s, Self::NAMES))
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq<str> for BuildStep {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl PartialEq<&str> for BuildStep {
    fn eq(&self, other: &&str) -> bool {
        self.name() == *other
    }
}

impl PartialOrd<&str> for BuildStep {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        other.parse::<BuildStep>().ok().map(|other| self.cmp(&other))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
