//! Build configuration.

use std::path::{Path, PathBuf};

use rig_diagnostic::{errors, RigResult};
use rig_scene::VersionedRigData;

/// Which asset is being rigged and where its rig data lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
    asset_name: String,
    rigdata_path: Option<PathBuf>,
}

impl BuildConfig {
    /// Environment variable naming the asset. Required by [`BuildConfig::from_env`].
    pub const ASSET_NAME_VAR: &'static str = "RIG_ASSET_NAME";
    /// Environment variable pointing at the rig-data directory.
    pub const RIGDATA_PATH_VAR: &'static str = "RIG_RIGDATA_PATH";

    pub fn new(asset_name: impl Into<String>) -> Self {
        BuildConfig {
            asset_name: asset_name.into(),
            rigdata_path: None,
        }
    }

    #[must_use]
    pub fn with_rigdata_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rigdata_path = Some(path.into());
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> RigResult<Self> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Read the configuration through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RigResult<Self> {
        let read = |variable: &str| lookup(variable).filter(|value| !value.trim().is_empty());

        let asset_name = read(Self::ASSET_NAME_VAR).ok_or_else(|| {
            errors::environment_not_set(
                Self::ASSET_NAME_VAR,
                "a single asset must be set before building a rig",
            )
        })?;
        let mut config = BuildConfig::new(asset_name);
        if let Some(path) = read(Self::RIGDATA_PATH_VAR) {
            config.rigdata_path = Some(PathBuf::from(path));
        }
        Ok(config)
    }

    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    pub fn rigdata_path(&self) -> Option<&Path> {
        self.rigdata_path.as_deref()
    }

    /// On-disk rig-data store for the configured path.
    pub fn rigdata_store(&self) -> RigResult<VersionedRigData> {
        self.rigdata_path().map(VersionedRigData::new).ok_or_else(|| {
            errors::environment_not_set(
                Self::RIGDATA_PATH_VAR,
                "no rig-data directory configured",
            )
        })
    }
}
