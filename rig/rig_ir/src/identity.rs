//! Module identity: side, name and the derived unique key.

use std::borrow::Borrow;
use std::fmt;

use crate::Side;

/// Unique key of a module in a rig graph: `"{side}_{module_name}"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(String);

impl ModuleKey {
    pub fn new(key: impl Into<String>) -> Self {
        ModuleKey(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModuleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleKey {
    fn from(key: &str) -> Self {
        ModuleKey(key.to_string())
    }
}

impl From<String> for ModuleKey {
    fn from(key: String) -> Self {
        ModuleKey(key)
    }
}

/// Who a module is. Construction never touches the scene.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleIdentity {
    side: Side,
    module_name: String,
    key: ModuleKey,
}

impl ModuleIdentity {
    pub fn new(side: Side, module_name: impl Into<String>) -> Self {
        let module_name = module_name.into();
        let key = ModuleKey(format!("{side}_{module_name}"));
        ModuleIdentity {
            side,
            module_name,
            key,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    #[inline]
    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// Prefix `name` with the module key: `mk("00_JNT")` on `C_spine` is
    /// `C_spine_00_JNT`.
    pub fn mk(&self, name: &str) -> String {
        format!("{}_{name}", self.key)
    }
}

/// Index of a module in its graph's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ModuleId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
