//! Hooks: every way a module can name the node it attaches to.
//!
//! Hooks are parsed from their textual forms too, so guide files and build
//! scripts can carry them as plain strings:
//!
//! | text               | hook                                     |
//! |--------------------|------------------------------------------|
//! | `Jnt(C_spine, 0)`  | [`Hook::Pointer`] to joint 0 of `C_spine` |
//! | `[C_spine, -1]`    | [`Hook::Pair`] resolved by `C_spine`     |
//! | `C_spine_00_JNT`   | [`Hook::Node`] looked up by name         |

use std::fmt;
use std::str::FromStr;

use rig_diagnostic::{errors, RigError};

use crate::{ModuleId, ModuleKey, OutputIndex, OutputKind, OutputPointer};

/// The module half of a pair hook.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModuleRef {
    /// Look the module up by key at resolution time.
    Key(ModuleKey),
    /// A module already known by its arena handle.
    Id(ModuleId),
}

impl From<ModuleKey> for ModuleRef {
    fn from(key: ModuleKey) -> Self {
        ModuleRef::Key(key)
    }
}

impl From<&str> for ModuleRef {
    fn from(key: &str) -> Self {
        ModuleRef::Key(ModuleKey::from(key))
    }
}

impl From<ModuleId> for ModuleRef {
    fn from(id: ModuleId) -> Self {
        ModuleRef::Id(id)
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleRef::Key(key) => write!(f, "{key}"),
            ModuleRef::Id(id) => write!(f, "#{}", id.index()),
        }
    }
}

/// What a module attaches to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Output registered by another module.
    Pointer(OutputPointer),
    /// Ask a module's `out_hook` for the node at an index.
    Pair(ModuleRef, OutputIndex),
    /// An existing scene node, by name.
    Node(String),
}

impl Hook {
    pub fn pair(module: impl Into<ModuleRef>, index: impl Into<OutputIndex>) -> Self {
        Hook::Pair(module.into(), index.into())
    }

    pub fn node(name: impl Into<String>) -> Self {
        Hook::Node(name.into())
    }
}

impl From<OutputPointer> for Hook {
    fn from(pointer: OutputPointer) -> Self {
        Hook::Pointer(pointer)
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Pointer(pointer) => write!(f, "{pointer}"),
            Hook::Pair(module, index) => write!(f, "[{module}, {index}]"),
            Hook::Node(name) => f.write_str(name),
        }
    }
}

impl FromStr for Hook {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(errors::malformed_hook(s, "empty hook"));
        }

        if let Some(body) = text.strip_prefix('[') {
            let body = body
                .strip_suffix(']')
                .ok_or_else(|| errors::malformed_hook(s, "unclosed `[`"))?;
            let (module, index) = split_args(s, body)?;
            return Ok(Hook::Pair(ModuleRef::Key(module), index));
        }

        if let Some(open) = text.find('(') {
            let kind = OutputKind::from_suffix(&text[..open]).ok_or_else(|| {
                errors::malformed_hook(s, "expected one of `Jnt(..)`, `Ctl(..)`, `Trn(..)`")
            })?;
            let body = text[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| errors::malformed_hook(s, "unclosed `(`"))?;
            let (module, index) = split_args(s, body)?;
            return Ok(Hook::Pointer(OutputPointer::new(kind, module, index)));
        }

        if text.contains([']', ')', ',']) || text.chars().any(char::is_whitespace) {
            return Err(errors::malformed_hook(s, "not a node name"));
        }
        Ok(Hook::Node(text.to_string()))
    }
}

/// Split `module, index` into its two halves.
fn split_args(source: &str, body: &str) -> Result<(ModuleKey, OutputIndex), RigError> {
    let mut parts = body.split(',');
    let (Some(module), Some(index), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(errors::malformed_hook(source, "expected `module, index`"));
    };

    let module = unquote(module.trim());
    if module.is_empty() {
        return Err(errors::malformed_hook(source, "missing module key"));
    }
    let index = parse_index(index.trim())
        .ok_or_else(|| errors::malformed_hook(source, "missing output index"))?;
    Ok((ModuleKey::from(module), index))
}

/// Quoted text is always a name. Bare text is a position only when it is
/// the canonical spelling of an integer, so `00` stays the name `"00"`.
fn parse_index(text: &str) -> Option<OutputIndex> {
    if text.is_empty() {
        return None;
    }
    let unquoted = unquote(text);
    if unquoted.len() != text.len() {
        return Some(OutputIndex::Name(unquoted.to_string()));
    }
    match text.parse::<i64>() {
        Ok(position) if position.to_string() == text => Some(OutputIndex::Position(position)),
        _ => Some(OutputIndex::Name(text.to_string())),
    }
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
