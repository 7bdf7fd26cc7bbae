//! Anchor groups modules and the asset root build their nodes under.

use rig_diagnostic::RigResult;
use rig_ir::{ModuleIdentity, NodeId};
use rig_scene::{attr_names, AttrValue, Scene};

/// Groups a module creates under its parent's modules group.
///
/// ```text
/// <key>_module_GRP
/// ├── <key>_inHooks_GRP
/// ├── <key>_static_GRP      (does not inherit transforms)
/// ├── <key>_modules_GRP     (child modules go here)
/// └── <key>_guides_GRP      (optional)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModuleGroups {
    pub grp: NodeId,
    pub in_hooks: NodeId,
    pub static_grp: NodeId,
    pub modules: NodeId,
    pub guides: Option<NodeId>,
}

impl ModuleGroups {
    pub fn create(
        scene: &mut dyn Scene,
        identity: &ModuleIdentity,
        parent: Option<NodeId>,
    ) -> RigResult<Self> {
        let grp = scene.create_group(&identity.mk("module_GRP"), parent)?;
        let in_hooks = scene.create_group(&identity.mk("inHooks_GRP"), Some(grp))?;
        let static_grp = scene.create_group(&identity.mk("static_GRP"), Some(grp))?;
        scene.set_attr(static_grp, attr_names::INHERITS_TRANSFORM, AttrValue::Bool(false))?;
        let modules = scene.create_group(&identity.mk("modules_GRP"), Some(grp))?;
        Ok(ModuleGroups {
            grp,
            in_hooks,
            static_grp,
            modules,
            guides: None,
        })
    }
}

/// Top-level groups of the rigged asset.
///
/// ```text
/// <asset_name>
/// ├── MODULES_GRP
/// ├── GEO_GRP    (locked, reference display)
/// └── SKEL_GRP   (locked, reference display)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AssetGroups {
    pub root: NodeId,
    pub modules: NodeId,
    pub geo: NodeId,
    pub skel: NodeId,
}

impl AssetGroups {
    pub const ASSET_NAME_TAG: &'static str = "asset_name";

    pub fn create(scene: &mut dyn Scene, asset_name: &str) -> RigResult<Self> {
        let root = scene.create_group(asset_name, None)?;
        scene.set_attr(
            root,
            Self::ASSET_NAME_TAG,
            AttrValue::Text(asset_name.to_string()),
        )?;
        let modules = scene.create_group("MODULES_GRP", Some(root))?;
        let geo = scene.create_group("GEO_GRP", Some(root))?;
        let skel = scene.create_group("SKEL_GRP", Some(root))?;

        for grp in [geo, skel] {
            scene.set_attr(grp, attr_names::LOCKED, AttrValue::Bool(true))?;
            scene.set_attr(grp, attr_names::OVERRIDE_ENABLED, AttrValue::Bool(true))?;
            scene.set_attr(
                grp,
                attr_names::OVERRIDE_DISPLAY_TYPE,
                AttrValue::Int(attr_names::DISPLAY_REFERENCE),
            )?;
        }
        Ok(AssetGroups {
            root,
            modules,
            geo,
            skel,
        })
    }
}
