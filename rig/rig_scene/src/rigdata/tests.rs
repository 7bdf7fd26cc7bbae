use super::*;
use crate::MemoryScene;
use pretty_assertions::assert_eq;
use rig_diagnostic::ErrorCategory;

fn guide_scene() -> (MemoryScene, Vec<NodeId>) {
    let mut scene = MemoryScene::new();
    let nodes = [("C_spine_00_GDE", 0.0), ("C_spine_01_GDE", 10.0)]
        .into_iter()
        .map(|(name, ty)| {
            let node = scene
                .create_group(name, None)
                .unwrap_or_else(|e| panic!("create failed: {e}"));
            scene
                .set_attr(node, "ty", AttrValue::Float(ty))
                .unwrap_or_else(|e| panic!("set_attr failed: {e}"));
            node
        })
        .collect::<Vec<_>>();
    (scene, nodes)
}

fn key() -> ModuleKey {
    ModuleKey::from("C_spine")
}

#[test]
fn memory_store_reapplies_latest_version() {
    let (mut scene, nodes) = guide_scene();
    let mut store = MemoryRigData::new();

    let first = store
        .publish(&key(), PublishCategory::Guides, &nodes, &scene)
        .unwrap_or_else(|e| panic!("publish failed: {e}"));
    assert_eq!(first.map(|artifact| artifact.version), Some(1));

    scene
        .set_attr(nodes[1], "ty", AttrValue::Float(42.0))
        .unwrap_or_else(|e| panic!("set_attr failed: {e}"));
    store
        .publish(&key(), PublishCategory::Guides, &nodes, &scene)
        .unwrap_or_else(|e| panic!("publish failed: {e}"));
    assert_eq!(store.version_count(&key(), PublishCategory::Guides), 2);

    // Rebuild from scratch, then load.
    scene.clear();
    let rebuilt = scene
        .create_group("C_spine_01_GDE", None)
        .unwrap_or_else(|e| panic!("create failed: {e}"));
    let loaded = store
        .load(&key(), PublishCategory::Guides, &mut scene)
        .unwrap_or_else(|e| panic!("load failed: {e}"));

    assert!(loaded);
    assert_eq!(scene.attr(rebuilt, "ty"), Some(&AttrValue::Float(42.0)));
}

#[test]
fn empty_publish_is_a_no_op() {
    let (scene, _) = guide_scene();
    let mut store = MemoryRigData::new();
    let artifact = store
        .publish(&key(), PublishCategory::Ctls, &[], &scene)
        .unwrap_or_else(|e| panic!("publish failed: {e}"));
    assert_eq!(artifact, None);
    assert_eq!(store.version_count(&key(), PublishCategory::Ctls), 0);
}

#[test]
fn load_without_data_reports_nothing_loaded() {
    let mut scene = MemoryScene::new();
    let mut store = MemoryRigData::new();
    let loaded = store
        .load(&key(), PublishCategory::Rigsets, &mut scene)
        .unwrap_or_else(|e| panic!("load failed: {e}"));
    assert!(!loaded);
}

#[test]
fn publishing_a_deleted_node_fails() {
    let (mut scene, nodes) = guide_scene();
    scene
        .delete(nodes[0])
        .unwrap_or_else(|e| panic!("delete failed: {e}"));
    let mut store = MemoryRigData::new();
    let err = store
        .publish(&key(), PublishCategory::Guides, &nodes, &scene)
        .err()
        .unwrap_or_else(|| panic!("expected publish to fail"));
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[test]
fn versioned_store_writes_numbered_directories() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
    let (scene, nodes) = guide_scene();
    let mut store = VersionedRigData::new(dir.path());

    for expected in 1..=2 {
        let artifact = store
            .publish(&key(), PublishCategory::Guides, &nodes, &scene)
            .unwrap_or_else(|e| panic!("publish failed: {e}"))
            .unwrap_or_else(|| panic!("expected an artifact"));
        assert_eq!(artifact.version, expected);
    }

    let expected_path = dir
        .path()
        .join("C_spine")
        .join("guides_v002")
        .join("C_spine_guides.bin");
    assert!(expected_path.is_file());
    assert_eq!(
        store
            .latest_version(&key(), PublishCategory::Guides)
            .unwrap_or_else(|e| panic!("scan failed: {e}")),
        Some(2)
    );
    assert_eq!(
        store
            .latest_version(&key(), PublishCategory::Ctls)
            .unwrap_or_else(|e| panic!("scan failed: {e}")),
        None
    );
}

#[test]
fn versioned_store_skips_missing_nodes_on_load() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
    let (scene, nodes) = guide_scene();
    let mut store = VersionedRigData::new(dir.path());
    store
        .publish(&key(), PublishCategory::Guides, &nodes, &scene)
        .unwrap_or_else(|e| panic!("publish failed: {e}"));

    let mut fresh = MemoryScene::new();
    let kept = fresh
        .create_group("C_spine_00_GDE", None)
        .unwrap_or_else(|e| panic!("create failed: {e}"));
    let loaded = store
        .load(&key(), PublishCategory::Guides, &mut fresh)
        .unwrap_or_else(|e| panic!("load failed: {e}"));

    assert!(loaded);
    assert_eq!(fresh.attr(kept, "ty"), Some(&AttrValue::Float(0.0)));
    assert_eq!(fresh.len(), 1);
}

#[test]
fn corrupt_file_is_a_value_error() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
    let mut store = VersionedRigData::new(dir.path());
    let path = store.version_path(&key(), PublishCategory::Ctls, 1);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir failed: {e}"));
    }
    std::fs::write(&path, b"\xff").unwrap_or_else(|e| panic!("write failed: {e}"));

    let mut scene = MemoryScene::new();
    let err = store
        .load(&key(), PublishCategory::Ctls, &mut scene)
        .err()
        .unwrap_or_else(|| panic!("expected load to fail"));
    assert_eq!(err.category(), ErrorCategory::Value);
}

#[test]
fn exhausted_version_numbers_fail_to_publish() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
    let mut store = VersionedRigData::new(dir.path());
    let last = store.version_path(&key(), PublishCategory::Guides, u32::MAX);
    if let Some(parent) = last.parent() {
        std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir failed: {e}"));
    }
    assert_eq!(
        store.latest_version(&key(), PublishCategory::Guides),
        Ok(Some(u32::MAX))
    );

    let (scene, nodes) = guide_scene();
    let err = store
        .publish(&key(), PublishCategory::Guides, &nodes, &scene)
        .err()
        .unwrap_or_else(|| panic!("expected publish to fail"));
    assert_eq!(err.category(), ErrorCategory::Value);
    assert!(err.to_string().contains("no version number left after v4294967295"));
}
