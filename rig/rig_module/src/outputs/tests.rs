use super::*;
use pretty_assertions::assert_eq;
use rig_diagnostic::{ErrorCategory, RigErrorKind};

fn node(raw: u32) -> NodeId {
    NodeId::new(raw)
}

fn key() -> ModuleKey {
    ModuleKey::from("C_A")
}

#[test]
fn overwrite_keeps_first_position() {
    let mut registry = OutputRegistry::new();
    registry.insert(OutputKind::Joint, "a", node(1));
    registry.insert(OutputKind::Joint, "b", node(2));
    registry.insert(OutputKind::Joint, "a", node(3));

    assert_eq!(registry.keys(OutputKind::Joint).collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(registry.get(OutputKind::Joint, "a"), Some(node(3)));
    assert_eq!(registry.len(OutputKind::Joint), 2);
}

#[test]
fn kinds_are_separate() {
    let mut registry = OutputRegistry::new();
    OutputData::new()
        .joints([node(1)])
        .controls([node(2)])
        .store_into(&mut registry);

    assert_eq!(registry.get(OutputKind::Joint, "0"), Some(node(1)));
    assert_eq!(registry.get(OutputKind::Control, "0"), Some(node(2)));
    assert_eq!(registry.get(OutputKind::Transform, "0"), None);
}

#[test]
fn negative_positions_count_back_over_numeric_keys() {
    let mut registry = OutputRegistry::new();
    OutputData::new()
        .joints_keyed([("top", node(9)), ("00", node(0)), ("01", node(1)), ("02", node(2))])
        .store_into(&mut registry);

    let resolve = |index: OutputIndex| registry.resolve(&key(), OutputKind::Joint, &index);
    assert_eq!(resolve(OutputIndex::from(-1)), Ok(node(2)));
    assert_eq!(resolve(OutputIndex::from(-3)), Ok(node(0)));
    assert_eq!(resolve(OutputIndex::from("top")), Ok(node(9)));
    assert!(resolve(OutputIndex::from(-4)).is_err());
}

#[test]
fn positional_outputs_resolve_by_position() {
    let mut registry = OutputRegistry::new();
    OutputData::new()
        .joints([node(10), node(11)])
        .store_into(&mut registry);

    let resolve =
        |index: i64| registry.resolve(&key(), OutputKind::Joint, &OutputIndex::from(index));
    assert_eq!(resolve(1), Ok(node(11)));
    assert_eq!(resolve(-2), Ok(node(10)));
}

#[test]
fn missing_output_lists_available_keys() {
    let mut registry = OutputRegistry::new();
    OutputData::new()
        .joints_keyed([("00", node(0)), ("01", node(1))])
        .store_into(&mut registry);

    let err = registry
        .resolve(&key(), OutputKind::Joint, &OutputIndex::from("02"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert_eq!(
        err.kind,
        RigErrorKind::MissingOutput {
            module_key: "C_A".to_string(),
            suffix: "Jnt",
            index: "02".to_string(),
            available: vec!["00".to_string(), "01".to_string()],
        }
    );
}

#[test]
fn empty_registry_reports_no_outputs() {
    let registry = OutputRegistry::new();
    assert!(registry.is_empty());
    let err = registry
        .resolve(&key(), OutputKind::Control, &OutputIndex::from(-1))
        .unwrap_err();
    assert!(matches!(
        err.kind,
        RigErrorKind::MissingOutput { ref available, .. } if available.is_empty()
    ));
}
