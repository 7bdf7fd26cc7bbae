use super::*;
use crate::test_helpers::Bare;
use pretty_assertions::assert_eq;
use rig_diagnostic::{ErrorCategory, ErrorCode};

#[test]
fn instantiates_registered_scripts() {
    let mut registry = ScriptRegistry::new();
    registry.register("prop", || Bare::new(&["base"]));

    assert!(registry.contains("prop"));
    assert!(registry.instantiate("prop").is_ok());
}

#[test]
fn unknown_name_is_not_found() {
    let registry = ScriptRegistry::new();
    let err = registry.instantiate("hero_build").err().unwrap();
    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert_eq!(err.code(), ErrorCode::R2005);
}

#[test]
fn export_must_be_a_build_script() {
    let mut registry = ScriptRegistry::new();
    registry.register_export("settings", || Box::new(42_u32));
    registry.register_export("boxed", || {
        let script: Box<dyn BuildScript> = Box::new(Bare::new(&[]));
        Box::new(script)
    });

    let err = registry.instantiate("settings").err().unwrap();
    assert_eq!(err.category(), ErrorCategory::Value);
    assert_eq!(err.to_string(), "error[R4001]: `settings` is not a build script");
    assert!(registry.instantiate("boxed").is_ok());
    assert_eq!(registry.names(), vec!["boxed", "settings"]);
}
