use std::rc::Rc;

use super::*;
use crate::test_helpers::{entries, log, Log, Stepped};
use pretty_assertions::assert_eq;
use rig_diagnostic::{ErrorCategory, ErrorCode};
use rig_scene::{MemoryRigData, MemoryScene};

fn session(log: &Log) -> BuildSession<MemoryScene, MemoryRigData> {
    let mut scripts = ScriptRegistry::new();
    let shared = Rc::clone(log);
    scripts.register("hero_build", move || Stepped::new(&shared));
    let shared = Rc::clone(log);
    scripts.register("broken_build", move || {
        Stepped::new(&shared).failing_at(BuildStep::DeformBuild)
    });
    BuildSession::new(
        BuildConfig::new("hero"),
        scripts,
        MemoryScene::new(),
        MemoryRigData::new(),
    )
}

fn request(stop_after: BuildStep) -> BuildRequest {
    BuildRequest::new("hero_build").stop_after(stop_after)
}

fn current_step(session: &BuildSession<MemoryScene, MemoryRigData>) -> Option<BuildStep> {
    session.rig().and_then(RigBuild::current_step)
}

#[test]
fn first_build_starts_fresh() {
    let log = log();
    let mut session = session(&log);
    assert_eq!(
        session.resume_blocker(BuildStep::LAST),
        Some(ResumeBlocker::NoExistingBuild)
    );

    session.build_rig(&request(BuildStep::SkeletonBuild)).unwrap();

    assert_eq!(entries(&log), vec!["skeleton_build_pre", "skeleton_build"]);
    assert_eq!(current_step(&session), Some(BuildStep::SkeletonBuild));
}

#[test]
fn continues_a_completed_build() {
    let log = log();
    let mut session = session(&log);
    session.build_rig(&request(BuildStep::PuppetBuild)).unwrap();
    log.borrow_mut().clear();

    assert_eq!(session.resume_blocker(BuildStep::FinalizePost), None);
    session.build_rig(&BuildRequest::default().stop_after(BuildStep::FinalizePost)).unwrap();

    let steps = entries(&log);
    assert_eq!(steps.first().map(String::as_str), Some("puppet_build_post"));
    assert_eq!(steps.len(), 13);
}

#[test]
fn rebuilds_when_the_end_step_already_ran() {
    let log = log();
    let mut session = session(&log);
    session.build_rig(&request(BuildStep::Finalize)).unwrap();
    log.borrow_mut().clear();

    assert_eq!(
        session.resume_blocker(BuildStep::PuppetBuild),
        Some(ResumeBlocker::AlreadyExecuted)
    );
    assert_eq!(
        session.resume_blocker(BuildStep::Finalize),
        Some(ResumeBlocker::AlreadyExecuted)
    );
    session.build_rig(&request(BuildStep::PuppetBuild)).unwrap();

    assert_eq!(entries(&log), BuildStep::NAMES[..8].to_vec());
    assert_eq!(current_step(&session), Some(BuildStep::PuppetBuild));
}

#[test]
fn force_rebuild_ignores_a_resumable_build() {
    let log = log();
    let mut session = session(&log);
    session.build_rig(&request(BuildStep::PuppetBuild)).unwrap();
    log.borrow_mut().clear();

    session
        .build_rig(&request(BuildStep::PuppetConnect).force_rebuild(true))
        .unwrap();

    assert_eq!(entries(&log), BuildStep::NAMES[..11].to_vec());
}

#[test]
fn prepared_build_was_never_started() {
    let log = log();
    let mut session = session(&log);
    let rig = session.prepare("hero_build").unwrap();
    assert_eq!(rig.current_step(), None);

    assert_eq!(
        session.resume_blocker(BuildStep::LAST),
        Some(ResumeBlocker::NeverStarted)
    );
    session.build_rig(&request(BuildStep::LAST)).unwrap();
    assert_eq!(entries(&log).len(), BuildStep::COUNT);
}

#[test]
fn failed_build_is_held_but_not_resumed() {
    let log = log();
    let mut session = session(&log);

    let err = session
        .build_rig(&BuildRequest::new("broken_build"))
        .err()
        .unwrap();

    assert_eq!(err.code(), ErrorCode::R2006);
    assert_eq!(current_step(&session), Some(BuildStep::DeformBuild));
    assert_eq!(
        session.resume_blocker(BuildStep::LAST),
        Some(ResumeBlocker::LastStepIncomplete)
    );
}

#[test]
fn missing_asset_root_blocks_resume() {
    let log = log();
    let mut session = session(&log);
    session.build_rig(&request(BuildStep::PuppetBuild)).unwrap();

    session.scene_mut().clear();
    assert_eq!(
        session.resume_blocker(BuildStep::LAST),
        Some(ResumeBlocker::AssetRootMissing)
    );

    session.build_rig(&request(BuildStep::LAST)).unwrap();
    assert!(session.scene().find("hero").is_some());
    assert_eq!(session.resume_blocker(BuildStep::LAST), Some(ResumeBlocker::AlreadyExecuted));
}

#[test]
fn unknown_script_keeps_the_held_build() {
    let log = log();
    let mut session = session(&log);
    session.build_rig(&request(BuildStep::PuppetBuild)).unwrap();

    let err = session
        .build_rig(&BuildRequest::new("villain_build").force_rebuild(true))
        .err()
        .unwrap();

    assert_eq!(err.category(), ErrorCategory::NotFound);
    assert_eq!(current_step(&session), Some(BuildStep::PuppetBuild));
    assert_eq!(session.resume_blocker(BuildStep::LAST), None);
}

#[test]
fn scripts_registered_later_are_buildable() {
    let log = log();
    let mut session = session(&log);
    let err = session.build_rig(&BuildRequest::new("late_build")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NotFound);

    let shared = Rc::clone(&log);
    session
        .scripts_mut()
        .register("late_build", move || Stepped::new(&shared));
    session
        .build_rig(&BuildRequest::new("late_build").stop_after(BuildStep::SkeletonBuildPre))
        .unwrap();

    assert_eq!(entries(&log), vec!["skeleton_build_pre"]);
}

#[test]
fn publishing_without_a_build_is_empty() {
    let log = log();
    let mut session = session(&log);
    let artifacts = session.publish_rigdata(PublishCategory::Guides).unwrap();
    assert!(artifacts.is_empty());
    assert_eq!(session.rigdata().version_count(&"C_base".into(), PublishCategory::Guides), 0);
}

#[test]
fn request_builders() {
    let request = BuildRequest::default();
    assert_eq!(request.script, "rig_build");
    assert_eq!(request.stop_after, BuildStep::FinalizePost);
    assert!(!request.force_rebuild);

    let named = BuildRequest::new("hero_build").stop_after_named("puppet_build", "");
    assert_eq!(named.map(|request| request.stop_after), Ok(BuildStep::PuppetBuild));
    assert!(BuildRequest::new("hero_build")
        .stop_after_named("finalize", "mid")
        .is_err());
    assert_eq!(
        ResumeBlocker::LastStepIncomplete.to_string(),
        "last rig step was not completed"
    );
}
