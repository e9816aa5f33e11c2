//! Behavioural tests for the session protocol.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Map, Value};

use crate::dispatch::FileRecord;

use super::support::ProtocolWorld;

type StepResult = Result<(), String>;

#[fixture]
fn world() -> RefCell<ProtocolWorld> {
    RefCell::new(ProtocolWorld::new())
}

#[given("a project containing {file}")]
fn given_project_file(world: &RefCell<ProtocolWorld>, file: String) {
    world.borrow().add_source(&file);
}

#[when("the client sends {command} with {input}")]
fn when_client_sends(world: &RefCell<ProtocolWorld>, command: String, input: String) -> StepResult {
    let parsed: Map<String, Value> =
        serde_json::from_str(&input).map_err(|error| format!("bad step input {input}: {error}"))?;
    world.borrow_mut().send(&command, parsed);
    Ok(())
}

#[when("the client binds the project directory")]
fn when_client_binds_project(world: &RefCell<ProtocolWorld>) {
    let project = world.borrow().project().to_path_buf();
    world.borrow_mut().bind_directory(&project);
}

#[when("the client binds a directory that does not exist")]
fn when_client_binds_missing(world: &RefCell<ProtocolWorld>) {
    let missing = world.borrow().project().join("no-such-dir");
    world.borrow_mut().bind_directory(&missing);
}

#[then("the reply is OK")]
fn then_reply_ok(world: &RefCell<ProtocolWorld>) {
    let world = world.borrow();
    assert!(world.reply().is_ok(), "expected OK, got {:?}", world.reply());
}

#[then("the reply is an error mentioning {message}")]
fn then_reply_error(world: &RefCell<ProtocolWorld>, message: String) {
    let world = world.borrow();
    let reply = world.reply();
    assert!(!reply.is_ok(), "expected an error, got {reply:?}");
    let actual = reply.message.as_deref().unwrap_or_default();
    assert!(
        actual.contains(&message),
        "expected message containing {message:?}, got {actual:?}"
    );
}

#[then("the session stage is {stage}")]
fn then_session_stage(world: &RefCell<ProtocolWorld>, stage: u8) {
    assert_eq!(world.borrow().state().stage().number(), stage);
}

#[then("the session state is unchanged")]
fn then_state_unchanged(world: &RefCell<ProtocolWorld>) {
    let world = world.borrow();
    assert_eq!(world.state(), world.state_before());
}

#[then("the reply lists the {name} transformation")]
fn then_reply_lists(world: &RefCell<ProtocolWorld>, name: String) {
    let world = world.borrow();
    let listed = world
        .reply()
        .transformations
        .as_ref()
        .is_some_and(|items| items.iter().any(|item| item.short_name == name));
    assert!(listed, "{name} missing from {:?}", world.reply());
}

#[then("the reply reports {patch} for {file}")]
fn then_reply_reports_patch(world: &RefCell<ProtocolWorld>, patch: String, file: String) {
    let world = world.borrow();
    let expected = FileRecord::Patch {
        filename: file,
        patch_file: patch,
    };
    assert_eq!(world.reply().files.as_deref(), Some([expected].as_slice()));
}

#[then("the project contains {file}")]
fn then_project_contains(world: &RefCell<ProtocolWorld>, file: String) {
    assert!(world.borrow().project().join(&file).is_file(), "{file} not written");
}

#[then("the reply has no fsChanges")]
fn then_no_fs_changes(world: &RefCell<ProtocolWorld>) {
    let world = world.borrow();
    let value = serde_json::to_value(world.reply()).expect("serialise reply");
    assert!(value.get("fsChanges").is_none());
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "Renaming through a patch file"
)]
fn renaming_through_patch_file(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "A negative limit is rejected"
)]
fn negative_limit_rejected(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "A missing directory is rejected"
)]
fn missing_directory_rejected(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "Web mode is not supported"
)]
fn web_mode_unsupported(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "Commands before open are rejected"
)]
fn commands_before_open_rejected(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "Unknown commands are rejected"
)]
fn unknown_commands_rejected(world: RefCell<ProtocolWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/session_protocol.feature",
    name = "Open accepts any version"
)]
fn open_accepts_any_version(world: RefCell<ProtocolWorld>) {
    drop(world);
}
