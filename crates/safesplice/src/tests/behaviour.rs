//! Behavioural tests for line-range editing.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use crate::validation::test_doubles::{ConfigurableValidator, SabotagingValidator};
use crate::{
    EditError, EditRequest, EditResult, EditorConfig, SafeFileEditor,
    SyntaxValidator, Validator,
};

/// State shared across steps.
struct EditWorld {
    temp_dir: TempDir,
    config: EditorConfig,
    validator: Box<dyn Validator>,
    outcome: Option<Result<EditResult, EditError>>,
}

impl EditWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            config: EditorConfig::new(),
            validator: Box::new(ConfigurableValidator::passing()),
            outcome: None,
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn backup_path(&self, name: &str) -> PathBuf {
        self.config.backup_location().backup_path(&self.path(name))
    }

    fn outcome(&self) -> &Result<EditResult, EditError> {
        self.outcome.as_ref().expect("an edit should have run")
    }
}

#[fixture]
fn world() -> RefCell<EditWorld> {
    RefCell::new(EditWorld::new())
}

/// Strips surrounding quotes and expands `\n` and `\r` escapes.
fn literal(raw: &str) -> String {
    raw.trim_matches('"').replace("\\r", "\r").replace("\\n", "\n")
}

// ---- Given steps ----

#[given("a file {name} containing {content}")]
fn given_file(world: &RefCell<EditWorld>, name: String, content: String) {
    let path = world.borrow().path(&literal(&name));
    fs::write(path, literal(&content)).expect("write file");
}

#[given("a validator that accepts everything")]
fn given_accepting_validator(world: &RefCell<EditWorld>) {
    world.borrow_mut().validator = Box::new(ConfigurableValidator::passing());
}

#[given("the syntax validator")]
fn given_syntax_validator(world: &RefCell<EditWorld>) {
    world.borrow_mut().validator = Box::new(SyntaxValidator::new());
}

#[given("a validator that deletes the backup of {name} and rejects")]
fn given_sabotaging_validator(world: &RefCell<EditWorld>, name: String) {
    let backup = world.borrow().backup_path(&literal(&name));
    world.borrow_mut().validator = Box::new(SabotagingValidator::deleting(backup));
}

#[given("backups are not retained")]
fn given_backups_not_retained(world: &RefCell<EditWorld>) {
    let mut state = world.borrow_mut();
    state.config = EditorConfig::new()
        .with_backup_location(state.config.backup_location().clone())
        .with_retain_backup_on_success(false);
}

// ---- When steps ----

#[when("lines {start} to {end} of {name} are replaced with {text}")]
fn when_lines_replaced(
    world: &RefCell<EditWorld>,
    start: usize,
    end: usize,
    name: String,
    text: String,
) {
    let mut state = world.borrow_mut();
    let request = EditRequest::replace_lines(state.path(&literal(&name)), start, end, literal(&text));
    let editor = SafeFileEditor::new(state.config.clone());
    let outcome = editor.apply(&request, state.validator.as_ref());
    state.outcome = Some(outcome);
}

// ---- Then steps ----

#[then("the edit is applied")]
fn then_applied(world: &RefCell<EditWorld>) {
    let state = world.borrow();
    let outcome = state.outcome();
    assert!(
        outcome.as_ref().is_ok_and(EditResult::is_applied),
        "expected an applied edit, got {outcome:?}"
    );
}

#[then("the edit is rejected")]
fn then_rejected(world: &RefCell<EditWorld>) {
    let state = world.borrow();
    match state.outcome() {
        Ok(EditResult::Rejected { .. }) => {}
        other => panic!("expected a rejected edit, got {other:?}"),
    }
}

#[then("the edit fails with a range error")]
fn then_range_error(world: &RefCell<EditWorld>) {
    let state = world.borrow();
    match state.outcome() {
        Err(EditError::Range { .. }) => {}
        other => panic!("expected a range error, got {other:?}"),
    }
}

#[then("the edit fails fatally")]
fn then_fatal(world: &RefCell<EditWorld>) {
    let state = world.borrow();
    match state.outcome() {
        Err(error) if error.is_fatal() => {}
        other => panic!("expected a fatal error, got {other:?}"),
    }
}

#[then("the file {name} contains exactly {content}")]
fn then_file_contains(world: &RefCell<EditWorld>, name: String, content: String) {
    let path = world.borrow().path(&literal(&name));
    let actual = fs::read_to_string(&path).expect("read file");
    assert_eq!(actual, literal(&content), "unexpected content in {}", path.display());
}

#[then("the backup of {name} contains exactly {content}")]
fn then_backup_contains(world: &RefCell<EditWorld>, name: String, content: String) {
    let path = world.borrow().backup_path(&literal(&name));
    let actual = fs::read_to_string(&path).expect("read backup");
    assert_eq!(actual, literal(&content));
}

#[then("the file {name} has no backup")]
fn then_no_backup(world: &RefCell<EditWorld>, name: String) {
    let path = world.borrow().backup_path(&literal(&name));
    assert!(!path.exists(), "backup should not exist: {}", path.display());
}

#[scenario(path = "tests/features/safe_edit.feature")]
fn safe_edit(#[from(world)] _: RefCell<EditWorld>) {}
