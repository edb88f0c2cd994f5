//! Integration tests for repoman-core.
//!
//! Drives the public API with recording fakes in place of git and the disk.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use repoman_core::domain::LicenseTemplate;
use repoman_core::prelude::*;

#[derive(Clone, Default)]
struct RecordingRunner {
    calls: Arc<Mutex<Vec<ToolInvocation>>>,
    responses: Arc<Mutex<HashMap<String, OperationResult>>>,
}

impl RecordingRunner {
    fn respond(&self, subcommand: &str, result: OperationResult) {
        self.responses
            .lock()
            .unwrap()
            .insert(subcommand.to_string(), result);
    }

    fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &ToolInvocation) -> io::Result<OperationResult> {
        self.calls.lock().unwrap().push(invocation.clone());
        let key = invocation.args().first().cloned().unwrap_or_default();
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| OperationResult::ok("")))
    }
}

#[derive(Clone, Default)]
struct FakeDisk {
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl FakeDisk {
    fn read(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl Filesystem for FakeDisk {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path) || self.files.lock().unwrap().contains_key(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

struct OneLicense;

impl LicenseStore for OneLicense {
    fn ids(&self) -> Vec<String> {
        vec!["MIT".into()]
    }

    fn get(&self, id: &str) -> Option<LicenseTemplate> {
        (id == "MIT").then(|| LicenseTemplate::new("MIT", "Copyright (c) {year} {name}\n"))
    }

    fn list(&self) -> Vec<LicenseTemplate> {
        self.get("MIT").into_iter().collect()
    }
}

struct Year(i32);

impl Clock for Year {
    fn current_year(&self) -> i32 {
        self.0
    }
}

fn manager(root: &str, runner: &RecordingRunner, disk: &FakeDisk) -> RepoManager {
    let handle = RepositoryHandle::new(root);
    let repository =
        RepositoryService::new(handle.clone(), Box::new(runner.clone()), Box::new(disk.clone()))
            .unwrap();
    let licenses = LicenseService::new(
        handle,
        Box::new(OneLicense),
        Box::new(disk.clone()),
        Box::new(Year(2024)),
    );
    RepoManager::new(repository, licenses)
}

#[test]
fn create_repository_then_license() {
    let runner = RecordingRunner::default();
    let disk = FakeDisk::default();
    let manager = manager("/work/demo", &runner, &disk);

    manager.create_repository().unwrap();
    // the fake runner does not create the marker; do it the way git would
    disk.create_dir_all(Path::new("/work/demo/.git")).unwrap();

    let license = manager
        .generate_and_add_license("MIT", Some("Jane Doe"))
        .unwrap();

    assert_eq!(license.path(), Some(Path::new("/work/demo/LICENSE")));
    assert_eq!(
        disk.read(Path::new("/work/demo/LICENSE")).as_deref(),
        Some("Copyright (c) 2024 Jane Doe\n")
    );

    let subcommands: Vec<String> = runner
        .calls()
        .iter()
        .map(|c| c.args().join(" "))
        .collect();
    assert_eq!(subcommands, ["--version", "init", "add LICENSE"]);

    let calls = runner.calls();
    assert_eq!(calls[0].cwd(), None);
    assert!(
        calls[1..]
            .iter()
            .all(|c| c.cwd() == Some(Path::new("/work/demo")))
    );
}

#[test]
fn second_init_reports_already_exists() {
    let runner = RecordingRunner::default();
    let disk = FakeDisk::default();
    let manager = manager("/work/demo", &runner, &disk);

    disk.create_dir_all(Path::new("/work/demo/.git")).unwrap();

    let err = manager.create_repository().unwrap_err();
    assert_eq!(
        err,
        RepoError::AlreadyExists {
            path: PathBuf::from("/work/demo")
        }
    );
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[test]
fn branch_listing_puts_current_first() {
    let runner = RecordingRunner::default();
    runner.respond("branch", OperationResult::ok("  develop\n* feature\n  main\n"));
    let disk = FakeDisk::default();
    let manager = manager("/work/demo", &runner, &disk);

    let branches = manager.repository().list_branches().unwrap();
    assert_eq!(branches.names(), ["feature", "develop", "main"]);
    assert_eq!(branches.current(), Some("feature"));
}

#[test]
fn failed_push_carries_stderr() {
    let runner = RecordingRunner::default();
    runner.respond(
        "push",
        OperationResult::new("", "fatal: 'upstream' does not appear to be a git repository", Some(128)),
    );
    let disk = FakeDisk::default();
    let manager = manager("/work/demo", &runner, &disk);

    match manager.repository().push(Some("upstream"), None).unwrap_err() {
        RepoError::OperationFailed {
            command,
            stderr,
            exit_code,
        } => {
            assert_eq!(command, "push -u upstream main");
            assert!(stderr.contains("does not appear"));
            assert_eq!(exit_code, Some(128));
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}
