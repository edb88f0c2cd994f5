//! License generation through the adapters, without git.

use std::fs;
use std::path::Path;

use repoman_adapters::{
    FixedClock, InMemoryLicenseStore, LicenseDefinitionLoader, MemoryFilesystem, builtin_licenses,
};
use repoman_core::prelude::*;
use tempfile::TempDir;

const ROOT: &str = "/work/demo";

fn service(store: InMemoryLicenseStore, fs: &MemoryFilesystem) -> LicenseService {
    LicenseService::new(
        RepositoryHandle::new(ROOT),
        Box::new(store),
        Box::new(fs.clone()),
        Box::new(FixedClock(2031)),
    )
}

#[test]
fn every_builtin_generates_and_persists() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new(ROOT)).unwrap();
    let svc = service(InMemoryLicenseStore::with_builtin().unwrap(), &fs);

    for id in builtin_licenses::IDS {
        let license = svc.generate(id, Some("Acme Corp")).unwrap();
        assert!(license.text().contains("2031"), "{id} lacks the year");
        assert!(license.text().contains("Acme Corp"), "{id} lacks the author");

        let path = svc.persist(license.text()).unwrap();
        assert_eq!(fs.read_file(&path).as_deref(), Some(license.text()));
    }
    assert_eq!(fs.list_files(), [Path::new("/work/demo/LICENSE")]);
}

#[test]
fn every_builtin_requires_an_author() {
    let fs = MemoryFilesystem::new();
    let svc = service(InMemoryLicenseStore::with_builtin().unwrap(), &fs);

    for id in builtin_licenses::IDS {
        for author in [Some(""), None] {
            assert_eq!(
                svc.generate(id, author).unwrap_err(),
                RepoError::MissingAuthor {
                    license: id.to_string()
                },
                "{id} accepted {author:?}"
            );
        }
    }
    assert!(fs.list_files().is_empty());
}

#[test]
fn read_only_root_is_write_failed() {
    let fs = MemoryFilesystem::new();
    fs.add_file("/work/demo/README.md", "# demo\n");
    fs.set_read_only(ROOT);
    let svc = service(InMemoryLicenseStore::with_builtin().unwrap(), &fs);

    let license = svc.generate("MIT", Some("Acme Corp")).unwrap();
    let err = svc.persist(license.text()).unwrap_err();

    assert!(matches!(err, RepoError::WriteFailed { .. }));
    assert_eq!(err.category(), ErrorCategory::Io);
    assert!(fs.read_file(Path::new("/work/demo/LICENSE")).is_none());
}

#[test]
fn definition_file_replaces_builtins() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("licenses.json");
    fs::write(
        &path,
        r#"{
            "Internal": { "name": "Internal Use", "text": "(c) {year} {name}. Internal use only.\n" },
            "Public": { "text": "Released {year}.{name}\n", "requires_name": false }
        }"#,
    )
    .unwrap();

    let fs = MemoryFilesystem::new();
    let svc = service(LicenseDefinitionLoader::new(&path).load_or_builtin().unwrap(), &fs);

    assert_eq!(svc.list_available(), ["Internal", "Public"]);
    assert_eq!(
        svc.generate("Internal", Some("Acme Corp")).unwrap().text(),
        "(c) 2031 Acme Corp. Internal use only.\n"
    );
    assert_eq!(
        svc.generate("Public", None).unwrap().text(),
        "Released 2031.\n"
    );
    assert!(matches!(
        svc.generate("MIT", Some("Acme Corp")).unwrap_err(),
        RepoError::UnknownLicense { .. }
    ));
}

#[test]
fn missing_definition_file_falls_back_to_builtins() {
    let dir = TempDir::new().unwrap();
    let loader = LicenseDefinitionLoader::new(dir.path().join("absent.json"));

    let svc = service(loader.load_or_builtin().unwrap(), &MemoryFilesystem::new());
    assert_eq!(svc.list_available(), builtin_licenses::IDS);
}
