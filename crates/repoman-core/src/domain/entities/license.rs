//! License templates and generated license text.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Fixed file name license text is persisted under.
pub const LICENSE_FILE_NAME: &str = "LICENSE";

/// One license type as held by the template store.
///
/// `body` contains `{year}` / `{name}` placeholders resolved by
/// [`crate::domain::placeholder::substitute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseTemplate {
    pub id: String,
    pub display_name: String,
    pub body: String,
    pub requires_name: bool,
}

impl LicenseTemplate {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            body: body.into(),
            requires_name: true,
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn requires_name(mut self, requires: bool) -> Self {
        self.requires_name = requires;
        self
    }
}

/// License text after substitution, and where it ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLicense {
    license_id: String,
    text: String,
    path: Option<PathBuf>,
}

impl GeneratedLicense {
    pub fn new(license_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            text: text.into(),
            path: None,
        }
    }

    pub fn license_id(&self) -> &str {
        &self.license_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the text was written to; `None` until persisted.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn written_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}
