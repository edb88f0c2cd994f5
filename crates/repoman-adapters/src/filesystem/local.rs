//! Local filesystem adapter using std::fs.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::trace;

use repoman_core::application::ports::Filesystem;

/// Production filesystem implementation using `std::fs`.
///
/// File writes go through a temporary file in the target directory that is
/// renamed over the destination, so a failed write never leaves a truncated
/// file behind. A read-only destination is refused like a plain overwrite
/// would be, and a symlinked destination is written through to its target.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        let target = resolve_link(path)?;
        let existing = fs::metadata(&target).ok();
        if existing.as_ref().is_some_and(|m| m.permissions().readonly()) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", target.display()),
            ));
        }

        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;

        // Temp files are created owner-only; keep the destination readable.
        let permissions = match existing {
            Some(meta) => meta.permissions(),
            None => default_permissions(tmp.as_file())?,
        };
        fs::set_permissions(tmp.path(), permissions)?;

        trace!(from = %tmp.path().display(), to = %target.display(), "Persisting");
        tmp.persist(&target)?;
        Ok(())
    }
}

/// Follow a symlink so the rename replaces the file it points to, not the
/// link itself.
fn resolve_link(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path),
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(unix)]
fn default_permissions(_file: &fs::File) -> io::Result<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions(file: &fs::File) -> io::Result<fs::Permissions> {
    Ok(file.metadata()?.permissions())
}
