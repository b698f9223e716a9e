//! Atomic whole-file replacement.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Mode requested for files that did not exist before; the process umask
/// still applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Replaces `path` with `bytes` via a temporary file and a rename.
///
/// The temporary file lives in the target's directory so the rename stays on
/// one filesystem. A symbolic link is followed, so the file it points at is
/// replaced and the link survives. When the target already exists its
/// permissions are carried over to the new file. Missing parent directories
/// are created.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    write_atomic_with_permissions(path, bytes, None)
}

/// Like [`write_atomic`], but applies `permissions` when given instead of
/// the existing target's.
pub(crate) fn write_atomic_with_permissions(
    path: &Path,
    bytes: &[u8],
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let target = resolve_link(path)?;
    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp_file = temp_file_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    let inherited = permissions.or_else(|| {
        fs::metadata(&target)
            .ok()
            .map(|metadata| metadata.permissions())
    });
    if let Some(mode) = inherited {
        temp_file.as_file().set_permissions(mode)?;
    }
    temp_file.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

fn resolve_link(path: &Path) -> io::Result<PathBuf> {
    let is_link =
        fs::symlink_metadata(path).is_ok_and(|metadata| metadata.file_type().is_symlink());
    if is_link {
        fs::canonicalize(path)
    } else {
        Ok(path.to_path_buf())
    }
}

#[cfg(unix)]
fn temp_file_in(parent: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
        .tempfile_in(parent)
}

#[cfg(not(unix))]
fn temp_file_in(parent: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(parent)
}
