use crate::error::{GeneratorError, GeneratorErrorExt};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Writes `path` through a temporary file in the same directory, replacing the
/// destination only after `write` succeeds and the data is flushed.
///
/// The new file takes over the permissions of the file it replaces; a fresh file is
/// readable by everyone (`0o644` on Unix). On any error the temporary file is removed
/// and the destination is left as it was.
pub(crate) fn write_atomically<T, F>(path: &Path, write: F) -> Result<T, GeneratorError>
where
    F: FnOnce(&mut dyn Write) -> Result<T, GeneratorError>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .context(format!("Failed to create temporary file in {}", dir.display()))?;

    let value = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let value = write(&mut writer)?;
        writer.flush().context(format!("Failed to flush {}", path.display()))?;
        value
    };

    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .context(format!("Failed to set permissions for {}", path.display()))?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .context(format!("Failed to replace {}", path.display()))?;

    Ok(value)
}

fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path).map(|meta| meta.permissions()).ok().or_else(new_file_permissions)
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
const fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
