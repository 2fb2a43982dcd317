use std::{fs, io, path::Path};

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// If the directory already exists, this function does nothing. If the path
/// exists but is not a directory, it returns [`FileSystemError::NotADirectory`].
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| {
            FileSystemError::Directory {
                path: path.to_path_buf(),
                action: "create",
                source: err,
            }
        })?;
    } else if !path.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Reports whether a regular file exists at `path`.
///
/// A missing path is `Ok(false)`; any other stat failure (permissions, I/O)
/// is surfaced as an error rather than being folded into "absent".
pub fn file_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<bool> {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => {
            Err(FileSystemError::File {
                path: path.to_path_buf(),
                action: "stat",
                source: err,
            })
        }
    }
}
