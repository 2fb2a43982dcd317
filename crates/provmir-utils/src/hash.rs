use std::{fs::File, io, path::Path};

use zip::ZipArchive;

use crate::error::{HashError, HashResult};

/// Prefix marking the digest scheme, so a future scheme change can coexist
/// with already-recorded digests.
const DIGEST_PREFIX: &str = "zh:";

/// Computes a content digest over the entries of a zip archive.
///
/// Each file entry's decompressed bytes are hashed with blake3, the resulting
/// `<hex>  <name>` manifest lines are sorted by entry name, and the digest is
/// the blake3 hash of that manifest. Directory entries are skipped. Two
/// archives holding the same entry names and contents therefore produce the
/// same digest regardless of entry order, compression level, or the archive
/// file's own name.
///
/// # Errors
///
/// * [`HashError::ReadFailed`] if the archive or one of its entries cannot be read.
/// * [`HashError::ArchiveFailed`] if the file is not a valid zip archive.
pub fn content_digest<P: AsRef<Path>>(archive_path: P) -> HashResult<String> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(|err| {
        HashError::ReadFailed {
            path: archive_path.to_path_buf(),
            source: err,
        }
    })?;
    let mut archive = ZipArchive::new(file).map_err(|err| {
        HashError::ArchiveFailed {
            path: archive_path.to_path_buf(),
            source: err,
        }
    })?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|err| {
            HashError::ArchiveFailed {
                path: archive_path.to_path_buf(),
                source: err,
            }
        })?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let mut hasher = blake3::Hasher::new();
        io::copy(&mut entry, &mut hasher).map_err(|err| {
            HashError::ReadFailed {
                path: archive_path.to_path_buf(),
                source: err,
            }
        })?;
        entries.push((name, hasher.finalize().to_hex().to_string()));
    }

    entries.sort();

    let mut hasher = blake3::Hasher::new();
    for (name, entry_hash) in &entries {
        hasher.update(entry_hash.as_bytes());
        hasher.update(b"  ");
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }

    Ok(format!("{DIGEST_PREFIX}{}", hasher.finalize().to_hex()))
}
