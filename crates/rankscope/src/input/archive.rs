//! Zip archive extraction.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{RankscopeError, Result};

/// Unpack every entry of `archive` under `target_dir`.
///
/// The target directory is created if needed. Returns the paths of the
/// extracted files (directories are not listed). Entries whose names would
/// escape the target directory are skipped by the extractor.
pub fn extract_archive(archive: &Path, target_dir: &Path) -> Result<Vec<PathBuf>> {
    let archive_err = |source: ZipError| RankscopeError::Archive {
        path: archive.to_path_buf(),
        source,
    };

    let file = File::open(archive).map_err(|e| archive_err(ZipError::Io(e)))?;
    let mut zip = ZipArchive::new(file).map_err(archive_err)?;

    fs::create_dir_all(target_dir).map_err(|e| RankscopeError::Io {
        path: target_dir.to_path_buf(),
        source: e,
    })?;

    let mut extracted = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let entry = zip.by_index(index).map_err(archive_err)?;
        if !entry.is_file() {
            continue;
        }
        if let Some(name) = entry.enclosed_name() {
            extracted.push(target_dir.join(name));
        }
    }

    zip.extract(target_dir).map_err(archive_err)?;
    debug!(
        archive = %archive.display(),
        target = %target_dir.display(),
        files = extracted.len(),
        "extracted archive"
    );

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("a.csv", "x\n1\n"), ("nested/b.csv", "y\n2\n")]);

        let target = dir.path().join("out");
        let mut files = extract_archive(&archive, &target).unwrap();
        files.sort();

        assert_eq!(files, vec![target.join("a.csv"), target.join("nested/b.csv")]);
        assert_eq!(fs::read_to_string(target.join("a.csv")).unwrap(), "x\n1\n");
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_archive(&dir.path().join("absent.zip"), dir.path());

        assert!(matches!(result, Err(RankscopeError::Archive { .. })));
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        fs::write(&archive, b"definitely not a zip file").unwrap();

        let result = extract_archive(&archive, &dir.path().join("out"));

        assert!(matches!(result, Err(RankscopeError::Archive { .. })));
    }
}
