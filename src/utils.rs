use crate::error::Error;
use crate::result::Result;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use time::{OffsetDateTime, UtcOffset};

/// Base directory for relative paths: the given one, or the current directory
pub fn base_dir(path: Option<&Path>) -> Result<PathBuf> {
    let dir = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !dir.is_dir() {
        return Err(Error::MissingInput(dir));
    }

    Ok(dir)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Permission bits to record for an archive member
#[cfg(unix)]
pub fn file_mode(metadata: &Metadata, _executable: bool) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

/// Permission bits to record for an archive member
#[cfg(not(unix))]
pub fn file_mode(metadata: &Metadata, executable: bool) -> u32 {
    if metadata.is_dir() || executable {
        0o755
    } else {
        0o644
    }
}

/// Offset of the local time zone, UTC when it cannot be determined.
/// On Unix this only succeeds while the process is single-threaded.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Modification time of a file in zip's DOS representation, as local
/// wall-clock time. Times zip cannot express fall back to 1980-01-01.
pub fn zip_time(metadata: &Metadata, offset: UtcOffset) -> zip::DateTime {
    metadata
        .modified()
        .ok()
        .map(|t| OffsetDateTime::from(t).to_offset(offset))
        .and_then(|t| zip::DateTime::try_from(t).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_base_dir_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(base_dir(Some(dir.path())).unwrap(), dir.path());

        let missing = dir.path().join("missing");
        assert!(matches!(base_dir(Some(&missing)), Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_zip_time_of_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "a").unwrap();

        let time = zip_time(&fs::metadata(&path).unwrap(), UtcOffset::UTC);
        assert!(time.year() >= 2020);
    }

    #[test]
    fn test_zip_time_is_local_wall_clock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        let file = fs::File::create(&path).unwrap();
        let mtime = datetime!(2024-01-01 12:00 UTC);
        file.set_modified(mtime.into()).unwrap();
        drop(file);

        let tokyo = UtcOffset::from_hms(9, 0, 0).unwrap();
        let time = zip_time(&fs::metadata(&path).unwrap(), tokyo);
        assert_eq!((time.year(), time.month(), time.day()), (2024, 1, 1));
        assert_eq!(time.hour(), 21);
        assert_eq!(time.minute(), 0);

        let time = zip_time(&fs::metadata(&path).unwrap(), UtcOffset::UTC);
        assert_eq!(time.hour(), 12);
    }
}
