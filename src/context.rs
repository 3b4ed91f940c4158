use std::path::{Path, PathBuf};
use time::UtcOffset;

/// Context passed throughout the application containing global settings
#[derive(Clone)]
pub struct Context {
    /// Report every entry as it is written
    pub verbose: bool,

    /// Plan only, do not write the archive
    pub dry_run: bool,

    /// Directory all relative paths resolve against
    pub base_dir: PathBuf,

    /// Local time zone offset, read before any other thread is spawned
    pub utc_offset: UtcOffset,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool, dry_run: bool) -> Self {
        Self {
            verbose,
            dry_run,
            base_dir,
            utc_offset: crate::utils::local_offset(),
        }
    }

    /// Resolve a possibly relative path against the base directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let ctx = Context::new(PathBuf::from("/work"), false, false);
        assert_eq!(ctx.resolve(Path::new("Resources")), PathBuf::from("/work/Resources"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute() {
        let ctx = Context::new(PathBuf::from("/work"), false, false);
        assert_eq!(ctx.resolve(Path::new("/opt/pixi.zip")), PathBuf::from("/opt/pixi.zip"));
    }
}
