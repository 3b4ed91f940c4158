mod targz;
mod zipfile;

use crate::context::Context;
use crate::error::Error;
use crate::plan::Plan;
use crate::result::Result;
use crate::utils;
use std::path::Path;
use std::str::FromStr;

/// Container format of the output archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Guess the format from a file name, defaulting to zip
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Zip
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
            other => Err(Error::InvalidConfig(format!(
                "unsupported archive format '{}' (expected zip or tar.gz)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write every planned entry to `output`, replacing any existing file.
/// Returns the number of file bytes stored.
pub fn write(ctx: &Context, plan: &Plan, format: ArchiveFormat, output: &Path) -> Result<u64> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        utils::ensure_dir(parent)?;
    }

    match format {
        ArchiveFormat::Zip => zipfile::create_zip(ctx, plan, output),
        ArchiveFormat::TarGz => targz::create_tar_gz(ctx, plan, output),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::Config;
    use crate::context::Context;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use time::OffsetDateTime;
    use time::macros::datetime;

    pub fn write_file(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// A release layout with a small resources tree and two binaries
    pub fn release_tree() -> (TempDir, Context, Config) {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "Resources/asm/main.asm", "; main");
        write_file(dir.path(), "Resources/list.txt", "01 sprite.json");
        write_file(dir.path(), "Resources/sprites/shooter.asm", "; shooter");
        write_file(dir.path(), "build/Pixi/MinSizeRel/Pixi.exe", "MZ pixi");
        write_file(dir.path(), "CFGEditor/CFG Editor/bin/Release/CFG Editor.exe", "MZ editor");

        let ctx = Context::new(dir.path().to_path_buf(), false, false);
        (dir, ctx, Config::default())
    }

    /// Pin a file's modification time to 2024-01-01 12:00 UTC
    pub fn set_mtime(path: &Path) -> OffsetDateTime {
        let mtime = datetime!(2024-01-01 12:00 UTC);
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(mtime.into()).unwrap();
        mtime
    }

    pub fn output(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join(name)
    }
}
