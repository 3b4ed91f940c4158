use crate::archive::{self, ArchiveFormat};
use crate::config::Config;
use crate::context::Context;
use crate::plan::Plan;
use crate::result::Result;
use std::path::PathBuf;

/// Outcome of a packaging run
#[derive(Debug)]
pub struct Report {
    pub output: PathBuf,
    pub format: ArchiveFormat,
    pub entries: usize,
    /// File bytes stored, zero for a dry run
    pub bytes: u64,
}

/// Plan the archive and write it, or only list it in dry-run mode
pub fn run(ctx: &Context, config: &Config) -> Result<Report> {
    let output = config.output_path(ctx)?;
    let format = config.archive_format(&output);
    let plan = Plan::build(ctx, config, &output)?;

    let bytes = if ctx.dry_run {
        for entry in plan.entries() {
            cliclack::log::info(format!("{} <- {}", entry.name, entry.source.display()))?;
        }
        0
    } else {
        archive::write(ctx, &plan, format, &output)?
    };

    Ok(Report {
        output,
        format,
        entries: plan.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testing;
    use crate::error::Error;
    use std::fs::File;
    use zip::ZipArchive;

    #[test]
    fn test_default_layout_produces_pixi_zip() {
        let (dir, ctx, config) = testing::release_tree();

        let report = run(&ctx, &config).unwrap();

        assert_eq!(report.output, dir.path().join("pixi.zip"));
        assert_eq!(report.format, ArchiveFormat::Zip);
        assert_eq!(report.entries, 7);

        let mut archive = ZipArchive::new(File::open(&report.output).unwrap()).unwrap();
        assert_eq!(archive.len(), 7);
        assert!(archive.by_name("CFG Editor.exe").is_ok());
        assert!(archive.by_name("asm/main.asm").is_ok());
        assert!(archive.by_name("Resources/asm/main.asm").is_err());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, _, config) = testing::release_tree();
        let ctx = Context::new(dir.path().to_path_buf(), false, true);

        let report = run(&ctx, &config).unwrap();

        assert_eq!(report.entries, 7);
        assert_eq!(report.bytes, 0);
        assert!(!report.output.exists());
    }

    #[test]
    fn test_tar_gz_selected_by_name() {
        let (dir, ctx, config) = testing::release_tree();
        let config = Config {
            output: "dist/pixi.tar.gz".to_string(),
            ..config
        };

        let report = run(&ctx, &config).unwrap();

        assert_eq!(report.format, ArchiveFormat::TarGz);
        assert!(dir.path().join("dist/pixi.tar.gz").is_file());
    }

    #[test]
    fn test_empty_plan_reported_without_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Resources")).unwrap();
        let ctx = Context::new(dir.path().to_path_buf(), false, false);
        let config = Config {
            binaries: Vec::new(),
            ..Config::default()
        };

        let report = run(&ctx, &config).unwrap();

        assert_eq!(report.entries, 0);
        let archive = ZipArchive::new(File::open(&report.output).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_missing_binary_leaves_no_archive() {
        let (dir, ctx, config) = testing::release_tree();
        std::fs::remove_file(dir.path().join("build/Pixi/MinSizeRel/Pixi.exe")).unwrap();

        let err = run(&ctx, &config).unwrap_err();

        assert!(matches!(err, Error::MissingInput(_)));
        assert!(!dir.path().join("pixi.zip").exists());
    }
}
