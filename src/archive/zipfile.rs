use crate::context::Context;
use crate::plan::{EntryKind, Plan};
use crate::result::Result;
use crate::utils;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn create_zip(ctx: &Context, plan: &Plan, output: &Path) -> Result<u64> {
    let file = File::create(output)?;
    let mut zip = ZipWriter::new(file);
    let mut written = 0;

    for entry in plan.entries() {
        if ctx.verbose {
            cliclack::log::remark(format!("{} -> {}", entry.source.display(), entry.name))?;
        }

        let metadata = fs::metadata(&entry.source)?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(utils::file_mode(&metadata, entry.executable))
            .last_modified_time(utils::zip_time(&metadata, ctx.utc_offset));

        match entry.kind {
            EntryKind::Directory => {
                zip.add_directory(entry.name.as_str(), options)?;
            }
            EntryKind::File => {
                zip.start_file(entry.name.as_str(), options)?;
                let mut f = File::open(&entry.source)?;
                written += io::copy(&mut f, &mut zip)?;
            }
        }
    }

    zip.finish()?;
    Ok(written)
}
