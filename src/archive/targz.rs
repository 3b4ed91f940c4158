use crate::context::Context;
use crate::plan::{EntryKind, Plan};
use crate::result::Result;
use crate::utils;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::Path;
use tar::{Builder, Header};

pub fn create_tar_gz(ctx: &Context, plan: &Plan, output: &Path) -> Result<u64> {
    let tar_gz = File::create(output)?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = Builder::new(enc);
    let mut written = 0;

    for entry in plan.entries() {
        if ctx.verbose {
            cliclack::log::remark(format!("{} -> {}", entry.source.display(), entry.name))?;
        }

        match entry.kind {
            EntryKind::Directory => {
                tar.append_dir(&entry.name, &entry.source)?;
            }
            EntryKind::File => {
                let mut file = File::open(&entry.source)?;
                let metadata = file.metadata()?;

                let mut header = Header::new_gnu();
                header.set_metadata(&metadata);
                header.set_mode(utils::file_mode(&metadata, entry.executable));

                tar.append_data(&mut header, &entry.name, &mut file)?;
                written += metadata.len();
            }
        }
    }

    tar.into_inner()?.finish()?;
    Ok(written)
}
