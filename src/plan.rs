use crate::config::Config;
use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single archive member and the file it is read from
#[derive(Debug, Clone)]
pub struct Entry {
    pub source: PathBuf,
    /// Name inside the archive, `/`-separated, directories end with `/`
    pub name: String,
    pub kind: EntryKind,
    /// Placed at the archive root from the binaries list
    pub executable: bool,
}

/// Ordered list of everything that goes into the archive
#[derive(Debug, Default)]
pub struct Plan {
    entries: Vec<Entry>,
}

impl Plan {
    /// Scan the resources tree and append the configured binaries.
    ///
    /// Resource names are relative to the resources directory, binaries
    /// are named by their base file name. `output` is skipped if the
    /// walk runs into it.
    pub fn build(ctx: &Context, config: &Config, output: &Path) -> Result<Self> {
        let resources = ctx.resolve(&config.resources);
        if !resources.is_dir() {
            return Err(Error::MissingInput(resources));
        }

        let output = fs::canonicalize(output).ok();
        let mut entries = Vec::new();

        let walker = WalkDir::new(&resources)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| config.include_hidden || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if let Some(output) = &output
                && fs::canonicalize(path).ok().as_ref() == Some(output)
            {
                continue;
            }

            let relative = path.strip_prefix(&resources).map_err(|_| {
                Error::custom(format!("{} is outside {}", path.display(), resources.display()))
            })?;
            let name = entry_name(relative);

            if entry.file_type().is_dir() {
                entries.push(Entry {
                    source: path.to_path_buf(),
                    name: format!("{}/", name),
                    kind: EntryKind::Directory,
                    executable: false,
                });
            } else {
                entries.push(Entry {
                    source: path.to_path_buf(),
                    name,
                    kind: EntryKind::File,
                    executable: false,
                });
            }
        }

        for binary in &config.binaries {
            let source = ctx.resolve(binary);
            if !source.is_file() {
                return Err(Error::MissingInput(source));
            }
            if let Some(output) = &output
                && fs::canonicalize(&source).ok().as_ref() == Some(output)
            {
                return Err(Error::InvalidConfig(format!(
                    "output {} would overwrite the binary it packs",
                    source.display()
                )));
            }

            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| Error::custom(format!("{} has no file name", source.display())))?;

            entries.push(Entry {
                source,
                name,
                kind: EntryKind::File,
                executable: true,
            });
        }

        // A directory and a file with the same path collide on extraction
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.trim_end_matches('/')) {
                return Err(Error::DuplicateEntry(entry.name.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Archive name for a path relative to the resources directory
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
