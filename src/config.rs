use crate::archive::ArchiveFormat;
use crate::context::Context;
use crate::error::Error;
use crate::platform::Platform;
use crate::result::Result;
use crate::tpl::Tpl;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

/// Config file looked up in the base directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "pixi-pack.toml";

pub const DEFAULT_RESOURCES: &str = "Resources";
pub const DEFAULT_OUTPUT: &str = "pixi.zip";
pub const DEFAULT_BINARIES: &[&str] = &[
    "CFGEditor/CFG Editor/bin/Release/CFG Editor.exe",
    "build/Pixi/MinSizeRel/Pixi.exe",
];

/// Raw contents of `pixi-pack.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub resources: Option<String>,

    #[serde(default)]
    pub binaries: Option<Vec<String>>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub include_hidden: Option<bool>,
}

/// Effective packaging settings. Paths are relative to the base directory
/// until resolved through [`Context::resolve`].
#[derive(Debug, Clone)]
pub struct Config {
    pub resources: PathBuf,
    pub binaries: Vec<PathBuf>,
    /// Output file name, may contain `$PLATFORM` and `$DATE`
    pub output: String,
    /// Explicit format; inferred from the output name when `None`
    pub format: Option<ArchiveFormat>,
    pub include_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: PathBuf::from(DEFAULT_RESOURCES),
            binaries: DEFAULT_BINARIES.iter().map(PathBuf::from).collect(),
            output: DEFAULT_OUTPUT.to_string(),
            format: None,
            include_hidden: false,
        }
    }
}

impl Config {
    /// Load settings from an explicit config file, or from
    /// `pixi-pack.toml` in the base directory if one exists.
    pub fn load(ctx: &Context, path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => {
                let path = ctx.resolve(path);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound(path));
                }
                path
            }
            None => {
                let path = ctx.base_dir.join(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse a config file body, falling back to defaults for absent keys
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(resources) = file.resources {
            if resources.trim().is_empty() {
                return Err(Error::InvalidConfig("'resources' must not be empty".to_string()));
            }
            config.resources = PathBuf::from(resources);
        }

        if let Some(binaries) = file.binaries {
            config.binaries = binaries.into_iter().map(PathBuf::from).collect();
        }

        if let Some(output) = file.output {
            if output.trim().is_empty() {
                return Err(Error::InvalidConfig("'output' must not be empty".to_string()));
            }
            config.output = output;
        }

        if let Some(format) = file.format {
            config.format = Some(format.parse()?);
        }

        if let Some(include_hidden) = file.include_hidden {
            config.include_hidden = include_hidden;
        }

        Ok(config)
    }

    /// Render the output template and resolve it against the base directory
    pub fn output_path(&self, ctx: &Context) -> Result<PathBuf> {
        let date = OffsetDateTime::now_utc()
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(|e| Error::custom(format!("Failed to format date: {}", e)))?;

        let mut tpl = Tpl::new();
        tpl.register("PLATFORM", Platform::current().as_str());
        tpl.register("DATE", date);

        let name = tpl.parse(&self.output)?;
        Ok(ctx.resolve(Path::new(&name)))
    }

    /// The configured format, or the one implied by the output file name
    pub fn archive_format(&self, output: &Path) -> ArchiveFormat {
        self.format.unwrap_or_else(|| ArchiveFormat::from_path(output))
    }
}
