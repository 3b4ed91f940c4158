use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Command-line arguments for pixi-pack
#[derive(Debug)]
pub struct Args {
    /// Directory relative paths resolve against
    pub dir: Option<PathBuf>,

    /// Alternative config file
    pub config: Option<PathBuf>,

    /// Resources directory to flatten into the archive
    pub resources: Option<PathBuf>,

    /// Executables placed at the archive root, replacing the configured list
    pub binaries: Vec<PathBuf>,

    /// Output archive name template
    pub output: Option<String>,

    /// Archive format (zip or tar.gz)
    pub format: Option<String>,

    pub include_hidden: bool,

    /// List planned entries without writing
    pub dry_run: bool,

    /// Enable verbose output
    pub verbose: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    fn command() -> Command {
        Command::new("pixi-pack")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Package Pixi resources and binaries into a release archive")
            .arg(
                Arg::new("dir")
                    .short('C')
                    .long("dir")
                    .value_name("DIR")
                    .help("Base directory for relative paths (default: current directory)")
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Config file (default: pixi-pack.toml in the base directory, if present)")
            )
            .arg(
                Arg::new("resources")
                    .short('r')
                    .long("resources")
                    .value_name("DIR")
                    .help("Resources directory, stored relative to itself")
            )
            .arg(
                Arg::new("binary")
                    .short('b')
                    .long("binary")
                    .value_name("FILE")
                    .action(ArgAction::Append)
                    .help("Executable to place at the archive root (repeatable)")
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("FILE")
                    .help("Output archive; $PLATFORM and $DATE are substituted")
            )
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_name("FORMAT")
                    .value_parser(["zip", "tar.gz", "tgz"])
                    .help("Archive format (default: inferred from output name)")
            )
            .arg(
                Arg::new("include-hidden")
                    .long("include-hidden")
                    .action(ArgAction::SetTrue)
                    .help("Include dot-files from the resources directory")
            )
            .arg(
                Arg::new("dry-run")
                    .short('n')
                    .long("dry-run")
                    .action(ArgAction::SetTrue)
                    .help("Print the planned archive entries and exit")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("Enable verbose output")
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            dir: matches.get_one::<String>("dir").map(PathBuf::from),
            config: matches.get_one::<String>("config").map(PathBuf::from),
            resources: matches.get_one::<String>("resources").map(PathBuf::from),
            binaries: matches
                .get_many::<String>("binary")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default(),
            output: matches.get_one::<String>("output").cloned(),
            format: matches.get_one::<String>("format").cloned(),
            include_hidden: matches.get_flag("include-hidden"),
            dry_run: matches.get_flag("dry-run"),
            verbose: matches.get_flag("verbose"),
        }
    }
}
