mod archive;
mod args;
mod config;
mod context;
mod error;
mod pack;
mod plan;
mod platform;
mod result;
mod tpl;
mod utils;

use args::Args;
use config::Config;
use context::Context;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let args = Args::parse();

    let base_dir = utils::base_dir(args.dir.as_deref())?;
    let ctx = Context::new(base_dir, args.verbose, args.dry_run);

    cliclack::intro("pixi-pack")?;

    let mut config = Config::load(&ctx, args.config.as_deref())?;
    apply_overrides(&mut config, args)?;

    // Spinner redraws would interleave with per-entry log lines
    let quiet = !ctx.verbose && !ctx.dry_run;
    let spinner = cliclack::spinner();
    if quiet {
        spinner.start("Packing release archive...");
    }

    let report = match pack::run(&ctx, &config) {
        Ok(report) => report,
        Err(e) => {
            if quiet {
                spinner.error("Packing failed");
            }
            return Err(e);
        }
    };

    let summary = format!(
        "{} entries, {} bytes -> {} ({})",
        report.entries,
        report.bytes,
        report.output.display(),
        report.format
    );
    if quiet {
        spinner.stop(summary);
    } else if !ctx.dry_run {
        cliclack::log::success(summary)?;
    }

    if report.entries == 0 {
        cliclack::log::warning("Nothing to pack, the archive is empty")?;
    }

    if ctx.dry_run {
        cliclack::outro(format!("Dry run: {} entries planned", report.entries))?;
    } else {
        cliclack::outro("Archive created successfully!")?;
    }
    Ok(())
}

/// Command-line flags take precedence over the config file
fn apply_overrides(config: &mut Config, args: Args) -> result::Result<()> {
    if let Some(resources) = args.resources {
        config.resources = resources;
    }
    if !args.binaries.is_empty() {
        config.binaries = args.binaries;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(format) = args.format {
        config.format = Some(format.parse()?);
    }
    if args.include_hidden {
        config.include_hidden = true;
    }
    Ok(())
}
