//! thrl6p-manifest - keeps `manifest.json` in sync with a folder of patch files
//!
//! Scans the patch directory, merges each patch with its `.meta.json`
//! sidecar, and rewrites the manifest from scratch.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use thrl6p_manifest::config::{BuildConfig, DEFAULT_MANIFEST_PATH, DEFAULT_PATCHES_PATH};
use thrl6p_manifest::manifest::{self, ManifestError};

#[derive(Parser)]
#[command(name = "thrl6p-manifest")]
#[command(version, about = "Build a manifest of .thrl6p patches and their metadata")]
struct Cli {
    /// Path to directory containing patch files
    #[arg(long, env = "THRL6P_PATCHES_PATH", default_value = DEFAULT_PATCHES_PATH)]
    patches_path: PathBuf,

    /// Location of manifest file
    #[arg(long, env = "THRL6P_MANIFEST_PATH", default_value = DEFAULT_MANIFEST_PATH)]
    manifest_path: PathBuf,

    /// Increase verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn build_config(&self) -> BuildConfig {
        BuildConfig::new(&self.patches_path, &self.manifest_path)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli.build_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &BuildConfig) -> Result<(), ManifestError> {
    let report = manifest::scan(&config.patches_path)?;
    manifest::write(&config.manifest_path, &report.manifest)?;

    info!(
        patches = report.manifest.len(),
        skipped = report.skipped.len(),
        default_metadata = report.defaulted.len(),
        path = %config.manifest_path.display(),
        "Updated manifest"
    );
    Ok(())
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(cli.verbose >= 2))
        .init();
}
