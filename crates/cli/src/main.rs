mod args;
mod bulk;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fightsort_core::{
    find_largest_video, load_config, load_config_from_env, validate_config, Config, FsLister,
    FsPlacer, SortSettings, Sorter,
};

use args::{Args, Invocation};
use report::EXIT_FAILURE;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json);

    match run(args).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            println!("Error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_logging(json: bool) {
    // Logs go to stderr; stdout carries the per-file report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(args: Args) -> Result<u8> {
    let invocation = match args.invocation(|key| std::env::var(key).ok()) {
        Ok(invocation) => invocation,
        Err(msg) => bail!(msg),
    };

    let config = load(&args)?;

    let category = match &invocation {
        Invocation::Job { category, .. } => category.as_deref(),
        Invocation::RenameAll { .. } => None,
    };
    let settings = SortSettings::from_config(&config, category);
    let strict = settings.strict || args.strict_matching;
    let settings = settings.with_strict(strict).with_dry_run(args.dry_run);

    info!(
        destination = %settings.destination.display(),
        strict = settings.strict,
        same_res_replace = settings.policy.allow_same_res_replace,
        dry_run = settings.dry_run,
        "Configuration loaded"
    );

    let sorter = Sorter::new(settings, FsPlacer::new(config.placer.clone()), FsLister);

    match invocation {
        Invocation::Job { dir, .. } => {
            ensure_dir(&dir).await?;
            let extensions = &sorter.settings().video_extensions;
            let Some(video) = find_largest_video(sorter.lister(), &dir, extensions)
                .await
                .with_context(|| format!("Failed to list {}", dir.display()))?
            else {
                bail!("No video files found in {}", dir.display());
            };

            info!(file = %video.display(), "Sorting job file");
            let result = sorter.process(&video).await;
            report::print(&video, &result, args.json);
            Ok(report::exit_code(&result))
        }
        Invocation::RenameAll {
            dir,
            remove_renamed,
        } => {
            let dir = dir.unwrap_or_else(|| sorter.settings().destination.clone());
            ensure_dir(&dir).await?;
            bulk::rename_all(&sorter, &dir, remove_renamed, args.json).await
        }
    }
}

/// Loads the configuration file (or defaults plus environment) and applies
/// command-line overrides.
fn load(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_from_env().context("Failed to load config from environment")?,
    };

    if let Some(dest) = &args.dest {
        config.library.destination = dest.clone();
    }
    if args.replace_same_res {
        config.conflicts.allow_same_res_replace = true;
    }

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    let is_dir = tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        bail!("Invalid job directory: {}", dir.display());
    }
    Ok(())
}
