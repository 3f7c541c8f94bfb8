use anyhow::{Context, Result};
use bag3d::config::{Cli, Config};
use bag3d::viewer::Surface;
use bag3d::{app, snapshot};
use clap::Parser;
use std::fs::File;
use std::path::Path;

/// Sends logs to `log_file` when given; otherwise only `RUST_LOG` enables
/// them, so they never scribble over the interactive screen.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let default_filter = match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, false) => "warn",
        (None, true) => "off",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("Failed to initialize logging")?;
    Ok(())
}

/// Main function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.snapshot.is_none())?;
    let config = Config::from(&cli);

    match &cli.snapshot {
        Some(path) => snapshot::render_snapshot(
            &config,
            Surface::new(cli.width, cli.height),
            cli.frames,
            path,
        )
        .with_context(|| format!("Failed to write snapshot {}", path.display())),
        None => app::run(config),
    }
}
