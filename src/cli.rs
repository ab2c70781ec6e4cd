use crate::{augment, config::Config, util::ensure_dir};
use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "report-augment")]
#[command(about = "Annotate experiment comparison summaries with training budget metadata")]
pub struct Args {
    /// Defaults to `run`.
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Path to config TOML. If omitted, uses ./report-augment.toml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rewrite the summary in place with the training annotation.
    Run(Inputs),
    /// Print the augmented summary without writing it.
    Preview(Inputs),
    /// Print the effective configuration.
    Config {},
}

#[derive(ClapArgs, Debug, Default)]
pub struct Inputs {
    #[arg(long)]
    pub summary: Option<PathBuf>,
    #[arg(long)]
    pub metadata: Option<PathBuf>,
}

impl Inputs {
    fn resolve(&self, cfg: &Config) -> (PathBuf, PathBuf) {
        let summary = self
            .summary
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.summary));
        let metadata = self
            .metadata
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.metadata));
        (summary, metadata)
    }
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            // Logging is configured from the file, so fall back to defaults to report this.
            let _ = init_logging(&args, &Config::default(), None);
            return Err(err);
        }
    };

    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    match &args.cmd {
        None => run(&cfg, &Inputs::default()),
        Some(Command::Run(inputs)) => run(&cfg, inputs),
        Some(Command::Preview(inputs)) => preview(&cfg, inputs),
        Some(Command::Config {}) => {
            println!("{}", toml::to_string(&cfg)?);
            Ok(())
        }
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    let default = PathBuf::from("report-augment.toml");
    if default.exists() {
        Config::load(&default)
    } else {
        Ok(Config::default())
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout is reserved for command output.
    let console_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn run(cfg: &Config, inputs: &Inputs) -> Result<()> {
    let (summary, metadata) = inputs.resolve(cfg);
    info!("augmenting {} from {}", summary.display(), metadata.display());

    let out = augment::augment(cfg, &summary, &metadata)?;

    if cfg.global.print_summary {
        println!(
            "Summary updated with {} training metadata.",
            out.annotation.algorithm
        );
    }
    Ok(())
}

fn preview(cfg: &Config, inputs: &Inputs) -> Result<()> {
    let (summary, metadata) = inputs.resolve(cfg);
    let out = augment::preview(cfg, &summary, &metadata)?;
    if out.unchanged() {
        info!("{} already up to date", summary.display());
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&out.rendered)?;
    if !cfg.output.trailing_newline {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    let summary = PathBuf::from(&cfg.paths.summary);
    let dir = summary.parent().unwrap_or_else(|| Path::new("."));
    Some(dir.join("report-augment.log"))
}
