use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "segue", version)]
struct Cli {
    /// Log broker decisions to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the progress curve of an easing configuration.
    Curve(CurveArgs),
    /// Replay a lifecycle script against a headless host.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct CurveArgs {
    /// Divisor of the proportional term.
    #[arg(long, default_value_t = segue::EaseOut::GENTLE.k)]
    k: f64,

    /// Additive floor applied every frame.
    #[arg(long, default_value_t = segue::EaseOut::GENTLE.epsilon)]
    epsilon: f64,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Broker options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the script's frame budget.
    #[arg(long)]
    max_frames: Option<u64>,
}

#[derive(serde::Serialize)]
struct CurveReport {
    easing: segue::EaseOut,
    frames: u64,
    progress: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Curve(args) => cmd_curve(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "segue=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_curve(args: CurveArgs) -> anyhow::Result<()> {
    let easing = segue::EaseOut::new(args.k, args.epsilon)?;
    let progress = easing.curve();
    let report = CurveReport {
        easing,
        frames: progress.len() as u64,
        progress,
    };
    print_json(&report)
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let mut script = segue::Script::from_path(&args.in_path)?;
    if let Some(max_frames) = args.max_frames {
        script.max_frames = max_frames;
    }
    let opts = match &args.config {
        Some(path) => segue::BrokerOpts::from_path(path)?,
        None => segue::BrokerOpts::default(),
    };

    let playback = script
        .play(opts)
        .with_context(|| format!("replay '{}'", args.in_path.display()))?;
    print_json(&playback)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}
