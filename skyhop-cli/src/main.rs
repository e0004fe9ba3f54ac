mod common;
mod logic;
mod play;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::info;
use skyhop_game::{GameConfig, JsonCatalog};
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use common::split_csv;
use logic::{AutoplayRecord, GameplayStrategy, resolve_seed_inputs, run_autoplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Interactive game in the terminal
    Play,
    /// Headless autoplay over one or more seeds
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "skyhop", version)]
#[command(about = "Hop between airports, chase quests and beat the ideal route")]
struct Args {
    /// Interactive play or headless autoplay
    #[arg(long, value_enum, default_value_t = RunMode::Play)]
    mode: RunMode,

    /// Seeds to run (comma-separated); play mode uses the first
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Maximum hops per autoplay run
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Autoplay strategy
    #[arg(long, value_enum, default_value_t = GameplayStrategy::Greedy)]
    strategy: GameplayStrategy,

    /// Autoplay report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Game configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Airport catalog JSON file instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Optional path to write the autoplay report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.catalog.as_deref())?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;

    match args.mode {
        RunMode::Play => {
            let seed = seeds.first().copied().unwrap_or(logic::seeds::DEFAULT_SEED);
            info!("interactive game with seed {seed}");
            let mut game = skyhop_game::Game::new(catalog, config, seed);
            let mut out = stdout();
            play::run_menu(&mut game, stdin().lock(), &mut out)
        }
        RunMode::Auto => run_auto(&args, &catalog, &config, &seeds),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn load_catalog(path: Option<&Path>) -> Result<JsonCatalog> {
    match path {
        Some(path) => JsonCatalog::from_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => JsonCatalog::load_from_static().context("bundled airport data is corrupt"),
    }
}

fn run_auto(args: &Args, catalog: &JsonCatalog, config: &GameConfig, seeds: &[u64]) -> Result<()> {
    let start_time = Instant::now();
    if args.report == ReportFormat::Console && args.output.is_none() {
        println!("{}", "🛫 Skyhop Autoplay".bright_cyan().bold());
        println!("{}", "==================".cyan());
    }

    let records = seeds
        .iter()
        .map(|&seed| run_autoplay(catalog, config, seed, args.strategy, args.turns))
        .collect::<Result<Vec<AutoplayRecord>>>()?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, &records)?,
        ReportFormat::Console => logic::reports::generate_console_report(
            &mut output_target,
            &records,
            start_time.elapsed(),
        )?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
