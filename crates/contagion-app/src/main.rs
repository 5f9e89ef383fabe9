use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use contagion_app::game_loop::spawn_game_loop;
use contagion_app::state::LoopCommand;
use contagion_core::commands::SimCommand;
use contagion_core::config::SimConfig;
use contagion_core::constants::DEFAULT_TICK_INTERVAL_MS;
use contagion_core::enums::VirusKind;
use contagion_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(
    name = "contagion",
    version,
    about = "Run a headless contagion session and report infection counts"
)]
struct Cli {
    /// JSON file with a `SimConfig`; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    #[arg(long)]
    population: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Strain minted by the initial infections.
    #[arg(long, value_enum)]
    virus: Option<VirusArg>,
    /// Ticks to run before shutting down.
    #[arg(long, default_value_t = 500)]
    ticks: u64,
    /// Delay between ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    interval_ms: u64,
    /// Entities to infect before starting.
    #[arg(long, default_value_t = 1)]
    infect: usize,
    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VirusArg {
    Alpha,
    Beta,
}

impl From<VirusArg> for VirusKind {
    fn from(arg: VirusArg) -> Self {
        match arg {
            VirusArg::Alpha => VirusKind::Alpha,
            VirusArg::Beta => VirusKind::Beta,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;
    let engine = SimulationEngine::new(config).context("invalid simulation config")?;
    info!(
        population = engine.population(),
        width = engine.bounds().width(),
        height = engine.bounds().height(),
        "engine ready"
    );

    let (shell, handle) = spawn_game_loop(engine, Duration::from_millis(cli.interval_ms))
        .context("failed to spawn loop thread")?;

    for _ in 0..cli.infect {
        shell.send(LoopCommand::Sim(SimCommand::InfectRandom));
    }
    shell.send(LoopCommand::Toggle);

    let mut last_report = Instant::now();
    while !handle.is_finished() {
        let Some(published) = shell.latest() else {
            std::thread::sleep(Duration::from_millis(1));
            continue;
        };
        let snapshot = &published.snapshot;
        if snapshot.time.tick >= cli.ticks {
            break;
        }
        if last_report.elapsed() >= Duration::from_millis(250) {
            info!(
                tick = snapshot.time.tick,
                infected = snapshot.infected_count,
                population = snapshot.population,
                "progress"
            );
            last_report = Instant::now();
        }
        std::thread::sleep(Duration::from_millis(1));
    }

    shell.send(LoopCommand::Shutdown);
    let engine = handle
        .join()
        .map_err(|_| anyhow!("loop thread panicked"))?;

    let snapshot = engine.snapshot();
    info!(
        tick = snapshot.time.tick,
        infected = snapshot.infected_count,
        population = snapshot.population,
        "session finished"
    );
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Defaults, then the optional JSON file, then command-line overrides.
fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SimConfig::from_json_str(&raw)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(width) = cli.width {
        config.world_width = width;
    }
    if let Some(height) = cli.height {
        config.world_height = height;
    }
    if let Some(population) = cli.population {
        config.population = population;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(virus) = cli.virus {
        config.active_virus = virus.into();
    }
    Ok(config)
}
