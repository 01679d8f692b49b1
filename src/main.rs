//! Torus Automata - headless runner
//!
//! Builds a session from a config file and flags, runs it until it stalls or
//! the generation limit is reached, and prints how it ended.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use torus_automata::codec::glyphs;
use torus_automata::core::error::{AutomatonError, Result};
use torus_automata::grid::CellContent;
use torus_automata::simulation::runner;
use torus_automata::{Automaton, AutomatonConfig, Direction, Mode};

/// Headless runner for the seven automaton rule-sets
#[derive(Parser, Debug)]
#[command(name = "torus-automata")]
#[command(about = "Run a toroidal cellular automaton and report how the session ended")]
struct Args {
    /// TOML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule-set: life, snake, predator, noise, erosion, fluids, gases
    #[arg(long)]
    mode: Option<Mode>,

    /// Interior columns
    #[arg(long)]
    width: Option<i32>,

    /// Interior rows
    #[arg(long)]
    height: Option<i32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum generations before the run is called finished
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Fraction of cells set alive at start (binary modes)
    #[arg(long)]
    density: Option<f64>,

    /// Predators placed at random (predator mode)
    #[arg(long, default_value_t = 0)]
    predators: usize,

    /// Prey placed at random (predator mode)
    #[arg(long, default_value_t = 0)]
    prey: usize,

    /// Food placed at random (predator mode)
    #[arg(long, default_value_t = 0)]
    food: usize,

    /// Initial lifetime of predators and prey
    #[arg(long)]
    lifetime: Option<i32>,

    /// Snake direction codes, one per generation (2 down, 4 left, 6 right, 8 up)
    #[arg(long)]
    steer: Option<String>,

    /// Glyph file with the initial value grid
    #[arg(long)]
    input: Option<PathBuf>,

    /// Glyph file with the initial lifetime grid (predator mode)
    #[arg(long)]
    lifetimes: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the final grid
    #[arg(long)]
    print_grid: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("torus_automata=info")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let steering = parse_steering(args.steer.as_deref().unwrap_or(""))?;

    let mut automaton = Automaton::new(config)?;
    prepare_board(&mut automaton, &args)?;

    let summary = runner::run_with(&mut automaton, Some(args.generations), |a, generation| {
        if let Some(&dir) = steering.get(generation as usize) {
            a.set_intended_direction(dir);
        }
    });

    match args.format.as_str() {
        "json" => println!("{}", summary.to_json()),
        _ => println!("{}", summary.summary()),
    }

    if args.print_grid {
        print!("{}", glyphs::encode_values(automaton.grid(), automaton.mode())?);
        if automaton.mode() == Mode::PredatorPrey {
            println!();
            print!("{}", glyphs::encode_lifetimes(automaton.grid())?);
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<AutomatonConfig> {
    let mut config = match &args.config {
        Some(path) => AutomatonConfig::load(path)?,
        None => AutomatonConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(lifetime) = args.lifetime {
        config.predator_lifetime = lifetime;
    }

    config.validate()?;
    Ok(config)
}

fn parse_steering(codes: &str) -> Result<Vec<Direction>> {
    codes
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| Direction::from_code(d as i32))
                .ok_or_else(|| {
                    AutomatonError::InvalidConfig(format!("'{}' is not a direction code", c))
                })
        })
        .collect()
}

fn prepare_board(automaton: &mut Automaton, args: &Args) -> Result<()> {
    if let Some(path) = &args.input {
        let values = fs::read_to_string(path)?;
        let lifetimes = args.lifetimes.as_ref().map(fs::read_to_string).transpose()?;
        automaton.load_glyphs(&values, lifetimes.as_deref())?;
    }

    if let Some(density) = args.density {
        let alive = automaton.fill_random(density)?;
        tracing::info!("Random fill: {} live cells", alive);
    }

    if automaton.mode() == Mode::PredatorPrey {
        automaton.scatter(CellContent::Predator { lifetime: 0 }, args.predators)?;
        automaton.scatter(CellContent::Prey { lifetime: 0 }, args.prey)?;
        automaton.scatter(CellContent::Food, args.food)?;
    }

    Ok(())
}
