//! SMØR - Main Binary
//!
//! Plays a night out in the terminal: humans answer prompts on stdin, the
//! rest of the table is filled with random AI players.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use smor_engine::game::{
    GameConfig, GameLoop, InteractiveController, OutputFormat, PlayerController,
    RandomController, VerbosityLevel,
};
use smor_engine::loader::{Catalog, GameInitializer, PlayerIdentity};
use std::path::{Path, PathBuf};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "smor")]
#[command(about = "SMØR - Vors, Fest og Nach", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a full night
    Play {
        /// Directory with cards.json, places.json and npcs.json
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Total number of players
        #[arg(long, default_value_t = 4)]
        players: usize,

        /// How many of the players are humans (seated first)
        #[arg(long, default_value_t = 1)]
        humans: usize,

        /// Name for a human player (repeat for each human)
        #[arg(long = "name", value_name = "NAME")]
        names: Vec<String>,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Enable the leader jersey and the pill
        #[arg(long)]
        standings_bonuses: bool,
    },

    /// Load and validate the catalogs without playing
    CheckData {
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            data_dir,
            players,
            humans,
            names,
            seed,
            verbosity,
            json,
            standings_bonuses,
        } => run_play(
            &data_dir,
            players,
            humans,
            names,
            seed,
            verbosity.into(),
            json,
            standings_bonuses,
        ),
        Commands::CheckData { data_dir } => run_check_data(&data_dir),
    }
}

fn load_catalog(data_dir: &Path) -> anyhow::Result<Catalog> {
    Catalog::load_from_dir(data_dir)
        .with_context(|| format!("loading catalogs from {}", data_dir.display()))
}

/// Humans first (named from `--name`, or "Spiller n"), then AI_1, AI_2, ...
fn seat_players(players: usize, humans: usize, names: &[String]) -> Vec<PlayerIdentity> {
    (0..players)
        .map(|idx| {
            if idx < humans {
                let name = names
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("Spiller {}", idx + 1));
                PlayerIdentity::human(name)
            } else {
                PlayerIdentity::ai(format!("AI_{}", idx + 1 - humans))
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)] // CLI parameters naturally map to function args
fn run_play(
    data_dir: &Path,
    players: usize,
    humans: usize,
    names: Vec<String>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    json: bool,
    standings_bonuses: bool,
) -> anyhow::Result<()> {
    if players == 0 {
        bail!("--players must be at least 1");
    }
    if humans > players {
        bail!("--humans ({humans}) cannot exceed --players ({players})");
    }

    let catalog = load_catalog(data_dir)?;
    let seed = seed.unwrap_or_else(rand::random);
    let config = GameConfig::default().with_standings_bonuses(standings_bonuses);
    let identities = seat_players(players, humans, &names);

    let mut game = GameInitializer::new(catalog)
        .with_config(config)
        .init_game(&identities, seed)?;
    if json {
        game.logger.set_output_format(OutputFormat::Json);
    } else {
        println!("=== SMØR ===");
        println!("Seed: {seed}\n");
    }

    let controllers: Vec<Box<dyn PlayerController>> = game
        .players
        .iter()
        .map(|p| -> Box<dyn PlayerController> {
            if p.is_human {
                Box::new(InteractiveController::new(p.id))
            } else {
                Box::new(RandomController::with_seed(
                    p.id,
                    seed.wrapping_add(p.id.as_u32() as u64),
                ))
            }
        })
        .collect();

    let result = GameLoop::new(&mut game, controllers)
        .with_verbosity(verbosity)
        .run_game()?;

    if !json && verbosity > VerbosityLevel::Silent {
        println!("\n=== Resultat ===");
        for standing in &result.standings {
            println!(
                "  {:<12} {:>4.1} promille  {:>3} minner",
                standing.player, standing.intoxication, standing.memory
            );
        }
        match result.winner {
            Some(id) => println!("\nVinner: {}", game.player_name(id)),
            None => println!("\nIngen vinner"),
        }
    }
    Ok(())
}

fn run_check_data(data_dir: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(data_dir)?;
    println!(
        "OK: {} cards, {} places, {} NPCs",
        catalog.cards.len(),
        catalog.places.len(),
        catalog.npcs.len()
    );
    Ok(())
}
