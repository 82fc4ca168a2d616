/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Lockmaze.

Lockmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Lockmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Lockmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! Generate the maze for a given seed and save the seed:
//!
//! ```
//! $ lockmaze --seed 1234 --save maze.seed
//! Seed: 1234
//! Size: 17x19
//! ...
//! ```
//!
//! Load the maze again and let two bots solve it:
//!
//! ```
//! $ lockmaze --load maze.seed --players 2 --bots 2 --solve
//! ```
//!
//! Play three mazes in a row with wall-following bots, and keep these settings:
//!
//! ```
//! $ lockmaze --players 2 --algorithm right-hand-rule --solve --rounds 3 --save-settings lockmaze.json
//! ```

use clap::Parser;
use log::{debug, warn};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::thread;

use lockmaze::agent::BotAlgorithm;
use lockmaze::game::{Game, SessionSummary};
use lockmaze::generator::maze::{Maze, MazeDimensions, MazeOptions};
use lockmaze::generator::progress::GenerationProgress;
use lockmaze::generator::random::RandomSource;
use lockmaze::saver::seed::SaverSeed;
use lockmaze::saver::settings::SaverSettings;
use lockmaze::settings::Settings;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

// Default limit for the number of ticks in a --solve session.
const DEFAULT_MAX_TICKS: usize = 100_000;

/// Generate random mazes with locks and keys, and solve them with bots.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Maze seed. A random seed is used when not provided
    #[arg(short, long, conflicts_with = "load")]
    seed: Option<u64>,

    /// Number of columns, instead of the number derived from the seed
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Number of rows, instead of the number derived from the seed
    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    /// Load the maze seed from the given file
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Save the maze seed to the given file
    #[arg(long)]
    save: Option<PathBuf>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Save the resulting settings to the given JSON file
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Number of players, including the bots
    #[arg(short, long)]
    players: Option<usize>,

    /// Number of bots
    #[arg(short, long)]
    bots: Option<usize>,

    /// Exploration strategy of the bots
    #[arg(short, long, value_enum)]
    algorithm: Option<BotAlgorithm>,

    /// Minimum delay between two bot moves, in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Time budget for placing the locks, in milliseconds
    #[arg(long)]
    budget: Option<u64>,

    /// Always place a hazard
    #[arg(long, default_value_t = false)]
    hazard: bool,

    /// Mark the cells the players walk through
    #[arg(long, default_value_t = false)]
    trails: bool,

    /// Let the bots solve the maze. Every player is a bot when no bot is configured
    #[arg(long, default_value_t = false)]
    solve: bool,

    /// Maximum number of ticks for --solve
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: usize,

    /// Number of mazes to play in a row with --solve. Each maze uses the next seed
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    rounds: u64,

    /// Print the maze as JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

// Messages sent by the generation thread.
enum GeneratorMessage {
    Progress(GenerationProgress),
    Done(Box<Maze>),
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let settings: Settings = match load_settings(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read the settings: {e}");
            return 1;
        }
    };

    if let Some(path) = &args.save_settings {
        let saver: SaverSettings = SaverSettings::new(path.clone());
        if let Err(e) = saver.save_settings(&settings) {
            eprintln!("Error: {path:?}: {e}");
            return 1;
        }
        debug!("Settings written to {:?}", saver.path());
    }

    let seed: u64 = match &args.load {
        Some(path) => match SaverSeed::new(path.clone()).get_seed() {
            Ok(Some(seed)) => seed,
            Ok(None) => {
                eprintln!("Error: {path:?}: no such file");
                return 1;
            }
            Err(e) => {
                eprintln!("Error: {path:?}: {e}");
                return 1;
            }
        },
        None => args.seed.unwrap_or_else(RandomSource::random_seed),
    };

    let dimensions: Option<MazeDimensions> = match (args.cols, args.rows) {
        (Some(0), _) | (_, Some(0)) => {
            eprintln!("Error: the maze dimensions must be positive");
            return 1;
        }
        (Some(cols), Some(rows)) => Some(MazeDimensions { cols, rows }),
        _ => None,
    };

    let maze: Maze = match generate_in_background(seed, settings.maze_options(dimensions)) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&maze.snapshot()) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: cannot serialize the maze: {e}");
                return 1;
            }
        }
    } else {
        print_maze(&maze);
    }

    if let Some(path) = &args.save {
        if dimensions.is_some() {
            warn!("Only the seed is saved: the --cols and --rows options are not");
        }
        if let Err(e) = SaverSeed::new(path.clone()).save_seed(seed) {
            eprintln!("Error: {path:?}: {e}");
            return 1;
        }
    }

    if args.solve {
        let mut game_settings: Settings = settings.clone();
        if game_settings.num_bots == 0 {
            game_settings.num_bots = game_settings.num_players;
        }
        let mut game: Game = Game::new(maze, &game_settings);
        let mut all_at_goal: bool = true;

        for round in 0..args.rounds {
            if round > 0 {
                let next_seed: u64 = seed.wrapping_add(round);
                match generate_in_background(next_seed, game_settings.maze_options(dimensions)) {
                    Ok(m) => game.next_maze(m),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return 1;
                    }
                }
            }
            let summary: SessionSummary = game.run_bots(args.max_ticks);
            all_at_goal &= summary.bots_at_goal;

            if args.json {
                match serde_json::to_string_pretty(&summary) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("Error: cannot serialize the session summary: {e}");
                        return 1;
                    }
                }
            } else {
                if args.rounds > 1 {
                    println!("Round {} (seed {})", round + 1, game.world.maze().seed());
                }
                print_summary(&summary);
            }
        }
        if !all_at_goal {
            return 2;
        }
    }
    0
}

// Read the settings file, if any, and apply the command-line overrides.
fn load_settings(args: &Args) -> Result<Settings, Box<dyn Error>> {
    let mut settings: Settings = match &args.settings {
        Some(path) => match SaverSettings::new(path.clone()).get_settings()? {
            Some(s) => s,
            None => {
                warn!("Settings file {path:?} does not exist, using the default settings");
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    if let Some(p) = args.players {
        settings.num_players = p;
    }
    if let Some(b) = args.bots {
        settings.num_bots = b;
    }
    if let Some(a) = args.algorithm {
        settings.bot_algorithm = a;
    }
    if let Some(d) = args.delay {
        settings.bot_movement_delay_ms = d;
    }
    if let Some(b) = args.budget {
        settings.lock_time_budget_ms = b;
    }
    if args.hazard {
        settings.always_place_hazard = true;
    }
    if args.trails {
        settings.mark_trails = true;
    }
    settings.normalize();
    debug!("Settings: {settings:?}");
    Ok(settings)
}

// Generate the maze in a separate thread and wait for it, logging the progress events.
fn generate_in_background(seed: u64, options: MazeOptions) -> Result<Maze, Box<dyn Error>> {
    let (sender, receiver) = async_channel::bounded::<GeneratorMessage>(16);

    let worker = thread::spawn(move || {
        let maze: Maze = Maze::generate(seed, &options, &mut |p| {
            // The progress events are informative only: drop them when the channel is full
            let _ = sender.try_send(GeneratorMessage::Progress(p));
        });
        sender
            .send_blocking(GeneratorMessage::Done(Box::new(maze)))
            .map_err(|_| "The maze receiver is gone")
    });

    let mut result: Option<Maze> = None;
    while let Ok(message) = receiver.recv_blocking() {
        match message {
            GeneratorMessage::Progress(p) => debug!("Progress: {p:?}"),
            GeneratorMessage::Done(maze) => {
                result = Some(*maze);
                break;
            }
        }
    }

    match worker.join() {
        Ok(Ok(())) => (),
        Ok(Err(e)) => return Err(e.into()),
        Err(_) => return Err("The maze generation failed".into()),
    }
    result.ok_or_else(|| "The maze generation did not return a maze".into())
}

fn print_maze(maze: &Maze) {
    println!("Seed: {}", maze.seed());
    println!("Size: {}x{}", maze.cols(), maze.rows());
    println!("Goal: {}", maze.goal());
    println!("Start: {}", maze.start(0));
    println!(
        "Locks: {} (wanted {})",
        maze.num_locks(),
        maze.num_locks_desired()
    );
    for c in maze.collectibles() {
        println!("  {c}");
    }
    println!("Dead ends: {}", maze.dead_ends().len());
    print!("{}", maze.grid().to_ascii());
}

fn print_summary(summary: &SessionSummary) {
    println!("Ticks: {}", summary.ticks);
    println!("Keys found: {}/{}", summary.keys_found, summary.num_locks);
    println!("Winners: {:?}", summary.winners);
    println!("Bot moves: {:?}", summary.bot_moves);
    println!("Scores: {:?}", summary.scores);
    println!("Total scores: {:?}", summary.score_totals);
    if !summary.bots_at_goal {
        println!("Some bots did not reach the goal");
    }
}
