//! # Manorfall Main Entry Point
//!
//! Loads a configuration, seeds a game, and runs a scripted exploration
//! that climbs toward the antechamber, printing each turn. Serves as a
//! smoke-test harness and as a reference for driving the controller.

use clap::Parser;
use log::info;
use manorfall::{Direction, GameConfig, GamePhase, GameState, ManorResult};

/// Command line arguments for the Manorfall demo runner.
#[derive(Parser, Debug)]
#[command(name = "manorfall")]
#[command(about = "A roguelike manor-exploration core")]
#[command(version)]
struct Args {
    /// Random seed for manor generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to a JSON game configuration
    #[arg(short, long)]
    config: Option<String>,

    /// Maximum number of turns before the runner gives up
    #[arg(long, default_value_t = 500)]
    max_turns: u32,
}

fn main() -> ManorResult<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Manorfall v{}", manorfall::VERSION);

    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("seed: {seed}");

    let mut game = GameState::new(&config, seed)?;
    run_scripted_climb(&mut game, args.max_turns)?;

    let inv = game.inventory();
    println!(
        "final inventory: {} steps, {} gold, {} gems, {} keys, {} dice",
        inv.steps, inv.gold, inv.gems, inv.keys, inv.dice
    );
    if game.reached_exit() {
        println!("reached the antechamber!");
    } else {
        println!("the run ended at {}", game.player_position());
    }
    Ok(())
}

/// Greedy policy: loot the current room, then push upward, sidestepping when
/// the way up is blocked. Picks the cheapest affordable room from each draw.
fn run_scripted_climb(game: &mut GameState, max_turns: u32) -> ManorResult<()> {
    let mut sidestep = Direction::Left;

    for turn in 0..max_turns {
        if game.reached_exit() {
            println!("turn {turn}: standing in the antechamber");
            return Ok(());
        }
        match game.phase() {
            GamePhase::LostBlocked => {
                println!("turn {turn}: no room can be drawn, the manor wins");
                return Ok(());
            }
            GamePhase::DrawingRoom => {
                let Some(index) = cheapest_affordable(game) else {
                    println!("turn {turn}: cannot afford any drawn room");
                    return Ok(());
                };
                let name = game
                    .pending_draw()
                    .map(|p| p.choices[index].name())
                    .unwrap_or("?");
                if !game.select_and_place_room(index) {
                    // Affordable in gems but not in steps.
                    println!("turn {turn}: too exhausted to place a room");
                    return Ok(());
                }
                println!("turn {turn}: placed {name} at {}", game.player_position());
            }
            GamePhase::Playing => {
                // Loot until the room is empty or the front object resists
                // (a vendor, or a container we lack the means to open).
                loop {
                    let before = game.current_room().map(|r| r.contents.len()).unwrap_or(0);
                    let Some(message) = game.pick_up_here() else {
                        break;
                    };
                    println!("turn {turn}: {message}");
                    let after = game.current_room().map(|r| r.contents.len()).unwrap_or(0);
                    if after >= before {
                        break;
                    }
                }
                if game.inventory().steps == 0 {
                    println!("turn {turn}: out of steps");
                    return Ok(());
                }
                if game.move_player(Direction::Up) || game.open_or_place(Direction::Up) {
                    continue;
                }
                // Blocked upward; sidestep (alternating sides) or back off.
                sidestep = sidestep.opposite();
                let moved = [sidestep, sidestep.opposite(), Direction::Down]
                    .into_iter()
                    .any(|dir| game.move_player(dir) || game.open_or_place(dir));
                if !moved {
                    println!("turn {turn}: wedged at {}", game.player_position());
                    return Ok(());
                }
            }
        }
    }
    println!("gave up after {max_turns} turns");
    Ok(())
}

fn cheapest_affordable(game: &GameState) -> Option<usize> {
    let pending = game.pending_draw()?;
    let gems = game.inventory().gems;
    pending
        .choices
        .iter()
        .enumerate()
        .filter(|(_, kind)| kind.gem_cost() <= gems)
        .min_by_key(|(_, kind)| kind.gem_cost())
        .map(|(index, _)| index)
}
