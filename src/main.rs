//! Strictly Hanoi - terminal driver
//!
//! Line-oriented front end over [`HanoiController`].

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use strictly_hanoi::{
    BestScoreStore, Clock, HanoiController, JsonFileBestScoreStore, PegId, ScoringConfig,
    TurnReport, solve,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_file(path)
            .with_context(|| format!("Invalid scoring config {}", path.display()))?,
        None => ScoringConfig::default(),
    };
    let store = JsonFileBestScoreStore::new(cli.best_file.clone());

    match cli.command {
        Command::Play { disks } => run_play(disks, config, store),
        Command::Solve { disks } => run_solve(disks, config, store),
        Command::Best => {
            println!("Best score: {}", store.get_best());
            Ok(())
        }
    }
}

/// Run the interactive game loop on stdin
#[instrument(skip(config, store))]
fn run_play(disks: u8, config: ScoringConfig, store: JsonFileBestScoreStore) -> Result<()> {
    let mut controller = HanoiController::new(disks, config, store)?;
    info!("Starting interactive game");

    print_help();
    print_board(&controller);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        debug!(?words, "Input");

        match words.as_slice() {
            [] => continue,
            ["q" | "quit"] => break,
            ["?" | "help"] => print_help(),
            ["h" | "hint"] => {
                let hint = controller.hint();
                println!("Hint: {}", hint.message());
            }
            ["r" | "reset"] => controller.reset(),
            ["n" | "new", n] => match n.parse::<u8>() {
                Ok(n) => {
                    if let Err(e) = controller.new_game(n) {
                        println!("{}", e.kind);
                    }
                }
                Err(_) => println!("Disk count must be a number"),
            },
            ["s" | "select", peg] => match peg.parse::<usize>() {
                Ok(peg) => report(&controller.select_peg(peg)),
                Err(_) => println!("Peg must be 0, 1 or 2"),
            },
            [from, to] => match (from.parse::<usize>(), to.parse::<usize>()) {
                (Ok(from), Ok(to)) => report(&controller.move_disk(from, to)),
                _ => println!("Pegs must be 0, 1 or 2"),
            },
            _ => println!("Unknown command; type ? for help"),
        }

        print_board(&controller);
    }

    Ok(())
}

/// Play the optimal solution through the controller
#[instrument(skip(config, store))]
fn run_solve(disks: u8, config: ScoringConfig, store: JsonFileBestScoreStore) -> Result<()> {
    let mut controller = HanoiController::new(disks, config, store)?;
    let count = controller.game().disk_count();

    for (from, to) in solve(count, PegId::Source, PegId::Destination) {
        let turn = controller.move_disk(from.index(), to.index());
        println!("{} -> {}", from, to);
        report(&turn);
    }
    print_board(&controller);
    Ok(())
}

fn report(turn: &TurnReport) {
    if let Some(refusal) = &turn.refusal {
        println!("Invalid move: {}", refusal);
    }
    if let Some(achievement) = turn.outcome.achievement {
        println!("Achievement: {}!", achievement);
    }
    if let Some(results) = &turn.results {
        println!(
            "Solved! Score {} | efficiency {}% | perfect solution: {} | perfect game: {}",
            results.score(),
            results.efficiency_percent(),
            results.is_perfect_solution(),
            results.is_perfect_game()
        );
        if turn.new_best {
            println!("New best score!");
        }
    }
}

fn print_board<S: BestScoreStore, C: Clock>(controller: &HanoiController<S, C>) {
    let snapshot = controller.snapshot();
    println!("{}", snapshot.pegs().display());
    let selected = snapshot
        .selection()
        .map(|s| format!(" | holding disk {} from {}", s.disk, s.peg))
        .unwrap_or_default();
    println!(
        "moves {}/{} | score {} | best {} | {}s{}",
        snapshot.move_count(),
        snapshot.minimum_moves(),
        controller.live_score(),
        controller.best_score(),
        snapshot.elapsed_seconds(),
        selected
    );
}

fn print_help() {
    println!("Commands:");
    println!("  <from> <to>   move the top disk (pegs 0, 1, 2)");
    println!("  s <peg>       select a peg, then select another to move");
    println!("  h             hint (costs points)");
    println!("  r             restart");
    println!("  n <disks>     new game with 3-8 disks");
    println!("  q             quit");
}
