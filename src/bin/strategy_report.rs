use clap::Parser;
use river_crossing_solver::solver::{solve, Strategy};
use river_crossing_solver::utils::{format_path, puzzle_from_args};
use std::process;

/// Runs every search strategy on the same puzzle and compares the results.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Goal state as four 0/1 digits in the order farmer, wolf, sheep, cabbage
    #[clap(short, long)]
    goal: Option<String>,

    /// Extra pair that may not be left alone, e.g. `wolf,cabbage` (repeatable)
    #[clap(short, long)]
    forbid: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let puzzle = puzzle_from_args(args.goal.as_deref(), &args.forbid).unwrap_or_else(|e| {
        eprintln!("Invalid puzzle: {}", e);
        process::exit(1);
    });

    println!(
        "Comparing {} strategies from {} to {}\n",
        Strategy::ALL.len(),
        puzzle.initial().bits(),
        puzzle.goal().bits()
    );
    println!("{:<22} {:>6} {:>9}  Path", "Strategy", "Moves", "Expanded");

    let mut results: Vec<(Strategy, usize)> = Vec::new();
    for strategy in Strategy::ALL {
        match solve(&puzzle, strategy) {
            Some(solution) => {
                println!(
                    "{:<22} {:>6} {:>9}  {}",
                    strategy.name(),
                    solution.moves(),
                    solution.expanded,
                    format_path(&solution.path)
                );
                results.push((strategy, solution.moves()));
            }
            None => println!("{:<22} {:>6} {:>9}  no solution", strategy.name(), "-", "-"),
        }
    }

    println!("\n--- Summary ---");
    match results.iter().map(|&(_, moves)| moves).min() {
        Some(shortest) => {
            let best: Vec<&str> = results
                .iter()
                .filter(|&&(_, moves)| moves == shortest)
                .map(|(strategy, _)| strategy.name())
                .collect();
            println!("Shortest path: {} moves ({})", shortest, best.join(", "));
        }
        None => println!("No strategy found a solution."),
    }
}
