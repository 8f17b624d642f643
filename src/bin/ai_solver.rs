use clap::Parser;
use river_crossing_solver::engine::State;
use river_crossing_solver::playback::{Frame, Playback, PlaybackEnd, DEFAULT_DELAY_MS};
use river_crossing_solver::solver::{solve, Strategy};
use river_crossing_solver::utils::{format_path, puzzle_from_args};
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy (breadth-first, depth-first, uniform-cost, iterative-deepening, heuristic-best-first)
    #[clap(short, long, value_enum, default_value = "breadth-first")]
    strategy: Strategy,

    /// Goal state as four 0/1 digits in the order farmer, wolf, sheep, cabbage
    #[clap(short, long)]
    goal: Option<String>,

    /// Extra pair that may not be left alone, e.g. `wolf,cabbage` (repeatable)
    #[clap(short, long)]
    forbid: Vec<String>,

    /// Step through the path on screen instead of printing it at once
    #[clap(short, long)]
    animate: bool,

    /// Delay between animation steps in milliseconds (clamped to 200..=1500)
    #[clap(short, long, default_value_t = DEFAULT_DELAY_MS)]
    delay: u64,

    /// Stop the animation after this many steps
    #[clap(short, long)]
    max_steps: Option<usize>,
}

/// Plays `path` back, stopping once `max_steps` frames have been rendered.
fn animate(
    path: Vec<State>,
    delay: u64,
    max_steps: Option<usize>,
    mut render: impl FnMut(&Frame),
) -> PlaybackEnd {
    let playback = Playback::new(path, delay);
    let handle = playback.stop_handle();
    playback.run(|frame| {
        render(frame);
        if max_steps.map_or(false, |max| frame.index + 1 >= max) {
            handle.stop();
        }
    })
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let puzzle = puzzle_from_args(args.goal.as_deref(), &args.forbid).unwrap_or_else(|e| {
        eprintln!("Invalid puzzle: {}", e);
        process::exit(1);
    });

    println!("Initial state: {}", puzzle.initial());
    println!("Goal state:    {}\n", puzzle.goal());
    println!("Searching with {}...\n", args.strategy);

    let Some(solution) = solve(&puzzle, args.strategy) else {
        println!("{} found no solution.", args.strategy);
        return;
    };

    println!("Solution found:\n");
    println!("Moves ({}):", solution.moves());
    if solution.moves() == 0 {
        println!("  No moves made.");
    }
    for (i, pair) in solution.path.windows(2).enumerate() {
        if let Some(mv) = puzzle.move_between(&pair[0], &pair[1]) {
            println!("  Move {}: {} ({})", i + 1, mv, pair[1].bits());
        }
    }
    println!("States expanded: {}", solution.expanded);
    println!("Path: {}\n", format_path(&solution.path));

    if args.animate {
        let end = animate(solution.path, args.delay, args.max_steps, |frame| {
            println!("{}: Step {}/{}  {}", args.strategy, frame.index, frame.last, frame.state);
        });
        match end {
            PlaybackEnd::Finished => println!("\n{} finished!", args.strategy),
            PlaybackEnd::Stopped { rendered } => {
                println!("\nPlayback stopped after {} steps.", rendered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use river_crossing_solver::engine::Puzzle;
    use river_crossing_solver::playback::MIN_DELAY_MS;

    fn solved_path() -> Vec<State> {
        solve(&Puzzle::canonical(), Strategy::BreadthFirst)
            .unwrap()
            .path
    }

    #[test]
    fn test_animate_stops_at_max_steps() {
        let mut rendered = Vec::new();
        let end = animate(solved_path(), MIN_DELAY_MS, Some(3), |frame| {
            rendered.push(frame.index)
        });
        assert_eq!(rendered, vec![0, 1, 2]);
        assert_eq!(end, PlaybackEnd::Stopped { rendered: 3 });
    }

    #[test]
    fn test_animate_without_limit_finishes() {
        let path = solved_path();
        let mut rendered = 0;
        let end = animate(path.clone(), MIN_DELAY_MS, None, |_| rendered += 1);
        assert_eq!(rendered, path.len());
        assert_eq!(end, PlaybackEnd::Finished);
    }

    #[test]
    fn test_animate_limit_past_end_finishes() {
        let path = solved_path();
        let end = animate(path.clone(), MIN_DELAY_MS, Some(path.len()), |_| {});
        assert_eq!(end, PlaybackEnd::Finished);
    }
}
