use river_crossing_solver::engine::{Game, Move, MoveOutcome, Passenger, PlayError, Puzzle};
use river_crossing_solver::utils::passenger_from_str;
use std::io::{self, Write};

/// Maps player input to a crossing: `f`/`0` for the farmer alone, `1`-`3` or a
/// passenger name/initial for the farmer with that passenger.
fn parse_move(input: &str) -> Option<Move> {
    match input {
        "f" | "farmer" | "0" => Some(Move::Alone),
        _ => match input.parse::<usize>() {
            Ok(index) => Passenger::ALL.get(index.checked_sub(1)?).map(|&p| Move::With(p)),
            Err(_) => passenger_from_str(input).ok().map(Move::With),
        },
    }
}

/// Writes `text` without a trailing newline and flushes so it shows before input.
fn prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

fn main() {
    env_logger::init();
    let mut game = Game::new(Puzzle::canonical());
    println!("Welcome to the River Crossing!");
    println!("Get the farmer, wolf, sheep and cabbage across. The boat carries the farmer");
    println!("and at most one passenger; never leave the wolf with the sheep, or the sheep");
    println!("with the cabbage, without the farmer.");

    loop {
        println!("---------------------");
        println!("Steps: {}", game.steps());
        println!("{}", game.state());

        if let Err(e) = prompt(
            &mut io::stdout(),
            "Cross with (f)armer alone, (w)olf, (s)heep, (c)abbage; 'u' to undo, 'r' to reset, 'q' to quit: ",
        ) {
            eprintln!("Error writing prompt: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let trimmed_input = input.trim().to_ascii_lowercase();

        match trimmed_input.as_str() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo_last_move() {
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (already at the starting bank).");
                }
                continue;
            }
            "r" => {
                game.reset();
                println!("Puzzle reset.");
                continue;
            }
            _ => {}
        }

        let Some(mv) = parse_move(&trimmed_input) else {
            println!("Invalid input: use f, w, s, c (or 0-3), 'u', 'r' or 'q'.");
            continue;
        };

        match game.play(mv) {
            Ok(MoveOutcome::Moved(_)) => println!("The {}.", mv),
            Ok(MoveOutcome::Solved(state)) => {
                println!("{}", state);
                println!("---------------------");
                println!("🎉 PUZZLE SOLVED! 🎉");
                println!("Total Steps: {}", game.steps());
                println!("---------------------");
                break;
            }
            Err(PlayError::NotWithFarmer { passenger }) => {
                println!("Invalid move: the {} is not on the farmer's bank.", passenger);
            }
            Err(err @ PlayError::UnsafeCrossing { state, .. }) => {
                println!("{}", state);
                println!("💀 Game Over! {}.", err);
                println!("Starting again from the first bank.");
            }
        }
    }
}
