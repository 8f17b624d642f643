use crate::engine::{Passenger, Puzzle, Side, State};
use thiserror::Error;

/// Errors from parsing states and passenger names typed on the command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseStateError {
    #[error("Invalid state length. Expected 4 characters, found {0}")]
    WrongLength(usize),
    #[error("Unrecognized character '{found}' at position {position} (expected '0' or '1')")]
    BadCharacter { found: char, position: usize },
    #[error("Unknown passenger '{0}' (expected wolf, sheep or cabbage)")]
    UnknownPassenger(String),
    #[error("Invalid conflict '{0}'. Expected two passengers separated by a comma")]
    BadConflict(String),
}

/// Parses a state written as four `0`/`1` digits in the order farmer, wolf, sheep,
/// cabbage. `0` is the origin bank, `1` the destination bank.
///
/// # Returns
/// * `Ok(State)` if parsing is successful.
/// * `Err(ParseStateError)` if the input (after trimming) is not exactly four
///   characters long or contains anything other than `0` and `1`.
///
/// # Examples
/// ```
/// use river_crossing_solver::engine::{Side, State};
/// use river_crossing_solver::utils::state_from_str;
///
/// let state = state_from_str("1010").unwrap();
/// assert_eq!(state.farmer, Side::Destination);
/// assert_eq!(state.wolf, Side::Origin);
/// assert_eq!(state_from_str("0000").unwrap(), State::INITIAL);
///
/// assert!(state_from_str("10a0").is_err());
/// assert!(state_from_str("101").is_err());
/// ```
pub fn state_from_str(s: &str) -> Result<State, ParseStateError> {
    let s = s.trim();
    let count = s.chars().count();
    if count != 4 {
        return Err(ParseStateError::WrongLength(count));
    }

    let mut sides = [Side::Origin; 4];
    for (position, found) in s.chars().enumerate() {
        sides[position] = found
            .to_digit(2)
            .and_then(|digit| Side::from_bit(digit as u8))
            .ok_or(ParseStateError::BadCharacter { found, position })?;
    }
    Ok(State::new(sides[0], sides[1], sides[2], sides[3]))
}

/// Parses a passenger by name or initial, ignoring case.
pub fn passenger_from_str(s: &str) -> Result<Passenger, ParseStateError> {
    let wanted = s.trim().to_ascii_lowercase();
    Passenger::ALL
        .iter()
        .copied()
        .find(|p| p.name() == wanted || p.to_char().to_ascii_lowercase().to_string() == wanted)
        .ok_or_else(|| ParseStateError::UnknownPassenger(s.trim().to_string()))
}

/// Parses a pair such as `wolf,cabbage` into two passengers.
pub fn conflict_from_str(s: &str) -> Result<(Passenger, Passenger), ParseStateError> {
    match s.split_once(',') {
        Some((first, second)) => Ok((passenger_from_str(first)?, passenger_from_str(second)?)),
        None => Err(ParseStateError::BadConflict(s.to_string())),
    }
}

/// Builds a puzzle from optional command-line overrides of the canonical instance.
pub fn puzzle_from_args(
    goal: Option<&str>,
    forbid: &[String],
) -> Result<Puzzle, ParseStateError> {
    let mut puzzle = Puzzle::canonical();
    if let Some(goal) = goal {
        puzzle = puzzle.with_goal(state_from_str(goal)?);
    }
    for pair in forbid {
        let (first, second) = conflict_from_str(pair)?;
        puzzle = puzzle.with_conflict(first, second);
    }
    Ok(puzzle)
}

/// Joins a path as `0000 -> 1010 -> ...`.
pub fn format_path(path: &[State]) -> String {
    path.iter()
        .map(State::bits)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_str_valid() {
        let state = state_from_str(" 0101 ").unwrap();
        assert_eq!(state.farmer, Side::Origin);
        assert_eq!(state.wolf, Side::Destination);
        assert_eq!(state.sheep, Side::Origin);
        assert_eq!(state.cabbage, Side::Destination);
        assert_eq!(state.bits(), "0101");
    }

    #[test]
    fn test_state_from_str_invalid_char() {
        let result = state_from_str("01x1");
        assert_eq!(
            result,
            Err(ParseStateError::BadCharacter {
                found: 'x',
                position: 2
            })
        );
        assert!(state_from_str("0121")
            .unwrap_err()
            .to_string()
            .contains("Unrecognized character '2'"));
    }

    #[test]
    fn test_state_from_str_wrong_length() {
        assert_eq!(state_from_str("01011"), Err(ParseStateError::WrongLength(5)));
        assert_eq!(state_from_str(""), Err(ParseStateError::WrongLength(0)));
    }

    #[test]
    fn test_passenger_from_str() {
        assert_eq!(passenger_from_str("Wolf"), Ok(Passenger::Wolf));
        assert_eq!(passenger_from_str(" s "), Ok(Passenger::Sheep));
        assert_eq!(passenger_from_str("CABBAGE"), Ok(Passenger::Cabbage));
        assert_eq!(
            passenger_from_str("goat"),
            Err(ParseStateError::UnknownPassenger("goat".to_string()))
        );
    }

    #[test]
    fn test_conflict_from_str() {
        assert_eq!(
            conflict_from_str("wolf,cabbage"),
            Ok((Passenger::Wolf, Passenger::Cabbage))
        );
        assert!(matches!(
            conflict_from_str("wolf"),
            Err(ParseStateError::BadConflict(_))
        ));
    }

    #[test]
    fn test_puzzle_from_args() {
        let puzzle = puzzle_from_args(None, &[]).unwrap();
        assert_eq!(puzzle, Puzzle::canonical());

        let forbid = vec!["w,c".to_string()];
        let puzzle = puzzle_from_args(Some("0111"), &forbid).unwrap();
        assert_eq!(puzzle.goal(), state_from_str("0111").unwrap());
        assert_eq!(puzzle.conflicts().len(), 3);

        assert!(puzzle_from_args(Some("2222"), &[]).is_err());
    }

    #[test]
    fn test_format_path() {
        let path = [State::INITIAL, state_from_str("1010").unwrap()];
        assert_eq!(format_path(&path), "0000 -> 1010");
        assert_eq!(format_path(&[]), "");
    }
}
