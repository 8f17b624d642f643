//! Estimates used to order the heuristic best-first search.
use crate::engine::{Side, State};

/// Counts the entities (farmer included) still on the origin bank.
///
/// The count is a loose estimate of the work left. It is not admissible in the
/// strict sense: with the farmer and the sheep on the origin bank and everybody else
/// across (`0101`), it reports `2` while a single crossing finishes the puzzle. It
/// only biases which state the best-first search expands next.
///
/// # Examples
///
/// ```
/// use river_crossing_solver::engine::State;
/// use river_crossing_solver::heuristics::origin_count;
/// assert_eq!(origin_count(&State::INITIAL), 4);
/// assert_eq!(origin_count(&State::GOAL), 0);
/// ```
pub fn origin_count(state: &State) -> u32 {
    state
        .sides()
        .iter()
        .filter(|&&side| side == Side::Origin)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Puzzle;
    use crate::utils::state_from_str;

    #[test]
    fn test_origin_count_counts_every_field() {
        assert_eq!(origin_count(&state_from_str("1010").unwrap()), 2);
        assert_eq!(origin_count(&state_from_str("0111").unwrap()), 1);
        assert_eq!(origin_count(&state_from_str("1000").unwrap()), 3);
    }

    #[test]
    fn test_origin_count_can_overestimate() {
        let puzzle = Puzzle::canonical();
        let state = state_from_str("0101").unwrap();
        assert!(puzzle.successors(&state).contains(&puzzle.goal()));
        assert_eq!(puzzle.heuristic(&state), 2);
    }

    #[test]
    fn test_origin_count_zero_only_at_goal() {
        let puzzle = Puzzle::canonical();
        for n in 0..16u8 {
            let state = state_from_str(&format!("{:04b}", n)).unwrap();
            let count = puzzle.heuristic(&state);
            assert_eq!(count, 4 - n.count_ones(), "{}", state.bits());
            assert_eq!(count == 0, state == puzzle.goal(), "{}", state.bits());
        }
    }
}
