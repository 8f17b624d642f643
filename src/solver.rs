//! Search strategies over a [`Puzzle`].
//!
//! Every strategy starts from the puzzle's initial state, explores with
//! `Puzzle::successors` and returns `Some(Solution)` holding the path from the
//! initial state to the goal, or `None` when its frontier runs dry (or, for
//! iterative deepening, when `MAX_DEPTH` is exceeded). Each call owns its frontier,
//! so calls are independent and repeatable.
use crate::engine::{Puzzle, State};
use clap::ValueEnum;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest depth limit iterative deepening tries before giving up.
pub const MAX_DEPTH: usize = 25;

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// FIFO frontier; returns a path with the fewest moves.
    #[value(alias = "bfs")]
    BreadthFirst,
    /// LIFO frontier; returns the first path found, not necessarily the shortest.
    #[value(alias = "dfs")]
    DepthFirst,
    /// Frontier ordered by path cost; returns a cheapest path.
    #[value(alias = "ucs")]
    UniformCost,
    /// Depth-limited searches with growing limits, up to `MAX_DEPTH`.
    #[value(alias = "ids")]
    IterativeDeepening,
    /// Frontier ordered by path cost plus `Puzzle::heuristic`.
    #[value(alias = "astar")]
    HeuristicBestFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::UniformCost,
        Strategy::IterativeDeepening,
        Strategy::HeuristicBestFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst => "depth-first",
            Strategy::UniformCost => "uniform-cost",
            Strategy::IterativeDeepening => "iterative-deepening",
            Strategy::HeuristicBestFirst => "heuristic-best-first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy '{0}' (expected breadth-first, depth-first, uniform-cost, iterative-deepening or heuristic-best-first)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Accepts the strategy names and their short aliases, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Strategy as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| UnknownStrategy(s.to_string()))
    }
}

/// Represents a path found by one of the strategies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// The strategy that produced this path.
    pub strategy: Strategy,
    /// States from the initial state to the goal, one crossing apart.
    pub path: Vec<State>,
    /// Number of states taken off the frontier before the goal was reached.
    pub expanded: usize,
}

impl Solution {
    /// Number of crossings on the path.
    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Runs the given strategy on `puzzle`.
///
/// # Returns
/// * `Some(Solution)` with a path from `puzzle.initial()` to `puzzle.goal()`.
/// * `None` if the strategy could not reach the goal.
///
/// # Examples
/// ```
/// use river_crossing_solver::engine::Puzzle;
/// use river_crossing_solver::solver::{solve, Strategy};
///
/// let solution = solve(&Puzzle::canonical(), Strategy::BreadthFirst).unwrap();
/// assert_eq!(solution.moves(), 7);
/// ```
pub fn solve(puzzle: &Puzzle, strategy: Strategy) -> Option<Solution> {
    debug!(
        "Running {} search from {} to {}",
        strategy,
        puzzle.initial().bits(),
        puzzle.goal().bits()
    );
    let result = match strategy {
        Strategy::BreadthFirst => solve_bfs(puzzle),
        Strategy::DepthFirst => solve_dfs(puzzle),
        Strategy::UniformCost => solve_ucs(puzzle),
        Strategy::IterativeDeepening => solve_iddfs(puzzle),
        Strategy::HeuristicBestFirst => solve_astar(puzzle),
    };
    match &result {
        Some(solution) => debug!(
            "{} found a path of {} moves after {} expansions",
            strategy,
            solution.moves(),
            solution.expanded
        ),
        None => debug!("{} found no path", strategy),
    }
    result
}

fn extended(path: &[State], next: State) -> Vec<State> {
    let mut new_path = Vec::with_capacity(path.len() + 1);
    new_path.extend_from_slice(path);
    new_path.push(next);
    new_path
}

/// Breadth-first search. States are marked seen when enqueued and goal-tested when
/// dequeued, so the returned path has the fewest possible moves.
pub fn solve_bfs(puzzle: &Puzzle) -> Option<Solution> {
    let start = puzzle.initial();
    let mut queue = VecDeque::from([(start, vec![start])]);
    let mut seen = HashSet::from([start]);
    let mut expanded = 0;

    while let Some((current, path)) = queue.pop_front() {
        expanded += 1;
        if puzzle.is_goal(&current) {
            return Some(Solution {
                strategy: Strategy::BreadthFirst,
                path,
                expanded,
            });
        }
        for next in puzzle.successors(&current) {
            if seen.insert(next) {
                queue.push_back((next, extended(&path, next)));
            }
        }
    }
    None
}

/// Depth-first search.
///
/// A state is marked seen when it is popped for expansion, not when it is pushed,
/// so the stack may hold the same state several times. Each state is still expanded
/// at most once.
pub fn solve_dfs(puzzle: &Puzzle) -> Option<Solution> {
    let start = puzzle.initial();
    let mut stack = vec![(start, vec![start])];
    let mut seen = HashSet::new();
    let mut expanded = 0;

    while let Some((current, path)) = stack.pop() {
        if puzzle.is_goal(&current) {
            return Some(Solution {
                strategy: Strategy::DepthFirst,
                path,
                expanded,
            });
        }
        if seen.insert(current) {
            expanded += 1;
            for next in puzzle.successors(&current) {
                stack.push((next, extended(&path, next)));
            }
        }
    }
    None
}

/// Frontier entry for the cost-ordered searches.
///
/// Ordered so that `BinaryHeap` pops the lowest priority first and, among equal
/// priorities, the entry pushed first.
#[derive(Debug)]
struct PriorityNode {
    priority: u32,
    serial: u64,
    cost: u32,
    state: State,
    path: Vec<State>,
}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.serial == other.serial
    }
}

impl Eq for PriorityNode {}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.serial.cmp(&self.serial))
    }
}

/// Least-priority-first search where every crossing costs 1 and the priority of a
/// state is its cost plus `estimate(state)`.
///
/// Keeps the best known cost per state and pushes a state again whenever a cheaper
/// way to it turns up. Stale entries are not skipped when popped.
fn cost_ordered_search(
    puzzle: &Puzzle,
    strategy: Strategy,
    estimate: impl Fn(&State) -> u32,
) -> Option<Solution> {
    let start = puzzle.initial();
    let mut frontier = BinaryHeap::new();
    let mut best_cost = HashMap::from([(start, 0u32)]);
    let mut serial = 0u64;
    let mut expanded = 0;

    frontier.push(PriorityNode {
        priority: estimate(&start),
        serial,
        cost: 0,
        state: start,
        path: vec![start],
    });

    while let Some(node) = frontier.pop() {
        expanded += 1;
        if puzzle.is_goal(&node.state) {
            return Some(Solution {
                strategy,
                path: node.path,
                expanded,
            });
        }
        for next in puzzle.successors(&node.state) {
            let cost = node.cost + 1;
            let improves = best_cost.get(&next).map_or(true, |&known| cost < known);
            if improves {
                best_cost.insert(next, cost);
                serial += 1;
                frontier.push(PriorityNode {
                    priority: cost + estimate(&next),
                    serial,
                    cost,
                    state: next,
                    path: extended(&node.path, next),
                });
            }
        }
    }
    None
}

/// Uniform-cost search: the frontier is ordered by accumulated cost alone.
pub fn solve_ucs(puzzle: &Puzzle) -> Option<Solution> {
    cost_ordered_search(puzzle, Strategy::UniformCost, |_| 0)
}

/// Heuristic best-first (A*-style) search ordered by cost plus `Puzzle::heuristic`.
///
/// The heuristic can overestimate, so the returned path is not guaranteed to be the
/// shortest in general. On the canonical puzzle it is.
pub fn solve_astar(puzzle: &Puzzle) -> Option<Solution> {
    cost_ordered_search(puzzle, Strategy::HeuristicBestFirst, |state| {
        puzzle.heuristic(state)
    })
}

/// Iterative deepening: depth-limited searches with limits `0, 1, ..., MAX_DEPTH`.
///
/// The first limit that reaches the goal yields the path, so the path has the fewest
/// moves as long as one exists within `MAX_DEPTH` crossings.
pub fn solve_iddfs(puzzle: &Puzzle) -> Option<Solution> {
    let mut expanded = 0;
    for limit in 0..=MAX_DEPTH {
        trace!("Depth-limited pass with limit {}", limit);
        if let Some(path) = depth_limited(puzzle, limit, &mut expanded) {
            return Some(Solution {
                strategy: Strategy::IterativeDeepening,
                path,
                expanded,
            });
        }
    }
    None
}

/// One depth-limited pass, run on an explicit stack.
///
/// A branch never revisits a state already on its own path; different branches may
/// visit the same state. Successors are pushed in reverse so they are explored in
/// `Puzzle::successors` order.
fn depth_limited(puzzle: &Puzzle, limit: usize, expanded: &mut usize) -> Option<Vec<State>> {
    let start = puzzle.initial();
    let mut stack = vec![(start, vec![start], limit)];

    while let Some((current, path, remaining)) = stack.pop() {
        *expanded += 1;
        if puzzle.is_goal(&current) {
            return Some(path);
        }
        if remaining == 0 {
            continue;
        }
        for next in puzzle.successors(&current).into_iter().rev() {
            if !path.contains(&next) {
                stack.push((next, extended(&path, next), remaining - 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Passenger;
    use crate::utils::state_from_str;

    fn states(bits: &[&str]) -> Vec<State> {
        bits.iter().map(|b| state_from_str(b).unwrap()).collect()
    }

    fn shortest_path() -> Vec<State> {
        states(&["0000", "1010", "0010", "1110", "0100", "1101", "0101", "1111"])
    }

    #[test]
    fn test_solve_bfs_shortest_path() {
        let solution = solve(&Puzzle::canonical(), Strategy::BreadthFirst).unwrap();
        assert_eq!(solution.strategy, Strategy::BreadthFirst);
        assert_eq!(solution.path, shortest_path());
        assert_eq!(solution.moves(), 7);
    }

    #[test]
    fn test_solve_ucs_shortest_path() {
        let solution = solve(&Puzzle::canonical(), Strategy::UniformCost).unwrap();
        assert_eq!(solution.path, shortest_path());
    }

    #[test]
    fn test_solve_astar_shortest_path() {
        let solution = solve(&Puzzle::canonical(), Strategy::HeuristicBestFirst).unwrap();
        assert_eq!(solution.path.len(), 8);
        assert_eq!(solution.path, shortest_path());
    }

    #[test]
    fn test_solve_dfs_first_found_path() {
        let puzzle = Puzzle::canonical();
        let solution = solve(&puzzle, Strategy::DepthFirst).unwrap();
        assert!(puzzle.is_legal_path(&solution.path));
        // The last successor is explored first, so the cabbage crosses before the wolf.
        assert_eq!(
            solution.path,
            states(&["0000", "1010", "0010", "1011", "0001", "1101", "0101", "1111"])
        );
    }

    #[test]
    fn test_solve_iddfs_minimum_moves() {
        let puzzle = Puzzle::canonical();
        let solution = solve(&puzzle, Strategy::IterativeDeepening).unwrap();
        assert!(puzzle.is_legal_path(&solution.path));
        assert_eq!(solution.path, shortest_path());
    }

    #[test]
    fn test_dfs_marks_seen_on_pop() {
        // 1110 is pushed early but popped late; marking on push would take the
        // three-move branch through 0010 instead.
        let puzzle = Puzzle::canonical().with_goal(state_from_str("1110").unwrap());
        let solution = solve_dfs(&puzzle).unwrap();
        assert_eq!(
            solution.path,
            states(&["0000", "1010", "0010", "1011", "0001", "1101", "0100", "1110"])
        );
    }

    #[test]
    fn test_iddfs_expands_more_than_bfs() {
        let puzzle = Puzzle::canonical();
        let bfs = solve_bfs(&puzzle).unwrap();
        let ids = solve_iddfs(&puzzle).unwrap();
        assert!(ids.expanded > bfs.expanded);
    }

    #[test]
    fn test_every_strategy_returns_legal_path() {
        let puzzle = Puzzle::canonical();
        for strategy in Strategy::ALL {
            let solution = solve(&puzzle, strategy).unwrap();
            assert!(
                puzzle.is_legal_path(&solution.path),
                "{} returned an illegal path",
                strategy
            );
            assert!(solution.path.iter().all(|s| puzzle.is_valid(s)));
        }
    }

    #[test]
    fn test_every_strategy_is_repeatable() {
        let puzzle = Puzzle::canonical();
        for strategy in Strategy::ALL {
            assert_eq!(solve(&puzzle, strategy), solve(&puzzle, strategy));
        }
    }

    #[test]
    fn test_no_solution_when_every_pair_conflicts() {
        let puzzle = Puzzle::canonical().with_conflict(Passenger::Wolf, Passenger::Cabbage);
        for strategy in Strategy::ALL {
            assert_eq!(solve(&puzzle, strategy), None, "{}", strategy);
        }
    }

    #[test]
    fn test_no_solution_for_invalid_goal() {
        // Wolf and sheep across without the farmer can never be reached.
        let puzzle = Puzzle::canonical().with_goal(state_from_str("0111").unwrap());
        for strategy in Strategy::ALL {
            assert_eq!(solve(&puzzle, strategy), None, "{}", strategy);
        }
    }

    #[test]
    fn test_goal_equal_to_initial() {
        let puzzle = Puzzle::canonical().with_goal(State::INITIAL);
        for strategy in Strategy::ALL {
            let solution = solve(&puzzle, strategy).unwrap();
            assert_eq!(solution.path, vec![State::INITIAL]);
            assert_eq!(solution.moves(), 0);
        }
    }

    #[test]
    fn test_intermediate_goal() {
        let puzzle = Puzzle::canonical().with_goal(state_from_str("0100").unwrap());
        for strategy in [
            Strategy::BreadthFirst,
            Strategy::UniformCost,
            Strategy::IterativeDeepening,
            Strategy::HeuristicBestFirst,
        ] {
            let solution = solve(&puzzle, strategy).unwrap();
            assert_eq!(solution.path, shortest_path()[..5].to_vec(), "{}", strategy);
        }
    }

    #[test]
    fn test_priority_node_order() {
        let node = |priority, serial| PriorityNode {
            priority,
            serial,
            cost: 0,
            state: State::INITIAL,
            path: Vec::new(),
        };
        let mut heap = BinaryHeap::from(vec![node(5, 0), node(3, 2), node(3, 1), node(4, 3)]);
        let order: Vec<(u32, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|n| (n.priority, n.serial))
            .collect();
        assert_eq!(order, vec![(3, 1), (3, 2), (4, 3), (5, 0)]);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("breadth-first".parse(), Ok(Strategy::BreadthFirst));
        assert_eq!("Depth-First".parse(), Ok(Strategy::DepthFirst));
        assert_eq!("ucs".parse(), Ok(Strategy::UniformCost));
        assert_eq!("IDS".parse(), Ok(Strategy::IterativeDeepening));
        assert_eq!("astar".parse(), Ok(Strategy::HeuristicBestFirst));
        assert_eq!(
            "heuristic-best-first".parse(),
            Ok(Strategy::HeuristicBestFirst)
        );
        assert_eq!(
            "greedy".parse::<Strategy>(),
            Err(UnknownStrategy("greedy".to_string()))
        );
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }
}
