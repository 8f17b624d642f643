//! Core engine for the river crossing puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Side`, `Passenger` and `State`: which bank each of the four entities occupies.
//! - `Move`: a single crossing of the farmer, alone or with one passenger.
//! - `Puzzle`: the state space itself. It owns the initial and goal states and the
//!   pairs of passengers that cannot be left alone together, and provides the validity
//!   predicate and successor generation every search strategy is built on.
//! - `Game`: a manual-play session with history (for undo) and move processing.
use crate::heuristics::origin_count;
use std::fmt;
use thiserror::Error;

/// One of the two river banks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The bank everybody starts on (bit `0`).
    Origin,
    /// The bank everybody has to reach (bit `1`).
    Destination,
}

impl Side {
    /// Returns the opposite bank.
    pub fn flip(self) -> Self {
        match self {
            Side::Origin => Side::Destination,
            Side::Destination => Side::Origin,
        }
    }

    /// Returns `0` for the origin bank and `1` for the destination bank.
    pub fn bit(self) -> u8 {
        match self {
            Side::Origin => 0,
            Side::Destination => 1,
        }
    }

    /// Inverse of [`Side::bit`]. Returns `None` for anything other than `0` or `1`.
    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Side::Origin),
            1 => Some(Side::Destination),
            _ => None,
        }
    }
}

/// The three dependents the farmer ferries across.
///
/// The declaration order is significant: successor generation tries passengers
/// in this order, which fixes the tie-breaks of every search strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Passenger {
    /// The predator.
    Wolf,
    /// The prey. Conflicts with both other passengers in the canonical puzzle.
    Sheep,
    /// The consumable.
    Cabbage,
}

impl Passenger {
    /// All passengers in successor-generation order.
    pub const ALL: [Passenger; 3] = [Passenger::Wolf, Passenger::Sheep, Passenger::Cabbage];

    /// Lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Passenger::Wolf => "wolf",
            Passenger::Sheep => "sheep",
            Passenger::Cabbage => "cabbage",
        }
    }

    /// Single-letter symbol used when drawing a state.
    ///
    /// ```
    /// use river_crossing_solver::engine::Passenger;
    /// assert_eq!(Passenger::Sheep.to_char(), 'S');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Passenger::Wolf => 'W',
            Passenger::Sheep => 'S',
            Passenger::Cabbage => 'C',
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which bank the farmer and each passenger are on.
///
/// `State` is a plain value: sixteen combinations exist, and `Puzzle::is_valid`
/// rules some of them out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub farmer: Side,
    pub wolf: Side,
    pub sheep: Side,
    pub cabbage: Side,
}

impl State {
    /// Everybody on the origin bank, `0000`.
    pub const INITIAL: State = State::uniform(Side::Origin);
    /// Everybody on the destination bank, `1111`.
    pub const GOAL: State = State::uniform(Side::Destination);

    pub const fn new(farmer: Side, wolf: Side, sheep: Side, cabbage: Side) -> Self {
        State {
            farmer,
            wolf,
            sheep,
            cabbage,
        }
    }

    const fn uniform(side: Side) -> Self {
        State::new(side, side, side, side)
    }

    /// Returns the bank the given passenger is on.
    pub fn side_of(&self, passenger: Passenger) -> Side {
        match passenger {
            Passenger::Wolf => self.wolf,
            Passenger::Sheep => self.sheep,
            Passenger::Cabbage => self.cabbage,
        }
    }

    fn set_side(&mut self, passenger: Passenger, side: Side) {
        match passenger {
            Passenger::Wolf => self.wolf = side,
            Passenger::Sheep => self.sheep = side,
            Passenger::Cabbage => self.cabbage = side,
        }
    }

    /// The four sides in field order: farmer, wolf, sheep, cabbage.
    pub fn sides(&self) -> [Side; 4] {
        [self.farmer, self.wolf, self.sheep, self.cabbage]
    }

    /// Compact `0`/`1` rendering in field order.
    ///
    /// ```
    /// use river_crossing_solver::engine::State;
    /// assert_eq!(State::INITIAL.bits(), "0000");
    /// assert_eq!(State::GOAL.bits(), "1111");
    /// ```
    pub fn bits(&self) -> String {
        self.sides()
            .iter()
            .map(|side| char::from(b'0' + side.bit()))
            .collect()
    }

    /// Applies a crossing without checking the validity invariant.
    ///
    /// The farmer always changes bank. For `Move::With(p)` the passenger `p` changes
    /// bank too, which is only possible if it stands on the farmer's bank.
    ///
    /// # Returns
    /// * `Ok(State)` with the resulting state, which may violate `Puzzle::is_valid`.
    /// * `Err(PlayError::NotWithFarmer)` if the chosen passenger is on the other bank.
    pub fn apply(&self, mv: Move) -> Result<State, PlayError> {
        let mut next = *self;
        next.farmer = self.farmer.flip();
        if let Move::With(passenger) = mv {
            if self.side_of(passenger) != self.farmer {
                return Err(PlayError::NotWithFarmer { passenger });
            }
            next.set_side(passenger, self.farmer.flip());
        }
        Ok(next)
    }
}

impl fmt::Display for State {
    /// Draws both banks, e.g. `F.S. ~~~~ .W.C`, with the river highlighted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = [
            ('F', self.farmer),
            (Passenger::Wolf.to_char(), self.wolf),
            (Passenger::Sheep.to_char(), self.sheep),
            (Passenger::Cabbage.to_char(), self.cabbage),
        ];
        let bank = |side: Side| -> String {
            symbols
                .iter()
                .map(|&(symbol, at)| if at == side { symbol } else { '.' })
                .collect()
        };
        write!(
            f,
            "{} \x1b[1;44m ~~~~ \x1b[m {}",
            bank(Side::Origin),
            bank(Side::Destination)
        )
    }
}

/// A single crossing of the farmer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// The farmer crosses alone.
    Alone,
    /// The farmer takes one passenger along.
    With(Passenger),
}

impl Move {
    /// All moves in successor-generation order: alone, then each passenger.
    pub const ALL: [Move; 4] = [
        Move::Alone,
        Move::With(Passenger::Wolf),
        Move::With(Passenger::Sheep),
        Move::With(Passenger::Cabbage),
    ];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Alone => write!(f, "farmer crosses alone"),
            Move::With(passenger) => write!(f, "farmer crosses with the {}", passenger),
        }
    }
}

/// Errors reported to a manual player.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    /// The chosen passenger is on the other bank. The move is rejected and the
    /// session keeps its state.
    #[error("the {passenger} is not on the farmer's bank")]
    NotWithFarmer { passenger: Passenger },
    /// The move left two conflicting passengers alone together. The session
    /// that produced it has been reset to the initial state.
    #[error("the {first} and the {second} were left alone together")]
    UnsafeCrossing {
        state: State,
        first: Passenger,
        second: Passenger,
    },
}

/// The state space: start, goal and the pairs that may not be left unattended.
///
/// `successors` is deterministic: for a given state it always yields the results of
/// `Move::ALL` in order, skipping illegal and invalid ones. The search strategies
/// rely on that order for their tie-breaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    initial: State,
    goal: State,
    conflicts: Vec<(Passenger, Passenger)>,
}

impl Default for Puzzle {
    fn default() -> Self {
        Puzzle::canonical()
    }
}

impl Puzzle {
    /// The classic puzzle: everybody starts on the origin bank and has to reach the
    /// destination; the wolf eats the sheep and the sheep eats the cabbage.
    pub fn canonical() -> Self {
        Puzzle {
            initial: State::INITIAL,
            goal: State::GOAL,
            conflicts: vec![
                (Passenger::Wolf, Passenger::Sheep),
                (Passenger::Sheep, Passenger::Cabbage),
            ],
        }
    }

    /// Replaces the goal state.
    pub fn with_goal(mut self, goal: State) -> Self {
        self.goal = goal;
        self
    }

    /// Adds another pair that may not be left unattended.
    ///
    /// Pairs of a passenger with itself and pairs already present (in either order)
    /// are ignored.
    pub fn with_conflict(mut self, first: Passenger, second: Passenger) -> Self {
        let known = self
            .conflicts
            .iter()
            .any(|&(a, b)| (a, b) == (first, second) || (a, b) == (second, first));
        if first != second && !known {
            self.conflicts.push((first, second));
        }
        self
    }

    pub fn initial(&self) -> State {
        self.initial
    }

    pub fn goal(&self) -> State {
        self.goal
    }

    pub fn conflicts(&self) -> &[(Passenger, Passenger)] {
        &self.conflicts
    }

    pub fn is_goal(&self, state: &State) -> bool {
        *state == self.goal
    }

    /// Returns the first conflicting pair that shares a bank without the farmer.
    pub fn unattended_conflict(&self, state: &State) -> Option<(Passenger, Passenger)> {
        self.conflicts.iter().copied().find(|&(first, second)| {
            let side = state.side_of(first);
            side == state.side_of(second) && side != state.farmer
        })
    }

    /// Checks the validity invariant: no conflicting pair is alone on a bank.
    ///
    /// ```
    /// use river_crossing_solver::engine::{Move, Puzzle, State};
    /// let puzzle = Puzzle::canonical();
    /// assert!(puzzle.is_valid(&State::INITIAL));
    /// // The farmer leaves alone: the sheep stays with the wolf and the cabbage.
    /// let state = State::INITIAL.apply(Move::Alone).unwrap();
    /// assert!(!puzzle.is_valid(&state));
    /// ```
    pub fn is_valid(&self, state: &State) -> bool {
        self.unattended_conflict(state).is_none()
    }

    /// Generates the valid states one crossing away from `state`.
    ///
    /// Candidates are produced in `Move::ALL` order (alone, wolf, sheep, cabbage);
    /// passengers on the other bank are skipped and every candidate is filtered
    /// through `is_valid`. At most four states are returned.
    pub fn successors(&self, state: &State) -> Vec<State> {
        Move::ALL
            .iter()
            .filter_map(|&mv| state.apply(mv).ok())
            .filter(|next| self.is_valid(next))
            .collect()
    }

    /// Estimate used by heuristic best-first search; see [`origin_count`].
    pub fn heuristic(&self, state: &State) -> u32 {
        origin_count(state)
    }

    /// Finds the move that turns `from` into `to`, if a single crossing does it.
    pub fn move_between(&self, from: &State, to: &State) -> Option<Move> {
        Move::ALL
            .iter()
            .copied()
            .find(|&mv| from.apply(mv) == Ok(*to))
    }

    /// Checks that `path` starts at the initial state, ends at the goal, and that
    /// every step is a single crossing into a valid state.
    pub fn is_legal_path(&self, path: &[State]) -> bool {
        match (path.first(), path.last()) {
            (Some(first), Some(last)) => {
                *first == self.initial
                    && self.is_goal(last)
                    && path.iter().all(|state| self.is_valid(state))
                    && path
                        .windows(2)
                        .all(|pair| self.move_between(&pair[0], &pair[1]).is_some())
            }
            _ => false,
        }
    }
}

/// Result of a successful manual move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The crossing was safe; the puzzle goes on.
    Moved(State),
    /// The crossing reached the goal.
    Solved(State),
}

/// Manages a manual-play session: the current state and the states visited so far.
#[derive(Clone, Debug)]
pub struct Game {
    puzzle: Puzzle,
    state: State,
    history: Vec<State>,
}

impl Game {
    /// Starts a session at the puzzle's initial state.
    pub fn new(puzzle: Puzzle) -> Self {
        let initial = puzzle.initial();
        Game {
            puzzle,
            state: initial,
            history: vec![initial],
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Number of crossings made since the start (or the last reset).
    pub fn steps(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_solved(&self) -> bool {
        self.puzzle.is_goal(&self.state)
    }

    /// Processes a player's move.
    ///
    /// 1. If the chosen passenger is not on the farmer's bank, the move is rejected with
    ///    `PlayError::NotWithFarmer` and nothing changes.
    /// 2. If the crossing leaves a conflicting pair alone, the session is reset to the
    ///    initial state and `PlayError::UnsafeCrossing` describes what went wrong.
    /// 3. Otherwise the new state is recorded in the history.
    ///
    /// # Returns
    /// * `Ok(MoveOutcome::Solved(state))` if the goal was reached.
    /// * `Ok(MoveOutcome::Moved(state))` for any other safe crossing.
    pub fn play(&mut self, mv: Move) -> Result<MoveOutcome, PlayError> {
        let next = self.state.apply(mv)?;
        if let Some((first, second)) = self.puzzle.unattended_conflict(&next) {
            self.reset();
            return Err(PlayError::UnsafeCrossing {
                state: next,
                first,
                second,
            });
        }

        self.state = next;
        self.history.push(next);

        if self.puzzle.is_goal(&next) {
            Ok(MoveOutcome::Solved(next))
        } else {
            Ok(MoveOutcome::Moved(next))
        }
    }

    /// Undoes the last crossing.
    ///
    /// # Returns
    /// * `true` if a crossing was undone.
    /// * `false` if the session is at its starting state.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            if let Some(&previous) = self.history.last() {
                self.state = previous;
            }
            true
        } else {
            false
        }
    }

    /// Returns to the initial state and clears the history.
    pub fn reset(&mut self) {
        self.state = self.puzzle.initial();
        self.history.clear();
        self.history.push(self.state);
    }
}
