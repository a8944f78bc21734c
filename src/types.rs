use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// Terminal value of a game: `1` Black wins, `-1` White wins, `0` tie.
/// Every non-terminal ply carries `0`.
pub type Reward = i8;

/// Side to move. Black is the positive side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// `1` for Black, `-1` for White.
    pub fn sign(self) -> i8 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    pub fn opponent(self) -> Player {
        -self
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

impl Neg for Player {
    type Output = Player;

    fn neg(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    /// Wire encoding shared with the JS side: 0=empty, 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }
}

/// A zero-indexed board coordinate. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Position> for (usize, usize) {
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One ply: a placement or a pass. Serialized as `[row, col]` or `null`.
///
/// Placements order row-major and sort before `Pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Position>", into = "Option<Position>")]
pub enum Action {
    Place(Position),
    Pass,
}

impl Action {
    pub fn position(self) -> Option<Position> {
        match self {
            Action::Place(pos) => Some(pos),
            Action::Pass => None,
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Action::Pass)
    }
}

impl From<Position> for Action {
    fn from(pos: Position) -> Self {
        Action::Place(pos)
    }
}

impl From<Option<Position>> for Action {
    fn from(pos: Option<Position>) -> Self {
        pos.map_or(Action::Pass, Action::Place)
    }
}

impl From<Action> for Option<Position> {
    fn from(action: Action) -> Self {
        action.position()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(pos) => pos.fmt(f),
            Action::Pass => f.write_str("pass"),
        }
    }
}

/// Piece counts for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    /// `sign(black - white)`.
    pub fn reward(&self) -> Reward {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self.reward() {
            1 => Some(Player::Black),
            -1 => Some(Player::White),
            _ => None,
        }
    }
}

/// Public view of a position returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub dim: usize,
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: usize,
    pub white_count: usize,
    /// Contract:
    /// - `false` when the previous ply was a pass.
    /// - `true` otherwise, including the initial position.
    pub last_moved: bool,
    pub is_game_over: bool,
    pub legal_moves: Vec<Position>,
    /// Cells that differ from the previous board. Empty after a pass.
    pub changed: Vec<Position>,
}
