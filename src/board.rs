use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{ReversiError, Result};
use crate::types::{Cell, Player, Position, Score};

pub const MIN_DIM: usize = 4;
/// Largest side length; every column still has an `a`..`z` name.
pub const MAX_DIM: usize = 26;
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Square Reversi grid of even dimension.
///
/// Cells live behind an `Arc` so clones (and pass transitions) share storage;
/// a placement always builds a fresh grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dim: usize,
    cells: Arc<[Cell]>,
}

/// Opponent cells captured along one direction, closed off by `anchor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipRun {
    pub anchor: Position,
    /// Ordered outward from the placement.
    pub cells: Vec<Position>,
}

/// All captures produced by a single placement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlipSet {
    runs: Vec<FlipRun>,
}

impl FlipSet {
    pub fn runs(&self) -> &[FlipRun] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total number of flipped cells.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|run| run.cells.len()).sum()
    }

    pub fn flipped(&self) -> impl Iterator<Item = Position> + '_ {
        self.runs.iter().flat_map(|run| run.cells.iter().copied())
    }
}

impl Board {
    /// Creates the standard setup: White on the central main diagonal,
    /// Black on the central anti-diagonal.
    pub fn new(dim: usize) -> Result<Self> {
        validate_dim(dim)?;

        let mut cells = vec![Cell::Empty; dim * dim];
        let lo = dim / 2 - 1;
        let hi = dim / 2;
        cells[lo * dim + lo] = Cell::White;
        cells[lo * dim + hi] = Cell::Black;
        cells[hi * dim + lo] = Cell::Black;
        cells[hi * dim + hi] = Cell::White;

        Ok(Self {
            dim,
            cells: cells.into(),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.dim && pos.col < self.dim
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cell(pos))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn score(&self) -> Score {
        Score {
            black: self.count(Cell::Black),
            white: self.count(Cell::White),
        }
    }

    pub fn empty_count(&self) -> usize {
        self.count(Cell::Empty)
    }

    /// Positions strictly beyond `origin` along one direction, up to the edge.
    pub fn crawl(
        &self,
        origin: Position,
        (dr, dc): (isize, isize),
    ) -> impl Iterator<Item = Position> + use<> {
        let dim = self.dim as isize;
        let (row, col) = (origin.row as isize, origin.col as isize);
        (1isize..).map_while(move |step| {
            let r = row + dr * step;
            let c = col + dc * step;
            ((0..dim).contains(&r) && (0..dim).contains(&c))
                .then(|| Position::new(r as usize, c as usize))
        })
    }

    /// Legal destinations for `player`, found by crawling out from each of
    /// the player's pieces. An empty set means a forced pass.
    pub fn legal_moves(&self, player: Player) -> BTreeSet<Position> {
        let me = player.to_cell();
        let opp = player.opponent().to_cell();
        let mut found = BTreeSet::new();

        for (idx, _) in self.cells.iter().enumerate().filter(|&(_, &c)| c == me) {
            let origin = self.position_of(idx);
            for dir in DIRECTIONS {
                let mut has_opponent = false;
                for pos in self.crawl(origin, dir) {
                    let cell = self.cell(pos);
                    if cell == opp {
                        has_opponent = true;
                        continue;
                    }
                    if cell == Cell::Empty && has_opponent {
                        found.insert(pos);
                    }
                    break;
                }
            }
        }

        found
    }

    /// Runs of opponent cells that a placement at `pos` would capture.
    /// Empty for out-of-range positions; occupancy of `pos` is not checked.
    pub fn flips(&self, pos: Position, player: Player) -> FlipSet {
        let mut runs = Vec::new();
        if !self.contains(pos) {
            return FlipSet { runs };
        }

        for dir in DIRECTIONS {
            let mut line = Vec::new();
            for next in self.crawl(pos, dir) {
                match self.cell(next).owner() {
                    Some(owner) if owner == player => {
                        if !line.is_empty() {
                            runs.push(FlipRun {
                                anchor: next,
                                cells: line,
                            });
                        }
                        break;
                    }
                    Some(_) => line.push(next),
                    None => break,
                }
            }
        }

        FlipSet { runs }
    }

    /// Returns a new board with `flips` turned over and `pos` set to `player`.
    pub(crate) fn with_placement(&self, pos: Position, player: Player, flips: &FlipSet) -> Board {
        let mut cells = self.cells.to_vec();
        let stone = player.to_cell();
        for flipped in flips.flipped() {
            cells[flipped.row * self.dim + flipped.col] = stone;
        }
        cells[pos.row * self.dim + pos.col] = stone;

        Board {
            dim: self.dim,
            cells: cells.into(),
        }
    }

    /// Cells whose contents differ from `other`. Boards of different
    /// dimensions differ everywhere.
    pub fn diff(&self, other: &Board) -> Vec<Position> {
        if self.dim != other.dim {
            return (0..self.cells.len()).map(|idx| self.position_of(idx)).collect();
        }
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| self.position_of(idx))
            .collect()
    }

    /// Converts the board to row-major codes, 0=empty, 1=black, 2=white.
    pub fn to_codes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.code()).collect()
    }

    /// CRC32 over the dimension and cell codes.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(self.dim as u32).to_le_bytes());
        hasher.update(&self.to_codes());
        hasher.finalize()
    }

    fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row * self.dim + pos.col]
    }

    fn position_of(&self, idx: usize) -> Position {
        Position::new(idx / self.dim, idx % self.dim)
    }

    /// Builds a board from rows of `.`, `B`, `W`.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Board {
        let dim = rows.len();
        let cells: Vec<Cell> = rows
            .iter()
            .flat_map(|row| {
                assert_eq!(row.len(), dim, "row length must match row count");
                row.chars().map(|ch| match ch {
                    'B' => Cell::Black,
                    'W' => Cell::White,
                    _ => Cell::Empty,
                })
            })
            .collect();
        Board {
            dim,
            cells: cells.into(),
        }
    }
}

fn validate_dim(dim: usize) -> Result<()> {
    if !(MIN_DIM..=MAX_DIM).contains(&dim) || dim % 2 != 0 {
        return Err(ReversiError::InvalidDimension(dim));
    }
    Ok(())
}
