use std::collections::BTreeSet;

use crate::board::{Board, FlipSet};
use crate::error::{ReversiError, Result};
use crate::types::{Action, Cell, Player, Position, Reward, Score};

/// Immutable game position: board, side to move, and whether the previous
/// ply was a placement.
///
/// A new `GameState` comes only from [`GameState::new`] or from
/// [`GameState::act`] on an earlier state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    last_moved: bool,
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub reward: Reward,
    pub game_over: bool,
}

impl GameState {
    /// Standard opening position with Black to move.
    pub fn new(dim: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(dim)?,
            current_player: Player::Black,
            last_moved: true,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dim(&self) -> usize {
        self.board.dim()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// `false` when the previous ply was a pass.
    pub fn last_moved(&self) -> bool {
        self.last_moved
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn legal_moves(&self) -> BTreeSet<Position> {
        self.board.legal_moves(self.current_player)
    }

    /// Placements available to the side to move, in row-major order.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Action::Place).collect()
    }

    pub fn flips(&self, pos: Position) -> FlipSet {
        self.board.flips(pos, self.current_player)
    }

    /// Applies `action` and returns the successor state.
    ///
    /// A pass is always accepted; the game ends when it directly follows
    /// another pass. A placement must be in the legal set, otherwise an
    /// error is returned and nothing is built.
    pub fn act(&self, action: Action) -> Result<Transition> {
        match action {
            Action::Pass => Ok(self.pass()),
            Action::Place(pos) => {
                if !self.board.contains(pos) {
                    return Err(ReversiError::OutOfBounds {
                        position: pos,
                        dim: self.dim(),
                    });
                }

                let flips = self.flips(pos);
                if self.board.get(pos) != Some(Cell::Empty) || flips.is_empty() {
                    return Err(ReversiError::IllegalMove {
                        position: pos,
                        player: self.current_player,
                    });
                }

                Ok(self.place(pos, &flips))
            }
        }
    }

    fn pass(&self) -> Transition {
        let game_over = !self.last_moved;
        let reward = if game_over {
            self.board.score().reward()
        } else {
            0
        };

        Transition {
            state: GameState {
                board: self.board.clone(),
                current_player: -self.current_player,
                last_moved: false,
            },
            reward,
            game_over,
        }
    }

    fn place(&self, pos: Position, flips: &FlipSet) -> Transition {
        Transition {
            state: GameState {
                board: self.board.with_placement(pos, self.current_player, flips),
                current_player: -self.current_player,
                last_moved: true,
            },
            reward: 0,
            game_over: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, current_player: Player, last_moved: bool) -> Self {
        Self {
            board,
            current_player,
            last_moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn initial_state_is_black_to_move() {
        let state = GameState::new(8).unwrap();

        assert_eq!(state.current_player(), Player::Black);
        assert!(state.last_moved());
        assert_eq!(state.score(), Score { black: 2, white: 2 });
        assert_eq!(state.legal_actions().len(), 4);
    }

    #[test]
    fn placement_swaps_player_and_keeps_source_intact() {
        let state = GameState::new(4).unwrap();
        let before = state.clone();

        let next = state.act(Action::Place(pos(0, 1))).unwrap();

        assert_eq!(state, before);
        assert_eq!(next.reward, 0);
        assert!(!next.game_over);
        assert_eq!(next.state.current_player(), Player::White);
        assert!(next.state.last_moved());
        assert_eq!(next.state.score(), Score { black: 4, white: 1 });
    }

    #[test]
    fn single_capture_on_6x6_changes_only_the_run() {
        let state = GameState::new(6).unwrap();

        let flips = state.flips(pos(1, 2));
        assert_eq!(flips.runs().len(), 1);
        assert_eq!(flips.runs()[0].anchor, pos(3, 2));
        assert_eq!(flips.runs()[0].cells, vec![pos(2, 2)]);

        let next = state.act(Action::Place(pos(1, 2))).unwrap();
        let changed = next.state.board().diff(state.board());

        assert_eq!(changed, vec![pos(1, 2), pos(2, 2)]);
        assert_eq!(next.state.board().get(pos(2, 2)), Some(Cell::Black));
        assert_eq!(next.state.board().get(pos(3, 3)), Some(Cell::White));
    }

    #[test]
    fn t03_pass_switches_turn_without_ending() {
        let state = GameState::new(4).unwrap();

        let next = state.act(Action::Pass).unwrap();

        assert_eq!(next.state.current_player(), Player::White);
        assert!(!next.state.last_moved());
        assert!(!next.game_over);
        assert_eq!(next.reward, 0);
        assert_eq!(next.state.board(), state.board());
    }

    #[test]
    fn t04_both_passes_end_game_with_tie() {
        let state = GameState::new(4).unwrap();

        let first = state.act(Action::Pass).unwrap();
        let second = first.state.act(Action::Pass).unwrap();

        assert!(second.game_over);
        assert_eq!(second.reward, 0);
    }

    #[test]
    fn double_pass_rewards_the_leading_side() {
        let state = GameState::new(4).unwrap();
        let black_lead = state.act(Action::Place(pos(0, 1))).unwrap().state;
        let end = black_lead
            .act(Action::Pass)
            .and_then(|t| t.state.act(Action::Pass))
            .unwrap();
        assert!(end.game_over);
        assert_eq!(end.reward, 1);

        let white_turn = state.act(Action::Pass).unwrap().state;
        let white_lead = white_turn.act(Action::Place(pos(1, 3))).unwrap();
        assert!(!white_lead.game_over);
        assert_eq!(white_lead.state.score(), Score { black: 1, white: 4 });

        // A placement in between resets the pass chain.
        let black_pass = white_lead.state.act(Action::Pass).unwrap();
        assert!(!black_pass.game_over);
        let end = black_pass.state.act(Action::Pass).unwrap();
        assert!(end.game_over);
        assert_eq!(end.reward, -1);
    }

    #[test]
    fn t02_illegal_placements_are_rejected() {
        let state = GameState::new(4).unwrap();
        let before = state.clone();

        let occupied = state.act(Action::Place(pos(1, 1))).unwrap_err();
        assert!(matches!(
            occupied,
            ReversiError::IllegalMove { position, player: Player::Black } if position == pos(1, 1)
        ));

        let no_capture = state.act(Action::Place(pos(0, 0))).unwrap_err();
        assert!(matches!(no_capture, ReversiError::IllegalMove { .. }));

        let outside = state.act(Action::Place(pos(4, 0))).unwrap_err();
        assert!(matches!(outside, ReversiError::OutOfBounds { dim: 4, .. }));

        assert_eq!(state, before);
    }

    #[test]
    fn pieces_and_empties_always_fill_the_board() {
        let mut state = GameState::new(6).unwrap();
        for _ in 0..40 {
            let score = state.score();
            assert_eq!(score.black + score.white + state.board().empty_count(), 36);

            let action = state
                .legal_actions()
                .first()
                .copied()
                .unwrap_or(Action::Pass);
            let next = state.act(action).unwrap();
            if next.game_over {
                break;
            }
            state = next.state;
        }
    }

    #[test]
    fn from_parts_allows_forced_pass_positions() {
        let board = Board::from_rows(&[
            "BWBB", //
            "BBBB", //
            "BBBB", //
            "BBB.", //
        ]);
        let state = GameState::from_parts(board, Player::White, true);

        assert!(state.legal_moves().is_empty());
        let next = state.act(Action::Pass).unwrap();
        assert!(next.state.legal_moves().is_empty());
        let end = next.state.act(Action::Pass).unwrap();
        assert!(end.game_over);
        assert_eq!(end.reward, 1);
    }
}
