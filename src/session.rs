use std::collections::BTreeSet;

use crate::error::{ReversiError, Result};
use crate::record::{GameRecord, Replay};
use crate::state::GameState;
use crate::types::{Action, BoardSnapshot, Player, Position, Reward};

/// One applied ply, as appended to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ply {
    pub turn: usize,
    pub player: Player,
    pub action: Action,
    pub reward: Reward,
    pub game_over: bool,
}

/// A game advanced one action at a time by an outside caller.
///
/// Keeps the current and previous states for diff rendering and appends
/// every applied ply to its [`GameRecord`].
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    previous: GameState,
    record: GameRecord,
    outcome: Option<Reward>,
}

impl Session {
    pub fn new(dim: usize) -> Result<Self> {
        let state = GameState::new(dim)?;
        Ok(Self {
            previous: state.clone(),
            state,
            record: GameRecord::new(dim),
            outcome: None,
        })
    }

    /// Rebuilds a session from a log. The log is verified first, so a
    /// tampered reward or final-board fingerprint is rejected.
    pub fn from_record(record: &GameRecord) -> Result<Self> {
        Replay::new(record.clone())?.verify()?;

        let mut session = Self::new(record.dim)?;
        for &(action, _) in &record.actions {
            session.apply(action)?;
        }
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn previous(&self) -> &GameState {
        &self.previous
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn into_record(self) -> GameRecord {
        self.record
    }

    /// Number of plies applied so far.
    pub fn turn(&self) -> usize {
        self.record.len()
    }

    /// Terminal reward once the game has ended.
    pub fn outcome(&self) -> Option<Reward> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn legal_moves(&self) -> BTreeSet<Position> {
        if self.is_over() {
            return BTreeSet::new();
        }
        self.state.legal_moves()
    }

    /// Applies `action` to the current state. On error the session is left
    /// exactly as it was.
    pub fn apply(&mut self, action: Action) -> Result<Ply> {
        if self.is_over() {
            return Err(ReversiError::GameOver);
        }

        let player = self.state.current_player();
        let transition = self.state.act(action)?;
        let turn = self.record.len();

        self.record.push(action, transition.reward);
        self.previous = std::mem::replace(&mut self.state, transition.state);
        if transition.game_over {
            self.outcome = Some(transition.reward);
            self.record.final_board_crc = Some(self.state.board().fingerprint());
        }

        Ok(Ply {
            turn,
            player,
            action,
            reward: transition.reward,
            game_over: transition.game_over,
        })
    }

    /// Cells that differ between the previous and current boards.
    pub fn changed_cells(&self) -> Vec<Position> {
        self.state.board().diff(self.previous.board())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let board = self.state.board();
        let score = board.score();
        BoardSnapshot {
            dim: board.dim(),
            board: board.to_codes(),
            current_player: self.state.current_player().to_cell().code(),
            black_count: score.black,
            white_count: score.white,
            last_moved: self.state.last_moved(),
            is_game_over: self.is_over(),
            legal_moves: self.legal_moves().into_iter().collect(),
            changed: self.changed_cells(),
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
    fn initial_snapshot_is_correct() {
        let session = Session::new(8).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.dim, 8);
        assert_eq!(snapshot.board.len(), 64);
        assert_eq!(snapshot.current_player, 1);
        assert_eq!(snapshot.black_count, 2);
        assert_eq!(snapshot.white_count, 2);
        assert!(snapshot.last_moved);
        assert!(!snapshot.is_game_over);
        assert_eq!(snapshot.legal_moves.len(), 4);
        assert!(snapshot.changed.is_empty());
    }

    #[test]
    fn apply_tracks_previous_board_and_changes() {
        let mut session = Session::new(6).unwrap();

        let ply = session.apply(Action::Place(pos(1, 2))).unwrap();

        assert_eq!(ply.turn, 0);
        assert_eq!(ply.player, Player::Black);
        assert_eq!(session.turn(), 1);
        assert_eq!(session.changed_cells(), vec![pos(1, 2), pos(2, 2)]);
        assert_eq!(session.previous(), &GameState::new(6).unwrap());
        assert_eq!(session.snapshot().current_player, 2);
    }

    #[test]
    fn illegal_action_leaves_session_untouched() {
        let mut session = Session::new(4).unwrap();
        let before = session.state().clone();

        let err = session.apply(Action::Place(pos(0, 0))).unwrap_err();

        assert!(matches!(err, ReversiError::IllegalMove { .. }));
        assert_eq!(session.state(), &before);
        assert!(session.record().is_empty());
    }

    #[test]
    fn t05_double_pass_ends_session_and_seals_record() {
        let mut session = Session::new(4).unwrap();
        session.apply(Action::Place(pos(0, 1))).unwrap();
        session.apply(Action::Pass).unwrap();
        let last = session.apply(Action::Pass).unwrap();

        assert!(last.game_over);
        assert_eq!(session.outcome(), Some(1));
        assert!(session.legal_moves().is_empty());
        assert!(session.snapshot().changed.is_empty());
        assert_eq!(
            session.record().final_board_crc,
            Some(session.state().board().fingerprint())
        );
        assert!(matches!(
            session.apply(Action::Pass),
            Err(ReversiError::GameOver)
        ));
    }

    #[test]
    fn from_record_rebuilds_the_same_session() {
        let mut session = Session::new(6).unwrap();
        session.apply(Action::Place(pos(1, 2))).unwrap();
        session.apply(Action::Place(pos(1, 1))).unwrap();

        let rebuilt = Session::from_record(session.record()).unwrap();

        assert_eq!(rebuilt.state(), session.state());
        assert_eq!(rebuilt.previous(), session.previous());
        assert_eq!(rebuilt.record(), session.record());
    }

    #[test]
    fn from_record_rejects_tampered_logs() {
        let mut session = Session::new(4).unwrap();
        session.apply(Action::Place(pos(0, 1))).unwrap();
        session.apply(Action::Pass).unwrap();
        session.apply(Action::Pass).unwrap();

        let mut wrong_reward = session.record().clone();
        wrong_reward.actions[2].1 = -1;
        assert!(matches!(
            Session::from_record(&wrong_reward),
            Err(ReversiError::ReplayMismatch { turn: 2, .. })
        ));

        let mut wrong_board = session.record().clone();
        wrong_board.final_board_crc = Some(0);
        assert!(matches!(
            Session::from_record(&wrong_board),
            Err(ReversiError::ReplayMismatch { .. })
        ));
    }
}
