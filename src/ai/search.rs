use crate::error::Result;
use crate::state::GameState;
use crate::types::{Action, Player};

/// A two-player position that [`alphabeta`] can search.
///
/// Values are oriented from Black's side: Black maximizes, White minimizes.
pub trait SearchState: Sized {
    type Action: Copy;

    /// Placements for the side to move. Empty means a forced pass.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// The action substituted when `legal_actions` is empty.
    fn pass_action() -> Self::Action;

    /// Returns `(child, reward, game_over)`, or an error when `action` is
    /// not playable here.
    fn act(&self, action: Self::Action) -> Result<(Self, f64, bool)>;

    fn current_player(&self) -> Player;
}

impl SearchState for GameState {
    type Action = Action;

    fn legal_actions(&self) -> Vec<Action> {
        GameState::legal_actions(self)
    }

    fn pass_action() -> Action {
        Action::Pass
    }

    fn act(&self, action: Action) -> Result<(Self, f64, bool)> {
        let transition = GameState::act(self, action)?;
        Ok((
            transition.state,
            f64::from(transition.reward),
            transition.game_over,
        ))
    }

    fn current_player(&self) -> Player {
        GameState::current_player(self)
    }
}

/// Depth-limited minimax with alpha-beta pruning.
///
/// Actions are visited in the order `legal_actions` yields them. A child
/// that ends the game is valued at its reward instead of being searched.
/// Fails only if the state rejects one of its own actions.
pub fn alphabeta<S, H>(
    state: &S,
    depth: u32,
    mut alpha: f64,
    mut beta: f64,
    heuristic: &H,
) -> Result<f64>
where
    S: SearchState,
    H: Fn(&S) -> f64 + ?Sized,
{
    if depth == 0 {
        return Ok(heuristic(state));
    }

    let mut actions = state.legal_actions();
    if actions.is_empty() {
        actions.push(S::pass_action());
    }

    match state.current_player() {
        Player::Black => {
            let mut value = f64::NEG_INFINITY;
            for action in actions {
                let (child, reward, game_over) = state.act(action)?;
                let child_value = if game_over {
                    reward
                } else {
                    alphabeta(&child, depth - 1, alpha, beta, heuristic)?
                };
                value = value.max(child_value);
                if value > beta {
                    break;
                }
                alpha = alpha.max(value);
            }
            Ok(value)
        }
        Player::White => {
            let mut value = f64::INFINITY;
            for action in actions {
                let (child, reward, game_over) = state.act(action)?;
                let child_value = if game_over {
                    reward
                } else {
                    alphabeta(&child, depth - 1, alpha, beta, heuristic)?
                };
                value = value.min(child_value);
                if value < alpha {
                    break;
                }
                beta = beta.min(value);
            }
            Ok(value)
        }
    }
}

/// Full-width minimax without pruning. Same leaf and terminal rules as
/// [`alphabeta`]; useful as a reference value.
pub fn minimax<S, H>(state: &S, depth: u32, heuristic: &H) -> Result<f64>
where
    S: SearchState,
    H: Fn(&S) -> f64 + ?Sized,
{
    if depth == 0 {
        return Ok(heuristic(state));
    }

    let mut actions = state.legal_actions();
    if actions.is_empty() {
        actions.push(S::pass_action());
    }

    let maximizing = state.current_player() == Player::Black;
    let mut value = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for action in actions {
        let (child, reward, game_over) = state.act(action)?;
        let child_value = if game_over {
            reward
        } else {
            minimax(&child, depth - 1, heuristic)?
        };
        value = if maximizing {
            value.max(child_value)
        } else {
            value.min(child_value)
        };
    }
    Ok(value)
}
