use super::game_state::GameState;
use super::model::ChessField;
use crate::error::ChessResult;
use std::ops::{Deref, DerefMut};

/// A move applied to a [`GameState`] for the lifetime of the guard.
///
/// Dropping the guard undoes the move, so a search can explore a line and
/// leave the caller's state exactly as it found it on every exit path.
pub struct ScopedMove<'a> {
    state: &'a mut GameState,
}

impl<'a> ScopedMove<'a> {
    /// Applies a move taken from [`GameState::all_legal_moves`].
    pub fn apply(state: &'a mut GameState, from: ChessField, to: ChessField) -> ChessResult<Self> {
        state.move_piece(from, to, true)?;
        Ok(Self { state })
    }
}

impl Deref for ScopedMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.state.undo_move();
    }
}
