use crate::chess_board::{ChessField, GameState, Player};
use crate::config::SearchConfig;
use crate::error::ChessResult;

pub mod engine_alpha_beta;
pub mod engine_minmax;
pub mod evaluation;

pub use engine_alpha_beta::{choose_move, AlphaBetaEngine};
pub use engine_minmax::MinimaxEngine;

/// Result of a fixed-depth root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: (ChessField, ChessField),
    /// Score of the best move from the searching player's point of view.
    pub value: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

pub trait ChessEngine {
    fn name(&self) -> &str;

    /// Picks a move for the side to move in `state`, scored for `player`.
    ///
    /// `state` is returned unchanged.
    fn search(&mut self, state: &mut GameState, config: &SearchConfig, player: Player) -> ChessResult<SearchOutcome>;
}
