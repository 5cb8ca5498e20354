use super::evaluation::{evaluate, terminal_score};
use super::{ChessEngine, SearchOutcome};
use crate::chess_board::{ChessField, GameState, Player, ScopedMove};
use crate::config::SearchConfig;
use crate::error::{ChessError, ChessResult};
use log::info;

/// Exhaustive minimax without pruning.
///
/// Much slower than [`super::AlphaBetaEngine`]; it is kept as the reference
/// the pruning search is measured and checked against.
#[derive(Debug, Default)]
pub struct MinimaxEngine {
    node_count: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn find_best_move(
        &mut self,
        state: &mut GameState,
        depth: u32,
        maximizing: bool,
        player: Player,
    ) -> ChessResult<SearchOutcome> {
        self.node_count = 0;
        let mut best: Option<((ChessField, ChessField), i32)> = None;

        for (from, to) in state.all_legal_moves() {
            let value = {
                let mut child = ScopedMove::apply(state, from, to)?;
                self.minimax(&mut child, depth.saturating_sub(1), !maximizing, player)?
            };
            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some(((from, to), value));
            }
        }

        let Some((best_move, value)) = best else {
            return Err(ChessError::NoLegalMoves {
                player: state.whose_turn(),
            });
        };
        info!(
            "minimax depth {} picked {}{} with score {} after {} nodes",
            depth, best_move.0, best_move.1, value, self.node_count
        );
        Ok(SearchOutcome {
            best_move,
            value,
            nodes: self.node_count,
        })
    }

    fn minimax(&mut self, state: &mut GameState, depth: u32, maximizing: bool, player: Player) -> ChessResult<i32> {
        self.node_count += 1;

        let moves = if depth == 0 { Vec::new() } else { state.all_legal_moves() };
        if moves.is_empty() {
            let status = state.checkmate_stalemate_checker();
            return Ok(terminal_score(status, player, depth).unwrap_or_else(|| evaluate(state, player)));
        }

        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        for (from, to) in moves {
            let mut child = ScopedMove::apply(state, from, to)?;
            let score = self.minimax(&mut child, depth - 1, !maximizing, player)?;
            best_score = if maximizing {
                best_score.max(score)
            } else {
                best_score.min(score)
            };
        }
        Ok(best_score)
    }
}

impl ChessEngine for MinimaxEngine {
    fn name(&self) -> &str {
        "minimax"
    }

    fn search(&mut self, state: &mut GameState, config: &SearchConfig, player: Player) -> ChessResult<SearchOutcome> {
        let maximizing = state.whose_turn() == player;
        self.find_best_move(state, config.depth, maximizing, player)
    }
}
