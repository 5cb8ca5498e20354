use super::evaluation::{evaluate, terminal_score};
use super::{ChessEngine, SearchOutcome};
use crate::chess_board::{ChessField, GameState, Player, ScopedMove};
use crate::config::SearchConfig;
use crate::error::{ChessError, ChessResult};
use log::{info, trace};

/// Fixed-depth minimax with alpha-beta pruning.
#[derive(Debug, Default)]
pub struct AlphaBetaEngine {
    node_count: u64,
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last search.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Searches `depth` plies and returns the best root move for the side to move.
    ///
    /// `maximizing` tells whether the side to move is `player`, the side the
    /// scores are computed for. Among equally scored moves the first one in
    /// generation order wins. A depth of 0 is treated as 1.
    pub fn choose_move(
        &mut self,
        state: &mut GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> ChessResult<SearchOutcome> {
        self.node_count = 0;
        let moves = state.all_legal_moves();
        if moves.is_empty() {
            return Err(ChessError::NoLegalMoves {
                player: state.whose_turn(),
            });
        }

        let mut best: Option<((ChessField, ChessField), i32)> = None;
        for (from, to) in moves {
            let value = {
                let mut child = ScopedMove::apply(state, from, to)?;
                self.alpha_beta(&mut child, depth.saturating_sub(1), alpha, beta, !maximizing, player)?
            };
            trace!("{}{} scores {}", from, to, value);

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some(((from, to), value));
            }

            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        let Some((best_move, value)) = best else {
            return Err(ChessError::NoLegalMoves {
                player: state.whose_turn(),
            });
        };
        info!(
            "alpha-beta depth {} picked {}{} with score {} after {} nodes",
            depth, best_move.0, best_move.1, value, self.node_count
        );
        Ok(SearchOutcome {
            best_move,
            value,
            nodes: self.node_count,
        })
    }

    fn alpha_beta(
        &mut self,
        state: &mut GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> ChessResult<i32> {
        self.node_count += 1;

        if depth == 0 {
            let status = state.checkmate_stalemate_checker();
            return Ok(terminal_score(status, player, depth).unwrap_or_else(|| evaluate(state, player)));
        }

        let moves = state.all_legal_moves();
        if moves.is_empty() {
            let status = state.checkmate_stalemate_checker();
            return Ok(terminal_score(status, player, depth).unwrap_or_else(|| evaluate(state, player)));
        }

        if maximizing {
            let mut value = i32::MIN;
            for (from, to) in moves {
                let mut child = ScopedMove::apply(state, from, to)?;
                value = value.max(self.alpha_beta(&mut child, depth - 1, alpha, beta, false, player)?);
                alpha = alpha.max(value);
                if alpha >= beta {
                    break; // Beta cutoff
                }
            }
            Ok(value)
        } else {
            let mut value = i32::MAX;
            for (from, to) in moves {
                let mut child = ScopedMove::apply(state, from, to)?;
                value = value.min(self.alpha_beta(&mut child, depth - 1, alpha, beta, true, player)?);
                beta = beta.min(value);
                if alpha >= beta {
                    break; // Alpha cutoff
                }
            }
            Ok(value)
        }
    }
}

impl ChessEngine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn search(&mut self, state: &mut GameState, config: &SearchConfig, player: Player) -> ChessResult<SearchOutcome> {
        let maximizing = state.whose_turn() == player;
        self.choose_move(state, config.depth, config.alpha, config.beta, maximizing, player)
    }
}

/// Best `(from, to)` for the side to move; `state` is left unchanged.
pub fn choose_move(
    game_state: &mut GameState,
    depth: u32,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    player: Player,
) -> ChessResult<(ChessField, ChessField)> {
    AlphaBetaEngine::new()
        .choose_move(game_state, depth, alpha, beta, maximizing, player)
        .map(|outcome| outcome.best_move)
}
