use super::game_state::GameState;
use super::scoped_move::ScopedMove;
use crate::error::ChessResult;

/// Number of leaf positions `depth` plies below the current one.
pub fn perft(state: &mut GameState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1u64);
    }

    let mut node_count = 0u64;
    for (from, to) in state.all_legal_moves() {
        let mut child = ScopedMove::apply(state, from, to)?;
        node_count += perft(&mut child, depth - 1)?;
    }
    Ok(node_count)
}

/// Leaf counts per root move, in move generation order.
pub fn perft_divide(state: &mut GameState, depth: u8) -> ChessResult<Vec<(String, u64)>> {
    let mut divide = Vec::new();
    for (from, to) in state.all_legal_moves() {
        let mut child = ScopedMove::apply(state, from, to)?;
        let nodes = perft(&mut child, depth.saturating_sub(1))?;
        divide.push((format!("{}{}", from, to), nodes));
    }
    Ok(divide)
}
