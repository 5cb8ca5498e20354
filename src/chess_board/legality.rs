use super::attacks::square_is_attacked;
use super::board::Board;
use super::game_state::GameState;
use super::model::{ChessField, Piece, PieceType, Square};
use super::piece_rules::candidate_moves;

/// Pseudo-legal destinations of `piece` on `from` that keep its own king safe.
pub(crate) fn legal_destinations(state: &GameState, piece: Piece, from: ChessField) -> Vec<ChessField> {
    candidate_moves(state.board(), piece, from, &state.rule_context())
        .into_destinations()
        .filter(|&to| !exposes_king(state, piece, from, to))
        .collect()
}

/// Stops at the first legal move found.
pub(crate) fn has_legal_move(state: &GameState) -> bool {
    let context = state.rule_context();
    state.board().pieces_of(state.whose_turn()).any(|(from, piece)| {
        candidate_moves(state.board(), piece, from, &context)
            .into_destinations()
            .any(|to| !exposes_king(state, piece, from, to))
    })
}

fn exposes_king(state: &GameState, piece: Piece, from: ChessField, to: ChessField) -> bool {
    let board = board_after(state.board(), piece, from, to, state.en_passant());
    let king = if piece.kind == PieceType::King {
        to
    } else {
        state.king_position(piece.player)
    };
    square_is_attacked(&board, king, piece.player.opponent())
}

/// Piece placement after the move, on a scratch copy.
fn board_after(board: &Board, piece: Piece, from: ChessField, to: ChessField, en_passant: Option<ChessField>) -> Board {
    let mut scratch = board.clone();
    scratch.take(from);
    match piece.kind {
        PieceType::Pawn if from.col != to.col && board.get(to).is_empty() && en_passant == Some(to) => {
            scratch.take(ChessField::new(from.row, to.col));
        }
        PieceType::King if from.col.abs_diff(to.col) == 2 => {
            let (rook_from, rook_to) = if to.col > from.col { (7, 5) } else { (0, 3) };
            let rook = scratch.take(ChessField::new(from.row, rook_from));
            scratch.set(ChessField::new(from.row, rook_to), rook);
        }
        _ => {}
    }
    scratch.set(to, Square::Occupied(piece));
    scratch
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{assert_fields, field};
    use super::*;
    use crate::chess_board::Player;

    #[test]
    fn test_pinned_piece() {
        let rows = [".k......", "........", "........", "........", "...q....", "........", ".R......", "K......."];
        let state = GameState::from_diagram(&rows, Player::White).unwrap();
        assert!(state.get_valid_moves(field("b2")).is_empty());
        assert_fields(state.get_valid_moves(field("a1")), vec!["a2", "b1"]);
        assert_eq!(state.all_legal_moves().len(), 2);
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let rows = ["....k...", "........", "........", "........", "........", "........", "...r....", "....K..."];
        let state = GameState::from_diagram(&rows, Player::White).unwrap();
        // d2 rook covers the second rank and the d-file
        assert_fields(state.get_valid_moves(field("e1")), vec!["d2", "f1"]);
    }

    #[test]
    fn test_check_must_be_answered() {
        let rows = ["....k...", "........", "........", "........", "....r...", "........", "...P.P..", "...QKB.."];
        let state = GameState::from_diagram(&rows, Player::White).unwrap();
        assert!(state.king_in_check(Player::White));
        // Only the two interpositions on e2 remain
        assert_eq!(
            state.all_legal_moves(),
            vec![(field("d1"), field("e2")), (field("f1"), field("e2"))]
        );
    }

    #[test]
    fn test_en_passant_exposing_the_king_is_refused() {
        let rows = ["....k...", "..p.....", "........", "KP.....r", "........", "........", "........", "........"];
        let mut state = GameState::from_diagram(&rows, Player::Black).unwrap();
        state.move_piece(field("c7"), field("c5"), false).unwrap();
        assert_eq!(state.en_passant(), Some(field("c6")));
        // Removing both pawns would open the fifth rank to the rook
        assert_fields(state.get_valid_moves(field("b5")), vec!["b6"]);

        let rows = ["....k...", "..p.....", "........", "KP......", "........", "........", "........", "........"];
        let mut state = GameState::from_diagram(&rows, Player::Black).unwrap();
        state.move_piece(field("c7"), field("c5"), false).unwrap();
        assert_fields(state.get_valid_moves(field("b5")), vec!["b6", "c6"]);
    }
}
