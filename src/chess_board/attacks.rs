use super::board::Board;
use super::model::{ChessField, PieceType, Player, Square};
use super::piece_rules::{BISHOP_DIRECTIONS, KING_MOVES, KNIGHT_MOVES, ROOK_DIRECTIONS};

/// Whether any piece of `by_player` could capture on `target`.
///
/// The square may be empty or hold a piece of either colour; only the capture
/// patterns matter. Instead of generating every opposing move the scan starts
/// at the target and walks outward along each pattern.
pub fn square_is_attacked(board: &Board, target: ChessField, by_player: Player) -> bool {
    let attacker_of_kind = |field: ChessField, kinds: &[PieceType]| match board.get(field) {
        Square::Occupied(piece) => piece.player == by_player && kinds.contains(&piece.kind),
        Square::Empty => false,
    };

    for (directions, sliders) in [
        (&ROOK_DIRECTIONS, [PieceType::Rook, PieceType::Queen]),
        (&BISHOP_DIRECTIONS, [PieceType::Bishop, PieceType::Queen]),
    ] {
        for &(dr, dc) in directions {
            let mut current = target;
            while let Some(next) = current.offset(dr, dc) {
                if !board.get(next).is_empty() {
                    if attacker_of_kind(next, &sliders) {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
    }

    // A pawn attacks diagonally forward, so it sits one row behind the target
    // from its own point of view.
    let pawn_row = -by_player.forward();
    for dc in [-1, 1] {
        if let Some(field) = target.offset(pawn_row, dc) {
            if attacker_of_kind(field, &[PieceType::Pawn]) {
                return true;
            }
        }
    }

    let hits = |offsets: &[(i32, i32)], kind: PieceType| {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| target.offset(dr, dc))
            .any(|field| attacker_of_kind(field, &[kind]))
    };

    hits(&KNIGHT_MOVES, PieceType::Knight) || hits(&KING_MOVES, PieceType::King)
}
