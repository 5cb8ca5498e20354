use crate::chess_board::{GameState, GameStatus, PieceType, Player};

/// Base score of a checkmate. The remaining search depth is added so that a
/// quicker mate is preferred.
pub const MATE_SCORE: i32 = 1_000_000;
pub const DRAW: i32 = 0;

// Tables are written from White's point of view with rank 8 in the first
// row, so White pieces look up row `7 - row` and Black pieces row `row`.

#[rustfmt::skip]
const PAWN_SQUARE_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_SQUARE_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_SQUARE_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const KING_SQUARE_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

/// Static score of the position from `player`'s point of view: material plus
/// piece placement, positive when `player` stands better.
pub fn evaluate(state: &GameState, player: Player) -> i32 {
    let mut evaluation = 0;

    for (field, piece) in state.board().pieces() {
        let row = field.row as usize;
        let col = field.col as usize;
        let psq_row = match piece.player {
            Player::White => 7 - row,
            Player::Black => row,
        };

        // Both kings are always present, so their material cancels out.
        let piece_value = match piece.kind {
            PieceType::King => 0,
            kind => kind.value(),
        };
        let position_value = match piece.kind {
            PieceType::Pawn => PAWN_SQUARE_TABLE[psq_row][col],
            PieceType::Knight => KNIGHT_SQUARE_TABLE[psq_row][col],
            PieceType::Bishop => BISHOP_SQUARE_TABLE[psq_row][col],
            PieceType::King => KING_SQUARE_TABLE[psq_row][col],
            PieceType::Rook | PieceType::Queen => 0,
        };

        let piece_evaluation = piece_value + position_value;
        evaluation += if piece.player == player {
            piece_evaluation
        } else {
            -piece_evaluation
        };
    }

    evaluation
}

/// Score of a finished game for `player`, `None` while it is still running.
pub fn terminal_score(status: GameStatus, player: Player, depth: u32) -> Option<i32> {
    match status.winner() {
        Some(winner) if winner == player => Some(MATE_SCORE + depth as i32),
        Some(_) => Some(-(MATE_SCORE + depth as i32)),
        None if status == GameStatus::Stalemate => Some(DRAW),
        None => None,
    }
}
