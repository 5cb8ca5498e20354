//! Per-piece movement rules.
//!
//! Everything here is a pure function of a board snapshot: the rules know
//! nothing about the side to move and do not care whether the mover's own
//! king ends up attacked. That filtering happens in [`super::legality`].

use super::attacks::square_is_attacked;
use super::board::Board;
use super::model::{kingside_right, queenside_right, CastlingRights, ChessField, Piece, PieceType, Square};

pub(crate) const KNIGHT_MOVES: [(i32, i32); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
pub(crate) const KING_MOVES: [(i32, i32); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const QUEEN_DIRECTIONS: [(i32, i32); 8] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Rights that extend the basic piece patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleContext {
    pub castling_rights: CastlingRights,
    pub en_passant: Option<ChessField>,
}

/// Destinations of one piece, split by whether an opposing piece is taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub peaceful: Vec<ChessField>,
    pub capturing: Vec<ChessField>,
}

impl Candidates {
    /// Captures first, then quiet moves.
    pub fn into_destinations(self) -> impl Iterator<Item = ChessField> {
        self.capturing.into_iter().chain(self.peaceful)
    }

    pub fn len(&self) -> usize {
        self.peaceful.len() + self.capturing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, board: &Board, piece: Piece, to: ChessField) {
        match board.get(to) {
            Square::Empty => self.peaceful.push(to),
            Square::Occupied(other) if other.player != piece.player => self.capturing.push(to),
            Square::Occupied(_) => {}
        }
    }
}

/// Pseudo-legal destinations of `piece` standing on `from`.
pub fn candidate_moves(board: &Board, piece: Piece, from: ChessField, context: &RuleContext) -> Candidates {
    match piece.kind {
        PieceType::Pawn => pawn_moves(board, piece, from, context.en_passant),
        PieceType::Knight => step_moves(board, piece, from, &KNIGHT_MOVES),
        PieceType::Bishop => sliding_moves(board, piece, from, &BISHOP_DIRECTIONS),
        PieceType::Rook => sliding_moves(board, piece, from, &ROOK_DIRECTIONS),
        PieceType::Queen => sliding_moves(board, piece, from, &QUEEN_DIRECTIONS),
        PieceType::King => king_moves(board, piece, from, &context.castling_rights),
    }
}

fn pawn_moves(board: &Board, piece: Piece, from: ChessField, en_passant: Option<ChessField>) -> Candidates {
    let mut moves = Candidates::default();
    let forward = piece.player.forward();

    if let Some(one_step) = from.offset(forward, 0) {
        if board.get(one_step).is_empty() {
            moves.peaceful.push(one_step);

            if from.row == piece.player.pawn_start_row() {
                if let Some(two_steps) = from.offset(2 * forward, 0) {
                    if board.get(two_steps).is_empty() {
                        moves.peaceful.push(two_steps);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(target) = from.offset(forward, dc) else {
            continue;
        };
        match board.get(target) {
            Square::Occupied(other) if other.player != piece.player => moves.capturing.push(target),
            Square::Empty if en_passant == Some(target) => moves.capturing.push(target),
            _ => {}
        }
    }

    moves
}

fn step_moves(board: &Board, piece: Piece, from: ChessField, offsets: &[(i32, i32)]) -> Candidates {
    let mut moves = Candidates::default();
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            moves.push(board, piece, to);
        }
    }
    moves
}

fn sliding_moves(board: &Board, piece: Piece, from: ChessField, directions: &[(i32, i32)]) -> Candidates {
    let mut moves = Candidates::default();
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            moves.push(board, piece, to);
            if !board.get(to).is_empty() {
                break;
            }
            current = to;
        }
    }
    moves
}

fn king_moves(board: &Board, piece: Piece, from: ChessField, castling_rights: &CastlingRights) -> Candidates {
    let mut moves = step_moves(board, piece, from, &KING_MOVES);

    let row = piece.player.back_row();
    if from != ChessField::new(row, 4) {
        return moves;
    }
    let opponent = piece.player.opponent();
    let rook = Square::Occupied(Piece::new(piece.player, PieceType::Rook));
    let empty = |col: u8| board.get(ChessField::new(row, col)).is_empty();
    let safe = |col: u8| !square_is_attacked(board, ChessField::new(row, col), opponent);

    if castling_rights[kingside_right(piece.player)]
        && board.get(ChessField::new(row, 7)) == rook
        && empty(5)
        && empty(6)
        && safe(4)
        && safe(5)
        && safe(6)
    {
        moves.peaceful.push(ChessField::new(row, 6));
    }

    if castling_rights[queenside_right(piece.player)]
        && board.get(ChessField::new(row, 0)) == rook
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(4)
        && safe(3)
        && safe(2)
    {
        moves.peaceful.push(ChessField::new(row, 2));
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{assert_fields, field};
    use super::*;
    use crate::chess_board::Player;

    fn white(kind: PieceType) -> Piece {
        Piece::new(Player::White, kind)
    }

    fn black(kind: PieceType) -> Piece {
        Piece::new(Player::Black, kind)
    }

    fn place(pieces: &[(&str, Piece)]) -> Board {
        let mut board = Board::empty();
        for (square, piece) in pieces {
            board.set(field(square), Square::Occupied(*piece));
        }
        board
    }

    #[test]
    fn test_knight_in_the_middle_has_eight_peaceful_moves() {
        let knight = white(PieceType::Knight);
        let board = place(&[("f4", knight)]);
        let moves = candidate_moves(&board, knight, ChessField::new(3, 5), &RuleContext::default());
        let expected = [(2, 3), (1, 4), (1, 6), (2, 7), (4, 7), (5, 6), (5, 4), (4, 3)];
        let mut peaceful = moves.peaceful.clone();
        peaceful.sort();
        let mut expected: Vec<_> = expected.iter().map(|&(r, c)| ChessField::new(r, c)).collect();
        expected.sort();
        assert_eq!(peaceful, expected);
        assert!(moves.capturing.is_empty());
    }

    #[test]
    fn test_knight_in_the_corner() {
        let knight = black(PieceType::Knight);
        let board = place(&[("a1", knight)]);
        let moves = candidate_moves(&board, knight, ChessField::new(0, 0), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["c2", "b3"]);
        assert!(moves.capturing.is_empty());
    }

    #[test]
    fn test_knight_splits_captures_from_quiet_moves() {
        let knight = white(PieceType::Knight);
        let pawn = black(PieceType::Pawn);
        let own = white(PieceType::Pawn);
        // Six opposing pieces, one own piece and one free square around f4
        let board = place(&[
            ("f4", knight),
            ("d3", pawn),
            ("e2", pawn),
            ("g2", pawn),
            ("h3", pawn),
            ("h5", pawn),
            ("g6", pawn),
            ("e6", own),
        ]);
        let moves = candidate_moves(&board, knight, field("f4"), &RuleContext::default());
        assert_fields(moves.peaceful.clone(), vec!["d5"]);
        assert_fields(moves.capturing.clone(), vec!["d3", "e2", "g2", "h3", "h5", "g6"]);
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn test_pawn_moves() {
        let pawn = white(PieceType::Pawn);
        let board = place(&[("e2", pawn)]);
        let moves = candidate_moves(&board, pawn, field("e2"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["e3", "e4"]);

        // Blocked pawn on a3
        let board = place(&[("a3", pawn), ("a4", black(PieceType::Pawn))]);
        assert!(candidate_moves(&board, pawn, field("a3"), &RuleContext::default()).is_empty());

        // Double step blocked on the second square
        let black_pawn = black(PieceType::Pawn);
        let board = place(&[("a7", black_pawn), ("a5", black_pawn)]);
        let moves = candidate_moves(&board, black_pawn, field("a7"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["a6"]);

        // Captures on both sides, own piece is not a target
        let board = place(&[("b7", black_pawn), ("a6", pawn), ("c6", black_pawn)]);
        let moves = candidate_moves(&board, black_pawn, field("b7"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["b6", "b5"]);
        assert_fields(moves.capturing, vec!["a6"]);
    }

    #[test]
    fn test_pawn_en_passant_target_counts_as_capture() {
        let pawn = white(PieceType::Pawn);
        let board = place(&[("e5", pawn), ("f5", black(PieceType::Pawn)), ("d6", black(PieceType::Pawn))]);
        let context = RuleContext {
            en_passant: Some(field("f6")),
            ..RuleContext::default()
        };
        let moves = candidate_moves(&board, pawn, field("e5"), &context);
        assert_fields(moves.peaceful, vec!["e6"]);
        assert_fields(moves.capturing, vec!["d6", "f6"]);
    }

    #[test]
    fn test_sliding_pieces_stop_at_blockers() {
        let bishop = white(PieceType::Bishop);
        let board = place(&[("f6", bishop), ("g7", black(PieceType::Rook)), ("d4", white(PieceType::Pawn))]);
        let moves = candidate_moves(&board, bishop, field("f6"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["d8", "e7", "g5", "h4", "e5"]);
        assert_fields(moves.capturing, vec!["g7"]);

        let rook = white(PieceType::Rook);
        let board = place(&[("e4", rook), ("d4", black(PieceType::Bishop)), ("e2", white(PieceType::Knight))]);
        let moves = candidate_moves(&board, rook, field("e4"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["e3", "e5", "e6", "e7", "e8", "f4", "g4", "h4"]);
        assert_fields(moves.capturing, vec!["d4"]);

        let queen = black(PieceType::Queen);
        let board = place(&[("d4", queen)]);
        assert_eq!(candidate_moves(&board, queen, field("d4"), &RuleContext::default()).len(), 27);
    }

    #[test]
    fn test_king_castling() {
        let king = white(PieceType::King);
        let rook = white(PieceType::Rook);
        let board = place(&[("e1", king), ("a1", rook), ("h1", rook)]);
        let all_rights = RuleContext {
            castling_rights: [true; 4],
            en_passant: None,
        };
        let moves = candidate_moves(&board, king, field("e1"), &all_rights);
        assert_fields(moves.peaceful, vec!["d1", "d2", "e2", "f2", "f1", "g1", "c1"]);

        // Without rights only the ordinary steps remain
        let moves = candidate_moves(&board, king, field("e1"), &RuleContext::default());
        assert_fields(moves.peaceful, vec!["d1", "d2", "e2", "f2", "f1"]);

        // A rook on f8 covers f1, so the king may not pass it
        let board = place(&[("e1", king), ("a1", rook), ("h1", rook), ("f8", black(PieceType::Rook))]);
        let moves = candidate_moves(&board, king, field("e1"), &all_rights);
        assert_fields(moves.peaceful, vec!["d1", "d2", "e2", "f2", "f1", "c1"]);

        // A knight on b1 blocks the queen side
        let board = place(&[("e1", king), ("a1", rook), ("h1", rook), ("b1", white(PieceType::Knight))]);
        let moves = candidate_moves(&board, king, field("e1"), &all_rights);
        assert_fields(moves.peaceful, vec!["d1", "d2", "e2", "f2", "f1", "g1"]);
    }

    #[test]
    fn test_black_king_castling_while_in_check_is_refused() {
        let king = black(PieceType::King);
        let rook = black(PieceType::Rook);
        let board = place(&[("e8", king), ("a8", rook), ("h8", rook), ("e1", white(PieceType::Rook))]);
        let context = RuleContext {
            castling_rights: [false, false, true, true],
            en_passant: None,
        };
        let moves = candidate_moves(&board, king, field("e8"), &context);
        assert!(!moves.peaceful.contains(&field("g8")));
        assert!(!moves.peaceful.contains(&field("c8")));
    }
}
