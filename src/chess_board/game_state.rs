use super::attacks::square_is_attacked;
use super::board::Board;
use super::legality;
use super::model::{
    kingside_right, queenside_right, CastlingRights, ChessField, Move, MoveKind, Piece, PieceType, Player, Square,
};
use super::piece_rules::{candidate_moves, Candidates, RuleContext};
use crate::error::{ChessError, ChessResult};
use log::debug;
use std::fmt;

/// Authoritative state of one game.
///
/// Every applied move is pushed onto the move log together with the rights it
/// destroyed, so [`GameState::undo_move`] restores the previous state exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Player,
    king_positions: [ChessField; 2],
    castling_rights: CastlingRights,
    en_passant: Option<ChessField>,
    move_log: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            turn: Player::White,
            king_positions: [ChessField::new(0, 4), ChessField::new(7, 4)],
            castling_rights: [true; 4],
            en_passant: None,
            move_log: Vec::new(),
        }
    }

    /// Builds a position from a board diagram (see [`Board::from_diagram`]).
    ///
    /// Castling rights are granted wherever king and rook still stand on their
    /// home squares. No en-passant target is set.
    pub fn from_diagram(rows: &[&str; 8], turn: Player) -> ChessResult<Self> {
        Self::from_board(Board::from_diagram(rows)?, turn)
    }

    pub fn from_board(board: Board, turn: Player) -> ChessResult<Self> {
        let mut king_positions = [ChessField::new(0, 0); 2];
        for player in [Player::White, Player::Black] {
            let kings = board.find_kings(player);
            if kings.len() != 1 {
                return Err(ChessError::MissingKing {
                    player,
                    count: kings.len(),
                });
            }
            king_positions[player.index()] = kings[0];
        }

        let mut castling_rights = [false; 4];
        for player in [Player::White, Player::Black] {
            let row = player.back_row();
            let king_home = board.get(ChessField::new(row, 4)) == Square::Occupied(Piece::new(player, PieceType::King));
            let rook_on = |col| board.get(ChessField::new(row, col)) == Square::Occupied(Piece::new(player, PieceType::Rook));
            castling_rights[kingside_right(player)] = king_home && rook_on(7);
            castling_rights[queenside_right(player)] = king_home && rook_on(0);
        }

        Ok(Self {
            board,
            turn,
            king_positions,
            castling_rights,
            en_passant: None,
            move_log: Vec::new(),
        })
    }

    /// Back to the starting position with an empty log.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Contents of the square at `(row, col)`.
    pub fn get_piece(&self, row: i32, col: i32) -> ChessResult<Square> {
        Ok(self.board.get(ChessField::try_new(row, col)?))
    }

    /// True iff the square is on the board and holds a piece of the side to move.
    pub fn is_valid_piece(&self, row: i32, col: i32) -> bool {
        matches!(self.get_piece(row, col), Ok(Square::Occupied(piece)) if piece.player == self.turn)
    }

    pub fn whose_turn(&self) -> Player {
        self.turn
    }

    pub fn king_position(&self, player: Player) -> ChessField {
        self.king_positions[player.index()]
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<ChessField> {
        self.en_passant
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_log.last()
    }

    pub fn king_in_check(&self, player: Player) -> bool {
        square_is_attacked(&self.board, self.king_position(player), player.opponent())
    }

    pub(crate) fn rule_context(&self) -> RuleContext {
        RuleContext {
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        }
    }

    /// Destinations of the piece on `from` before the self-check filter.
    pub fn pseudo_legal_moves(&self, from: ChessField) -> Candidates {
        match self.board.get(from) {
            Square::Occupied(piece) => candidate_moves(&self.board, piece, from, &self.rule_context()),
            Square::Empty => Candidates::default(),
        }
    }

    /// Legal destinations of the piece on `from`, captures first.
    ///
    /// Empty when the square is empty or holds a piece of the side not on move.
    pub fn get_valid_moves(&self, from: ChessField) -> Vec<ChessField> {
        match self.board.get(from) {
            Square::Occupied(piece) if piece.player == self.turn => legality::legal_destinations(self, piece, from),
            _ => Vec::new(),
        }
    }

    /// Every legal `(from, to)` pair of the side to move, pieces in row-major order.
    pub fn all_legal_moves(&self) -> Vec<(ChessField, ChessField)> {
        self.board
            .pieces_of(self.turn)
            .flat_map(|(from, piece)| {
                legality::legal_destinations(self, piece, from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    /// Applies a move, promoting to a queen when a pawn reaches the last row.
    ///
    /// Moves from the user (`is_ai_move == false`) are validated against the
    /// legal destinations. Moves from the search are trusted to come from
    /// [`GameState::all_legal_moves`] and are applied directly.
    pub fn move_piece(&mut self, from: ChessField, to: ChessField, is_ai_move: bool) -> ChessResult<()> {
        self.move_piece_with_promotion(from, to, PieceType::Queen, is_ai_move)
    }

    pub fn move_piece_with_promotion(
        &mut self,
        from: ChessField,
        to: ChessField,
        promotion: PieceType,
        is_ai_move: bool,
    ) -> ChessResult<()> {
        if !promotion.is_promotion_target() {
            return Err(ChessError::InvalidPromotion { kind: promotion });
        }
        let piece = match self.board.get(from) {
            Square::Occupied(piece) => piece,
            Square::Empty => {
                debug!("rejected {}{}: no piece on {}", from, to, from);
                return Err(ChessError::EmptySquare { square: from });
            }
        };
        if !is_ai_move {
            if piece.player != self.turn {
                debug!("rejected {}{}: {} is not on move", from, to, piece.player);
                return Err(ChessError::NotYourPiece {
                    square: from,
                    owner: piece.player,
                    turn: self.turn,
                });
            }
            if !self.get_valid_moves(from).contains(&to) {
                debug!("rejected {}{}: not a legal destination", from, to);
                return Err(ChessError::IllegalMove { from, to });
            }
        }

        let mv = self.apply(piece, from, to, promotion);
        debug!("{} played {}", piece.player, mv);
        self.move_log.push(mv);
        Ok(())
    }

    fn apply(&mut self, piece: Piece, from: ChessField, to: ChessField, promotion: PieceType) -> Move {
        let prior_castling_rights = self.castling_rights;
        let prior_en_passant = self.en_passant;

        self.board.take(from);
        let mut captured_piece = self.board.take(to).piece();
        let mut kind = MoveKind::Normal;

        match piece.kind {
            PieceType::Pawn => {
                if captured_piece.is_none() && from.col != to.col && self.en_passant == Some(to) {
                    captured_piece = self.board.take(ChessField::new(from.row, to.col)).piece();
                    kind = MoveKind::EnPassant;
                } else if from.row.abs_diff(to.row) == 2 {
                    kind = MoveKind::DoublePawnPush;
                } else if to.row == piece.player.promotion_row() {
                    kind = MoveKind::Promotion(promotion);
                }
            }
            PieceType::King => {
                if from.col.abs_diff(to.col) == 2 {
                    let (rook_from, rook_to) = if to.col > from.col {
                        (ChessField::new(from.row, 7), ChessField::new(from.row, 5))
                    } else {
                        (ChessField::new(from.row, 0), ChessField::new(from.row, 3))
                    };
                    let rook = self.board.take(rook_from);
                    self.board.set(rook_to, rook);
                    kind = MoveKind::Castle { rook_from, rook_to };
                }
                self.king_positions[piece.player.index()] = to;
            }
            _ => {}
        }

        let placed = match kind {
            MoveKind::Promotion(promoted) => Piece::new(piece.player, promoted),
            _ => piece,
        };
        self.board.set(to, Square::Occupied(placed));

        self.clear_castling_rights(from);
        self.clear_castling_rights(to);

        self.en_passant = match kind {
            MoveKind::DoublePawnPush => Some(ChessField::new((from.row + to.row) / 2, from.col)),
            _ => None,
        };

        self.turn = piece.player.opponent();
        let resulting_in_check = self.king_in_check(self.turn);

        Move {
            moving_piece: piece,
            from,
            to,
            captured_piece,
            kind,
            resulting_in_check,
            prior_castling_rights,
            prior_en_passant,
        }
    }

    /// A king or rook leaving its home square, or anything landing on a rook's
    /// home square, ends the matching castling right.
    fn clear_castling_rights(&mut self, field: ChessField) {
        for player in [Player::White, Player::Black] {
            let row = player.back_row();
            if field.row != row {
                continue;
            }
            match field.col {
                0 => self.castling_rights[queenside_right(player)] = false,
                7 => self.castling_rights[kingside_right(player)] = false,
                4 => {
                    self.castling_rights[queenside_right(player)] = false;
                    self.castling_rights[kingside_right(player)] = false;
                }
                _ => {}
            }
        }
    }

    /// Reverts the most recent move. Returns `None` when the log is empty.
    pub fn undo_move(&mut self) -> Option<Move> {
        let Some(mv) = self.move_log.pop() else {
            debug!("undo requested with an empty move log");
            return None;
        };
        let player = mv.moving_piece.player;

        self.board.set(mv.from, Square::Occupied(mv.moving_piece));
        self.board.set(mv.to, Square::Empty);
        match mv.kind {
            MoveKind::Castle { rook_from, rook_to } => {
                let rook = self.board.take(rook_to);
                self.board.set(rook_from, rook);
            }
            _ => {
                if let Some(captured) = mv.captured_piece {
                    self.board.set(mv.captured_at(), Square::Occupied(captured));
                }
            }
        }
        if mv.moving_piece.kind == PieceType::King {
            self.king_positions[player.index()] = mv.from;
        }

        self.castling_rights = mv.prior_castling_rights;
        self.en_passant = mv.prior_en_passant;
        self.turn = player;
        debug!("undid {}", mv);
        Some(mv)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{} to move", self.turn)
    }
}
