use crate::error::{ChessError, ChessResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Index into per-player arrays (king positions, statistics).
    pub fn index(&self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    /// Row direction of a pawn advance.
    pub fn forward(&self) -> i32 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    pub fn back_row(&self) -> u8 {
        match self {
            Player::White => 0,
            Player::Black => 7,
        }
    }

    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }

    pub fn promotion_row(&self) -> u8 {
        match self {
            Player::White => 7,
            Player::Black => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Material value in centipawns.
    pub fn value(&self) -> i32 {
        match self {
            PieceType::Pawn => 100,
            PieceType::Knight => 320,
            PieceType::Bishop => 330,
            PieceType::Rook => 500,
            PieceType::Queen => 900,
            PieceType::King => 20_000,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn is_promotion_target(&self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceType,
}

impl Piece {
    pub fn new(player: Player, kind: PieceType) -> Self {
        Self { player, kind }
    }

    /// Uppercase for White, lowercase for Black.
    pub fn to_char(&self) -> char {
        match self.player {
            Player::White => self.kind.symbol(),
            Player::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceType::from_symbol(c)?;
        let player = if c.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Some(Self { player, kind })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

impl Square {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Occupied(piece) => Some(*piece),
            Square::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Square::Empty
    }

    pub fn is_occupied_by(&self, player: Player) -> bool {
        matches!(self, Square::Occupied(piece) if piece.player == player)
    }
}

/// A square on the board. Row 0 is rank 1 and column 0 is file a.
///
/// Outside the crate a field can only be built through [`ChessField::try_new`]
/// or [`ChessField::from_algebraic`], so every field handed to a
/// [`GameState`](super::GameState) is on the board.
///
/// ```compile_fail
/// let off_board = chessmate::ChessField::new(8, 0);
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    pub(crate) row: u8,
    pub(crate) col: u8,
}

impl ChessField {
    pub(crate) fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Checked constructor for coordinates coming from callers.
    pub fn try_new(row: i32, col: i32) -> ChessResult<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Self::new(row as u8, col as u8))
        } else {
            Err(ChessError::OutOfRange { row, col })
        }
    }

    /// The square `(row + dr, col + dc)` if it is still on the board.
    pub fn offset(&self, dr: i32, dc: i32) -> Option<Self> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> ChessResult<Self> {
        let invalid = || ChessError::InvalidAlgebraic {
            text: algebraic.to_string(),
        };
        let mut chars = algebraic.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Self::new(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Castling availability in the order White king side, White queen side,
/// Black king side, Black queen side.
pub type CastlingRights = [bool; 4];

pub fn kingside_right(player: Player) -> usize {
    player.index() * 2
}

pub fn queenside_right(player: Player) -> usize {
    player.index() * 2 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    DoublePawnPush,
    /// The captured pawn stood beside the moving pawn, not on the destination.
    EnPassant,
    Castle {
        rook_from: ChessField,
        rook_to: ChessField,
    },
    Promotion(PieceType),
}

/// An applied move as kept in the move log.
///
/// Besides the relocation itself, a `Move` remembers everything needed to
/// revert it exactly: the captured piece, the special-move kind and the
/// castling and en-passant rights that were in force before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub moving_piece: Piece,
    pub from: ChessField,
    pub to: ChessField,
    pub captured_piece: Option<Piece>,
    pub kind: MoveKind,
    /// The opponent's king was attacked right after the move.
    pub resulting_in_check: bool,
    pub prior_castling_rights: CastlingRights,
    pub prior_en_passant: Option<ChessField>,
}

impl Move {
    /// Square the captured piece was removed from.
    pub fn captured_at(&self) -> ChessField {
        match self.kind {
            MoveKind::EnPassant => ChessField::new(self.from.row, self.to.col),
            _ => self.to,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic());
        if let MoveKind::Promotion(promo) = self.kind {
            base_move + &promo.to_string().to_lowercase()
        } else {
            base_move
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())?;
        if self.resulting_in_check {
            write!(f, "+")?;
        }
        Ok(())
    }
}

pub fn to_algebraic_square(row: u8, col: u8) -> String {
    let file = (b'a' + col) as char;
    let rank = row + 1;
    format!("{}{}", file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_squares() {
        assert_eq!(ChessField::new(0, 0).as_algebraic(), "a1");
        assert_eq!(ChessField::new(7, 7).as_algebraic(), "h8");
        assert_eq!(ChessField::from_algebraic("e4"), Ok(ChessField::new(3, 4)));
        assert!(ChessField::from_algebraic("i1").is_err());
        assert!(ChessField::from_algebraic("a9").is_err());
        assert!(ChessField::from_algebraic("e44").is_err());
        assert!(ChessField::from_algebraic("").is_err());
    }

    #[test]
    fn test_try_new_rejects_off_board_coordinates() {
        assert_eq!(ChessField::try_new(7, 0), Ok(ChessField::new(7, 0)));
        assert_eq!(ChessField::try_new(8, 0), Err(ChessError::OutOfRange { row: 8, col: 0 }));
        assert_eq!(ChessField::try_new(0, -1), Err(ChessError::OutOfRange { row: 0, col: -1 }));
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = ChessField::new(0, 0);
        assert_eq!(corner.offset(1, 2), Some(ChessField::new(1, 2)));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(ChessField::new(7, 7).offset(0, 1), None);
    }

    #[test]
    fn test_piece_chars() {
        let black_knight = Piece::new(Player::Black, PieceType::Knight);
        assert_eq!(black_knight.to_char(), 'n');
        assert_eq!(Piece::from_char('n'), Some(black_knight));
        assert_eq!(Piece::from_char('Q'), Some(Piece::new(Player::White, PieceType::Queen)));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_castling_right_indices() {
        assert_eq!(kingside_right(Player::White), 0);
        assert_eq!(queenside_right(Player::White), 1);
        assert_eq!(kingside_right(Player::Black), 2);
        assert_eq!(queenside_right(Player::Black), 3);
    }
}
