//! Error types for the chess engine
//!
//! Ordinary answers such as "this square has no moves" are plain return
//! values. `ChessError` is reserved for rejected input and for states the
//! caller should have prevented.

use crate::chess_board::{ChessField, GameStatus, PieceType, Player};
use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Coordinates outside the 8x8 board
    #[error("square ({row}, {col}) is outside the board (must be 0-7)")]
    OutOfRange { row: i32, col: i32 },

    /// No piece at the source square
    #[error("no piece on {square}")]
    EmptySquare { square: ChessField },

    /// The selected piece belongs to the side not on move
    #[error("piece on {square} belongs to {owner}, but {turn} is to move")]
    NotYourPiece {
        square: ChessField,
        owner: Player,
        turn: Player,
    },

    /// Destination is not among the legal destinations of the piece
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: ChessField, to: ChessField },

    /// Search was started in a position without legal moves
    #[error("{player} has no legal moves")]
    NoLegalMoves { player: Player },

    /// A human move was submitted while the computer is on move
    #[error("{player} is played by the computer")]
    ComputerToMove { player: Player },

    /// A move was submitted after the game ended
    #[error("game is over: {status}")]
    GameOver { status: GameStatus },

    /// Pawns may only promote to Queen, Rook, Bishop or Knight
    #[error("cannot promote to {kind}")]
    InvalidPromotion { kind: PieceType },

    /// Board diagram could not be parsed
    #[error("invalid board diagram: {reason}")]
    InvalidDiagram { reason: String },

    /// Each side needs exactly one king
    #[error("{player} must have exactly one king, found {count}")]
    MissingKing { player: Player, count: usize },

    /// Square name such as `e4` could not be parsed
    #[error("invalid algebraic square: {text:?}")]
    InvalidAlgebraic { text: String },
}

/// Result type alias for chess engine operations
pub type ChessResult<T> = Result<T, ChessError>;
