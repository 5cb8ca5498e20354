//! Two-player chess engine with a computer opponent.
//!
//! The crate keeps the authoritative game state (board, side to move, king
//! locations, castling and en-passant rights, move log), generates fully legal
//! moves, classifies terminal positions and searches for the computer's move
//! with minimax and alpha-beta pruning. Rendering and input translation are
//! left to the caller, which only needs the queries exposed by
//! [`chess_board::GameState`] and [`session::GameSession`].

pub mod chess_board;
pub mod config;
pub mod engines;
pub mod error;
pub mod session;

pub use chess_board::{ChessField, GameState, GameStatus, Move, Piece, PieceType, Player, Square};
pub use config::SearchConfig;
pub use error::{ChessError, ChessResult};
