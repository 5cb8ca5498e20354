pub mod attacks;
pub mod board;
pub mod model;
pub mod perft;
pub mod piece_rules;
pub mod statistics;

mod game_state;
mod legality;
mod scoped_move;
mod status;
#[cfg(test)]
mod test_utils;

pub use board::Board;
pub use game_state::GameState;
pub use model::{CastlingRights, ChessField, Move, MoveKind, Piece, PieceType, Player, Square};
pub use scoped_move::ScopedMove;
pub use statistics::GameStatistics;
pub use status::GameStatus;
