use super::game_state::GameState;
use super::legality::has_legal_move;
use super::model::Player;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    BlackWins,
    WhiteWins,
    Stalemate,
}

impl GameStatus {
    /// Numeric encoding used by front ends: 0 Black wins, 1 White wins,
    /// 2 stalemate, 3 still running.
    pub fn code(&self) -> u8 {
        match self {
            GameStatus::BlackWins => 0,
            GameStatus::WhiteWins => 1,
            GameStatus::Stalemate => 2,
            GameStatus::Ongoing => 3,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != GameStatus::Ongoing
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::WhiteWins => Some(Player::White),
            GameStatus::BlackWins => Some(Player::Black),
            GameStatus::Ongoing | GameStatus::Stalemate => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::White => GameStatus::WhiteWins,
            Player::Black => GameStatus::BlackWins,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::BlackWins => write!(f, "Black wins by checkmate"),
            GameStatus::WhiteWins => write!(f, "White wins by checkmate"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

impl GameState {
    /// Classifies the position for the side to move.
    ///
    /// Without a legal move the game is over: checkmate if that side's king
    /// is attacked, stalemate otherwise.
    pub fn checkmate_stalemate_checker(&self) -> GameStatus {
        if has_legal_move(self) {
            return GameStatus::Ongoing;
        }
        let to_move = self.whose_turn();
        if self.king_in_check(to_move) {
            GameStatus::won_by(to_move.opponent())
        } else {
            GameStatus::Stalemate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::field;
    use super::*;

    const BACK_RANK_MATE: [&str; 8] = ["r.....k.", ".....ppp", "........", "........", "........", "........", ".....PPP", "......K."];

    #[test]
    fn test_start_position_is_ongoing() {
        assert_eq!(GameState::new().checkmate_stalemate_checker(), GameStatus::Ongoing);
        assert_eq!(GameStatus::Ongoing.code(), 3);
    }

    #[test]
    fn test_black_delivers_back_rank_mate() {
        let mut state = GameState::from_diagram(&BACK_RANK_MATE, Player::Black).unwrap();
        state.move_piece(field("a8"), field("a1"), false).unwrap();
        assert!(state.last_move().unwrap().resulting_in_check);

        let status = state.checkmate_stalemate_checker();
        assert_eq!(status, GameStatus::BlackWins);
        assert_eq!(status.code(), 0);
        assert_eq!(status.winner(), Some(Player::Black));
        assert!(state.all_legal_moves().is_empty());

        state.undo_move();
        assert_eq!(state.checkmate_stalemate_checker(), GameStatus::Ongoing);
    }

    #[test]
    fn test_white_delivers_back_rank_mate() {
        let rows = ["......k.", ".....ppp", "........", "........", "........", "........", ".....PPP", "R.....K."];
        let mut state = GameState::from_diagram(&rows, Player::White).unwrap();
        state.move_piece(field("a1"), field("a8"), false).unwrap();
        let status = state.checkmate_stalemate_checker();
        assert_eq!(status, GameStatus::WhiteWins);
        assert_eq!(status.code(), 1);
    }

    #[test]
    fn test_stalemate() {
        let rows = ["k.......", "..Q.....", "........", "........", "........", "........", "........", "..K....."];
        let state = GameState::from_diagram(&rows, Player::Black).unwrap();
        assert!(!state.king_in_check(Player::Black));
        let status = state.checkmate_stalemate_checker();
        assert_eq!(status, GameStatus::Stalemate);
        assert_eq!(status.code(), 2);
        assert_eq!(status.winner(), None);
        assert!(status.is_over());
    }

    #[test]
    fn test_check_is_not_mate_when_king_can_escape() {
        let rows = ["r.....k.", ".....ppp", "........", "........", "........", "........", ".....P.P", "......K."];
        let mut state = GameState::from_diagram(&rows, Player::Black).unwrap();
        state.move_piece(field("a8"), field("a1"), false).unwrap();
        assert!(state.king_in_check(Player::White));
        assert_eq!(state.checkmate_stalemate_checker(), GameStatus::Ongoing);
        assert_eq!(state.get_valid_moves(field("g1")), vec![field("g2")]);
    }
}
