//! End-of-game summary derived from the move log.

use super::model::{Move, PieceType, Player};
use log::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStatistics {
    pub plies: usize,
    /// Moves by each side that gave check, indexed by [`Player::index`].
    pub checks_given: [usize; 2],
    /// Plies played before the side lost its first piece, `None` if it lost nothing.
    pub plies_before_first_loss: [Option<usize>; 2],
    pub knight_moves: [usize; 2],
    /// Material value of the pieces each side captured.
    pub material_captured: [i32; 2],
}

impl GameStatistics {
    pub fn from_log(log: &[Move]) -> Self {
        let mut stats = Self {
            plies: log.len(),
            ..Self::default()
        };
        for (ply, mv) in log.iter().enumerate() {
            let mover = mv.moving_piece.player.index();
            if mv.resulting_in_check {
                stats.checks_given[mover] += 1;
            }
            if mv.moving_piece.kind == PieceType::Knight {
                stats.knight_moves[mover] += 1;
            }
            if let Some(captured) = mv.captured_piece {
                stats.material_captured[mover] += captured.kind.value();
                let victim = captured.player.index();
                if stats.plies_before_first_loss[victim].is_none() {
                    stats.plies_before_first_loss[victim] = Some(ply);
                }
            }
        }
        stats
    }

    pub fn checks_given_by(&self, player: Player) -> usize {
        self.checks_given[player.index()]
    }

    pub fn knight_moves_by(&self, player: Player) -> usize {
        self.knight_moves[player.index()]
    }

    /// How long `player` kept every piece; the whole game if nothing was lost.
    pub fn intact_plies(&self, player: Player) -> usize {
        self.plies_before_first_loss[player.index()].unwrap_or(self.plies)
    }

    pub fn log_summary(&self) {
        for player in [Player::White, Player::Black] {
            info!("{} gave check {} times", player, self.checks_given_by(player));
            info!(
                "all {} pieces survived {} out of {} plies",
                player,
                self.intact_plies(player),
                self.plies
            );
            info!("{} made {} knight moves", player, self.knight_moves_by(player));
            info!("{} captured {} centipawns of material", player, self.material_captured[player.index()]);
        }
    }
}
