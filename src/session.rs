//! Turn-taking controller for a front end.
//!
//! A [`GameSession`] wraps a [`GameState`] and decides who moves next: after
//! every accepted human move it lets the computer reply if the computer owns
//! the side to move, and it refuses further moves once the game is decided.

use crate::chess_board::{ChessField, GameState, GameStatistics, GameStatus, Move, Player};
use crate::config::SearchConfig;
use crate::engines::AlphaBetaEngine;
use crate::error::{ChessError, ChessResult};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans share the board.
    TwoPlayer,
    /// One human against the computer playing `computer`.
    VersusComputer { computer: Player },
    /// The computer plays both sides.
    ComputerOnly,
}

impl GameMode {
    pub fn is_computer(&self, player: Player) -> bool {
        match self {
            GameMode::TwoPlayer => false,
            GameMode::VersusComputer { computer } => *computer == player,
            GameMode::ComputerOnly => true,
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    mode: GameMode,
    config: SearchConfig,
    engine: AlphaBetaEngine,
    status: GameStatus,
}

impl GameSession {
    pub fn new(mode: GameMode, config: SearchConfig) -> Self {
        Self::from_state(GameState::new(), mode, config)
    }

    pub fn from_state(state: GameState, mode: GameMode, config: SearchConfig) -> Self {
        let status = state.checkmate_stalemate_checker();
        Self {
            state,
            mode,
            config,
            engine: AlphaBetaEngine::new(),
            status,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// True when the side to move is played by the computer and the game is running.
    pub fn computer_to_move(&self) -> bool {
        !self.status.is_over() && self.mode.is_computer(self.state.whose_turn())
    }

    /// Destinations to highlight for a selected square; empty once the game is over.
    pub fn valid_moves(&self, from: ChessField) -> Vec<ChessField> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.state.get_valid_moves(from)
    }

    /// Plays a human move and, if the computer is to move afterwards, its reply.
    ///
    /// Refused while the side to move belongs to the computer.
    pub fn submit_move(&mut self, from: ChessField, to: ChessField) -> ChessResult<GameStatus> {
        self.ensure_running()?;
        if self.computer_to_move() {
            let player = self.state.whose_turn();
            debug!("rejected {}{}: {} is played by the computer", from, to, player);
            return Err(ChessError::ComputerToMove { player });
        }
        self.state.move_piece(from, to, false)?;
        self.refresh_status();
        if self.computer_to_move() {
            self.play_computer_move()?;
        }
        Ok(self.status)
    }

    /// Lets the computer pick and play a move for the side to move.
    pub fn play_computer_move(&mut self) -> ChessResult<Move> {
        self.ensure_running()?;
        let player = self.state.whose_turn();
        let outcome = self.engine.choose_move(
            &mut self.state,
            self.config.depth,
            self.config.alpha,
            self.config.beta,
            true,
            player,
        )?;
        let (from, to) = outcome.best_move;
        self.state.move_piece(from, to, true)?;
        self.refresh_status();
        self.state
            .last_move()
            .copied()
            .ok_or(ChessError::NoLegalMoves { player })
    }

    /// Plays a uniformly chosen legal move for the side to move.
    pub fn play_random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ChessResult<Move> {
        self.ensure_running()?;
        let player = self.state.whose_turn();
        let moves = self.state.all_legal_moves();
        let &(from, to) = moves.choose(rng).ok_or(ChessError::NoLegalMoves { player })?;
        self.state.move_piece(from, to, true)?;
        self.refresh_status();
        self.state
            .last_move()
            .copied()
            .ok_or(ChessError::NoLegalMoves { player })
    }

    /// Takes back one ply, or two against the computer so that the human is
    /// on move again. Returns the earliest move taken back.
    ///
    /// Only when the computer made the very first move of the log is the
    /// computer left on move; the caller then asks it to play again.
    pub fn undo(&mut self) -> Option<Move> {
        let mut undone = self.state.undo_move();
        if let GameMode::VersusComputer { computer } = self.mode {
            let computer_moved = undone.is_some_and(|mv| mv.moving_piece.player == computer);
            if computer_moved && !self.state.move_log().is_empty() {
                undone = self.state.undo_move();
            }
        }
        self.refresh_status();
        undone
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.refresh_status();
    }

    pub fn statistics(&self) -> GameStatistics {
        GameStatistics::from_log(self.state.move_log())
    }

    fn ensure_running(&self) -> ChessResult<()> {
        if self.status.is_over() {
            return Err(ChessError::GameOver { status: self.status });
        }
        Ok(())
    }

    fn refresh_status(&mut self) {
        let status = self.state.checkmate_stalemate_checker();
        if status.is_over() && !self.status.is_over() {
            info!("game over after {} plies: {}", self.state.move_log().len(), status);
            self.statistics().log_summary();
        }
        self.status = status;
    }
}
