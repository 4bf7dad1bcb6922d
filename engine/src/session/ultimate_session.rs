use super::ai_worker::AiWorker;
use crate::config::{AiConfig, EngineConfig};
use crate::error::EngineError;
use crate::games::ultimate::{
    BotInput, GameStatus, Mark, Position, UltimateBoard, UltimateGameState,
};
use crate::{log, log_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub vs_ai: bool,
    pub ai_mark: Mark,
    pub ai: AiConfig,
}

impl SessionSettings {
    pub fn from_config(vs_ai: bool, config: &EngineConfig) -> Self {
        Self {
            vs_ai,
            ai_mark: config.session.ai_mark,
            ai: config.ai.clone(),
        }
    }
}

/// One game plus, when playing against the AI, the worker that computes its moves.
///
/// Only snapshots cross into the worker. While a request is outstanding the board is frozen:
/// no further moves or requests are accepted until `poll_ai_move` has applied the answer.
/// A worker that disappears is fatal for the session.
pub struct GameSession {
    state: UltimateGameState,
    vs_ai: bool,
    ai_mark: Mark,
    worker: Option<AiWorker>,
    pending_request: bool,
    worker_failed: bool,
    shut_down: bool,
}

impl GameSession {
    pub fn new_session(vs_ai: bool) -> Result<Self, EngineError> {
        Self::from_config(vs_ai, &EngineConfig::default())
    }

    /// Takes the AI mark and worker settings from a loaded config.
    pub fn from_config(vs_ai: bool, config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_settings(SessionSettings::from_config(vs_ai, config))
    }

    pub fn with_settings(settings: SessionSettings) -> Result<Self, EngineError> {
        let worker = if settings.vs_ai {
            Some(AiWorker::spawn(&settings.ai)?)
        } else {
            None
        };

        let mut session = Self {
            state: UltimateGameState::new(),
            vs_ai: settings.vs_ai,
            ai_mark: settings.ai_mark,
            worker,
            pending_request: false,
            worker_failed: false,
            shut_down: false,
        };
        session.request_if_ai_turn()?;
        Ok(session)
    }

    pub fn legal_moves(&self) -> &[Position] {
        self.state.legal_moves()
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn active_sub_board(&self) -> Option<Position> {
        self.state.active_sub_board()
    }

    pub fn current_mark(&self) -> Mark {
        self.state.current_mark
    }

    pub fn last_move(&self) -> Option<Position> {
        self.state.last_move
    }

    pub fn board(&self) -> &UltimateBoard {
        &self.state.board
    }

    pub fn is_ai_turn(&self) -> bool {
        self.vs_ai && self.state.status.is_in_progress() && self.state.current_mark == self.ai_mark
    }

    pub fn is_ai_thinking(&self) -> bool {
        self.pending_request
    }

    /// Plays a move for the mark on turn.
    ///
    /// If the move hands the turn to the AI a request is sent right away. Should that fail
    /// with `WorkerUnavailable` the move itself stays on the board.
    pub fn apply_move(&mut self, position: Position) -> Result<(), EngineError> {
        if self.pending_request {
            return Err(EngineError::AiRequestPending);
        }
        self.state.place_mark(position)?;
        self.request_if_ai_turn()
    }

    /// Sends a snapshot of the current position to the worker, for whichever mark is on turn.
    pub fn request_ai_move(&mut self) -> Result<(), EngineError> {
        let worker = self.available_worker()?;
        if self.pending_request {
            return Err(EngineError::AiRequestPending);
        }
        if !self.state.status.is_in_progress() {
            return Err(EngineError::NotInProgress);
        }

        match worker.submit(BotInput::from_game_state(&self.state)) {
            Ok(()) => {
                self.pending_request = true;
                Ok(())
            }
            Err(EngineError::WorkerUnavailable) => Err(self.fail_worker()),
            Err(e) => Err(e),
        }
    }

    /// Applies the AI's answer if it has arrived. `Ok(None)` means it is still thinking or
    /// nothing was requested. A dead worker is reported on every call.
    pub fn poll_ai_move(&mut self) -> Result<Option<Position>, EngineError> {
        if self.worker_failed || self.shut_down {
            return Err(EngineError::WorkerUnavailable);
        }
        if !self.pending_request {
            return Ok(None);
        }
        let worker = self.available_worker()?;

        let position = match worker.try_receive() {
            Ok(Some(position)) => position,
            Ok(None) => return Ok(None),
            Err(EngineError::WorkerUnavailable) => return Err(self.fail_worker()),
            Err(e) => {
                self.pending_request = false;
                return Err(e);
            }
        };

        self.pending_request = false;
        if let Err(e) = self.state.place_mark(position) {
            log_error!("AI produced a move the board rejected at {}: {}", position, e);
            return Err(e);
        }
        self.request_if_ai_turn()?;
        Ok(Some(position))
    }

    pub fn shutdown(&mut self) {
        if let Some(worker) = &self.worker {
            log!("Shutting down AI worker");
            worker.shutdown();
            self.shut_down = true;
            self.pending_request = false;
        }
    }

    fn request_if_ai_turn(&mut self) -> Result<(), EngineError> {
        if self.is_ai_turn() && !self.pending_request {
            self.request_ai_move()?;
        }
        Ok(())
    }

    fn available_worker(&self) -> Result<&AiWorker, EngineError> {
        if self.worker_failed || self.shut_down {
            return Err(EngineError::WorkerUnavailable);
        }
        self.worker.as_ref().ok_or(EngineError::AiDisabled)
    }

    fn fail_worker(&mut self) -> EngineError {
        log_error!(
            "AI worker terminated unexpectedly (request pending: {}), session cannot continue",
            self.pending_request
        );
        self.worker_failed = true;
        self.pending_request = false;
        EngineError::WorkerUnavailable
    }
}
