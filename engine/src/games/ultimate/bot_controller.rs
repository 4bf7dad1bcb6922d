use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::board::UltimateBoard;
use super::evaluator::Evaluator;
use super::game_state::UltimateGameState;
use super::types::{Mark, Position};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    #[default]
    Heuristic,
    Random,
}

/// Snapshot handed to a bot. Owns its board, so later moves on the live game never reach it.
#[derive(Debug, Clone)]
pub struct BotInput {
    pub board: UltimateBoard,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &UltimateGameState) -> Self {
        Self {
            board: state.board.clone(),
            current_mark: state.current_mark,
        }
    }
}

pub fn calculate_move(
    bot_type: BotType,
    input: &BotInput,
    evaluator: &Evaluator,
) -> Result<Position, EngineError> {
    match bot_type {
        BotType::Heuristic => calculate_heuristic_move(input, evaluator),
        BotType::Random => calculate_random_move(input),
    }
}

fn calculate_random_move(input: &BotInput) -> Result<Position, EngineError> {
    if input.board.is_done() {
        return Err(EngineError::NoLegalMoves { mover: input.current_mark });
    }
    input
        .board
        .legal_moves()
        .choose(&mut rand::rng())
        .copied()
        .ok_or(EngineError::NoLegalMoves { mover: input.current_mark })
}

/// One ply of lookahead: plays every legal move on a copy and keeps the best evaluation.
///
/// Player two maximises and player one minimises, as values are player two's win chance.
/// Ties keep the earliest move in legal-move order.
pub fn calculate_heuristic_move(
    input: &BotInput,
    evaluator: &Evaluator,
) -> Result<Position, EngineError> {
    let mover = input.current_mark;
    if input.board.is_done() || input.board.legal_moves().is_empty() {
        return Err(EngineError::NoLegalMoves { mover });
    }

    let mut best: Option<(Position, f64)> = None;

    for &position in input.board.legal_moves() {
        let next = input.board.with_move(position, mover)?;
        let value = evaluator.evaluate(&next);

        let improves = match best {
            None => true,
            Some((_, best_value)) if mover == Mark::PlayerTwo => value > best_value,
            Some((_, best_value)) => value < best_value,
        };
        if improves {
            best = Some((position, value));
        }
    }

    best.map(|(position, _)| position)
        .ok_or(EngineError::NoLegalMoves { mover })
}
