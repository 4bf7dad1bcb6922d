use std::fmt;
use std::time::Duration;
use uttt_engine::config::EngineConfig;
use uttt_engine::games::ultimate::{BotInput, BotType, calculate_move};
use uttt_engine::{EngineError, GameSession, GameStatus, Mark, SessionSettings, log};

use crate::PlayerKind;

#[derive(Debug, Clone, Copy)]
pub struct Players {
    pub player_one: PlayerKind,
    pub player_two: PlayerKind,
}

impl Players {
    fn kind_for(&self, mark: Mark) -> PlayerKind {
        match mark {
            Mark::PlayerTwo => self.player_two,
            _ => self.player_one,
        }
    }

    fn uses_ai(&self) -> bool {
        self.player_one == PlayerKind::Heuristic || self.player_two == PlayerKind::Heuristic
    }

    /// The mark the session plays on its own; any other heuristic player requests moves explicitly.
    fn ai_mark(&self) -> Mark {
        if self.player_two == PlayerKind::Heuristic {
            Mark::PlayerTwo
        } else {
            Mark::PlayerOne
        }
    }
}

/// Session settings for a match. Heuristic players always search with the heuristic bot.
fn session_settings(config: &EngineConfig, players: Players) -> SessionSettings {
    let mut settings = SessionSettings::from_config(players.uses_ai(), config);
    settings.ai_mark = players.ai_mark();
    settings.ai.bot_type = BotType::Heuristic;
    settings
}

#[derive(Debug, Default)]
pub struct MatchSummary {
    pub player_one_wins: u32,
    pub player_two_wins: u32,
    pub draws: u32,
}

impl MatchSummary {
    pub fn games_played(&self) -> u32 {
        self.player_one_wins + self.player_two_wins + self.draws
    }

    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Mark::PlayerOne) => self.player_one_wins += 1,
            GameStatus::Won(_) => self.player_two_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: player one won {}, player two won {}, {} drawn",
            self.games_played(),
            self.player_one_wins,
            self.player_two_wins,
            self.draws
        )
    }
}

pub async fn run_matches(
    config: &EngineConfig,
    players: Players,
    games: u32,
    tick: Duration,
    summary: &mut MatchSummary,
) -> Result<(), EngineError> {
    for game in 1..=games {
        let status = run_match(config, players, tick).await?;
        log!("Game {} finished: {}", game, status);
        summary.record(status);
    }
    Ok(())
}

async fn run_match(
    config: &EngineConfig,
    players: Players,
    tick: Duration,
) -> Result<GameStatus, EngineError> {
    let mut session = GameSession::with_settings(session_settings(config, players))?;
    let evaluator = config.ai.evaluator();
    let mut interval = tokio::time::interval(tick);

    while session.status() == GameStatus::InProgress {
        interval.tick().await;

        let mark = session.current_mark();
        match players.kind_for(mark) {
            PlayerKind::Heuristic => {
                if !session.is_ai_thinking() {
                    session.request_ai_move()?;
                }
                if let Some(position) = session.poll_ai_move()? {
                    log!("{} (heuristic) played {}", mark, position);
                }
            }
            PlayerKind::Random => {
                let input = BotInput {
                    board: session.board().clone(),
                    current_mark: mark,
                };
                let position = calculate_move(BotType::Random, &input, &evaluator)?;
                session.apply_move(position)?;
                log!("{} (random) played {}", mark, position);
            }
        }
    }

    session.shutdown();
    log!("Final board:\n{}", session.board());
    Ok(session.status())
}
