use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::games::ultimate::{
    BotType, DEFAULT_PLY_LIMIT, DEFAULT_WEIGHTING_PLY_LIMIT, Evaluator, Mark,
};
use super::Validate;

pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_POLL_TIMEOUT_MS: u64 = 10_000;
const MAX_PLY_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ai: AiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub bot_type: BotType,
    /// How long the worker waits for a request before checking for shutdown.
    pub poll_timeout_ms: u64,
    pub ply_limit: usize,
    pub weighting_ply_limit: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            bot_type: BotType::Heuristic,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            ply_limit: DEFAULT_PLY_LIMIT,
            weighting_ply_limit: DEFAULT_WEIGHTING_PLY_LIMIT,
        }
    }
}

impl AiConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.ply_limit, self.weighting_ply_limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The mark the AI plays when a session is created against it.
    pub ai_mark: Mark,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ai_mark: Mark::PlayerTwo,
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        self.ai.validate()?;
        self.session.validate()
    }
}

impl Validate for AiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.poll_timeout_ms == 0 || self.poll_timeout_ms > MAX_POLL_TIMEOUT_MS {
            return Err(format!(
                "Poll timeout must be between 1 and {} ms, got {}",
                MAX_POLL_TIMEOUT_MS, self.poll_timeout_ms
            ));
        }
        if self.ply_limit == 0 || self.ply_limit > MAX_PLY_LIMIT {
            return Err(format!("Ply limit must be between 1 and {}", MAX_PLY_LIMIT));
        }
        if self.weighting_ply_limit == 0 || self.weighting_ply_limit > self.ply_limit {
            return Err(format!(
                "Weighting ply limit ({}) must be between 1 and the ply limit ({})",
                self.weighting_ply_limit, self.ply_limit
            ));
        }
        Ok(())
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ai_mark == Mark::Empty {
            return Err("AI mark must be player_one or player_two".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigManager, InMemoryConfigProvider, YamlConfigSerializer};
    use crate::error::ConfigError;

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, EngineConfig> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        let config = manager(None).get_config().unwrap();

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.ai.poll_timeout(), Duration::from_millis(100));
        assert_eq!(config.session.ai_mark, Mark::PlayerTwo);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = "ai:\n  bot_type: random\n  weighting_ply_limit: 2\nsession:\n  ai_mark: player_one\n";

        let config = manager(Some(yaml)).get_config().unwrap();

        assert_eq!(config.ai.bot_type, BotType::Random);
        assert_eq!(config.ai.weighting_ply_limit, 2);
        assert_eq!(config.ai.ply_limit, DEFAULT_PLY_LIMIT);
        assert_eq!(config.session.ai_mark, Mark::PlayerOne);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let yaml = "ai:\n  ply_limit: 1\n  weighting_ply_limit: 2\n";

        let result = manager(Some(yaml)).get_config();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml_is_rejected() {
        let result = manager(Some("ai: [")).get_config();

        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_set_config_round_trips_through_provider() {
        let manager = manager(None);
        let mut config = EngineConfig::default();
        config.ai.poll_timeout_ms = 250;

        manager.set_config(&config).unwrap();

        assert_eq!(manager.get_config().unwrap().ai.poll_timeout_ms, 250);
    }

    #[test]
    fn test_empty_ai_mark_fails_validation() {
        let mut config = EngineConfig::default();
        config.session.ai_mark = Mark::Empty;

        assert!(config.validate().is_err());
    }
}
