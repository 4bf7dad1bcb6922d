pub mod config;
pub mod error;
pub mod games;
pub mod logger;
pub mod session;

pub use error::{ConfigError, EngineError};
pub use games::ultimate::{GameStatus, Mark, Position};
pub use session::{GameSession, SessionSettings};
