mod ai_worker;
mod ultimate_session;

pub use ai_worker::AiWorker;
pub use ultimate_session::{GameSession, SessionSettings};
