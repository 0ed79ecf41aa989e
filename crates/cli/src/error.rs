use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("engine error: {0}")]
    Engine(#[from] engine::EngineError),
    #[error("race error: {0}")]
    Race(#[from] api_types::race::RaceError),
    #[error("draft error: {0}")]
    Draft(String),
    #[error("incomplete selection: {0}")]
    Incomplete(String),
}
