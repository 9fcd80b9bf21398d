use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Mining gave up after {attempts} attempts without a valid hash")]
    MiningExhausted { attempts: u64 },

    #[error("Difficulty {difficulty} out of range (max {max} leading zero bytes)")]
    DifficultyOutOfRange { difficulty: usize, max: usize },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
