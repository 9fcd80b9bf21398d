use crate::error::{LedgerError, Result};

use super::digest::{DIGEST_LEN, Digest};
use super::{DEFAULT_DIFFICULTY, DEFAULT_PROGRESS_INTERVAL};

/// Mining parameters for a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
    progress_interval: u64,
    max_attempts: Option<u64>,
}

impl ProofOfWork {
    /// `difficulty` is the number of leading zero bytes a mined hash needs.
    pub fn new(difficulty: usize) -> Result<Self> {
        if difficulty > DIGEST_LEN {
            return Err(LedgerError::DifficultyOutOfRange {
                difficulty,
                max: DIGEST_LEN,
            });
        }
        Ok(Self {
            difficulty,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_attempts: None,
        })
    }

    /// Log a progress line every `interval` attempts (0 disables it).
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Give up with `MiningExhausted` after `attempts` nonces.
    pub fn with_max_attempts(mut self, attempts: Option<u64>) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    pub fn accepts(&self, hash: &Digest) -> bool {
        hash.meets_difficulty(self.difficulty)
    }

    pub(crate) fn should_report(&self, attempts: u64) -> bool {
        self.progress_interval != 0 && attempts % self.progress_interval == 0
    }

    pub(crate) fn exhausted(&self, attempts: u64) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_attempts: None,
        }
    }
}
