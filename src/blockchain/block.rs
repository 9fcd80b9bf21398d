use chrono::Utc;
use log::{debug, info};

use super::digest::Digest;
use super::pow::ProofOfWork;
use crate::error::{LedgerError, Result};

/// A single block in the ledger.
///
/// Fields are public so a caller can simulate tampering; the chain itself
/// never mutates a block once it has been appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub data: String,
    /// Owned copy of the predecessor's hash taken at mining time.
    /// `None` for the genesis block.
    pub previous_hash: Option<Digest>,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub nonce: u64,     // Proof-of-Work nonce
}

impl Block {
    /// Create the genesis block (first block in the chain).
    /// Genesis is never mined: its nonce stays at 0.
    pub fn genesis(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            previous_hash: None,
            timestamp: Utc::now().timestamp(),
            nonce: 0,
        }
    }

    /// Build and mine the block that follows `previous`.
    pub fn next(previous: &Block, data: impl Into<String>, pow: &ProofOfWork) -> Result<Self> {
        Self::next_at(previous, data, Utc::now().timestamp(), pow)
    }

    /// Same as [`Block::next`] with an explicit creation time.
    pub fn next_at(
        previous: &Block,
        data: impl Into<String>,
        timestamp: i64,
        pow: &ProofOfWork,
    ) -> Result<Self> {
        let mut block = Self {
            data: data.into(),
            previous_hash: Some(previous.compute_hash()),
            timestamp,
            nonce: 0,
        };
        block.mine(pow)?;
        Ok(block)
    }

    /// Compute the SHA-256 hash of this block from its current fields.
    pub fn compute_hash(&self) -> Digest {
        Digest::of(&self.preimage())
    }

    /// Canonical byte layout hashed by [`Block::compute_hash`]:
    /// data length (u64 LE) and UTF-8 bytes, a presence marker followed by
    /// the previous hash when present, timestamp (i64 LE), nonce (u64 LE).
    fn preimage(&self) -> Vec<u8> {
        let data = self.data.as_bytes();
        let mut buf = Vec::with_capacity(8 + data.len() + 1 + 32 + 8 + 8);
        buf.extend_from_slice(&(data.len() as u64).to_le_bytes());
        buf.extend_from_slice(data);
        match &self.previous_hash {
            Some(prev) => {
                buf.push(1);
                buf.extend_from_slice(prev.as_bytes());
            }
            None => buf.push(0),
        }
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
        buf
    }

    /// Search nonces starting from 1 until the hash satisfies `pow`.
    fn mine(&mut self, pow: &ProofOfWork) -> Result<()> {
        self.nonce = 0;
        loop {
            if pow.exhausted(self.nonce) {
                return Err(LedgerError::MiningExhausted {
                    attempts: self.nonce,
                });
            }
            self.nonce = self
                .nonce
                .checked_add(1)
                .ok_or(LedgerError::MiningExhausted { attempts: u64::MAX })?;
            if pow.should_report(self.nonce) {
                info!(
                    "MINER - calculating block hash, already tried {} different hashes...",
                    self.nonce
                );
            }
            let hash = self.compute_hash();
            if pow.accepts(&hash) {
                debug!("MINER - found hash {} at nonce {}", hash, self.nonce);
                return Ok(());
            }
        }
    }

    /// Whether this block's stored link still matches `previous` as it is now.
    pub fn links_to(&self, previous: &Block) -> bool {
        self.previous_hash == Some(previous.compute_hash())
    }

    /// Whether this block's own hash meets the Proof-of-Work rule.
    pub fn satisfies(&self, pow: &ProofOfWork) -> bool {
        pow.accepts(&self.compute_hash())
    }
}
