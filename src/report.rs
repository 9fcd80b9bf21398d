use std::fmt;

use chrono::DateTime;
use serde::Serialize;

use crate::blockchain::digest::optional_hex;
use crate::blockchain::{Block, Blockchain};
use crate::error::Result;

/// Printable snapshot of one block.
#[derive(Debug, Serialize)]
pub struct BlockView {
    pub index: usize,
    pub data: String,
    pub previous_hash: Option<String>, // None for genesis
    pub timestamp: i64,
    pub time: String,
    pub nonce: u64,
    pub hash: String,
    pub meets_difficulty: bool,
}

/// Printable snapshot of a whole chain and its validity.
#[derive(Debug, Serialize)]
pub struct ChainReport {
    pub length: usize,
    pub difficulty: usize,
    pub valid: bool,
    pub first_broken_link: Option<usize>,
    pub chain: Vec<BlockView>,
}

impl BlockView {
    fn new(index: usize, block: &Block, bc: &Blockchain) -> Self {
        Self {
            index,
            data: block.data.clone(),
            previous_hash: optional_hex(block.previous_hash.as_ref()),
            timestamp: block.timestamp,
            time: format_timestamp(block.timestamp),
            nonce: block.nonce,
            hash: block.compute_hash().to_hex(),
            meets_difficulty: block.satisfies(bc.pow()),
        }
    }
}

impl ChainReport {
    pub fn new(bc: &Blockchain) -> Self {
        let first_broken_link = bc.first_broken_link();
        Self {
            length: bc.len(),
            difficulty: bc.difficulty(),
            valid: first_broken_link.is_none(),
            first_broken_link,
            chain: bc
                .blocks()
                .iter()
                .enumerate()
                .map(|(i, b)| BlockView::new(i, b, bc))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for BlockView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block:")?;
        writeln!(f, "\tData: {}", self.data)?;
        writeln!(
            f,
            "\tPrevious hash: {}",
            self.previous_hash.as_deref().unwrap_or("<none>")
        )?;
        writeln!(f, "\tTimestamp: {}", self.time)?;
        writeln!(f, "\tNonce: {}", self.nonce)?;
        writeln!(f, "\tHash: {}", self.hash)
    }
}

impl fmt::Display for ChainReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.chain {
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
