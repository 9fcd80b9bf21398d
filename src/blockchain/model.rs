use log::{debug, warn};

use super::{Block, ProofOfWork};
use crate::error::Result;

/// Simple in-memory blockchain with Proof-of-Work.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pow: ProofOfWork,
}

impl Blockchain {
    /// Create an empty chain. The first appended block becomes genesis.
    pub fn new(pow: ProofOfWork) -> Self {
        Self {
            chain: Vec::new(),
            pow,
        }
    }

    /// Append `data`: as the unmined genesis block when the chain is empty,
    /// otherwise as a block mined on top of the last one.
    pub fn append(&mut self, data: impl Into<String>) -> Result<&Block> {
        let block = match self.chain.last() {
            None => Block::genesis(data),
            Some(last) => Block::next(last, data, &self.pow)?,
        };
        debug!(
            "CHAIN - appended block #{} (nonce={}, hash={})",
            self.chain.len(),
            block.nonce,
            block.compute_hash()
        );
        self.chain.push(block);
        Ok(&self.chain[self.chain.len() - 1])
    }

    /// Index of the first block whose stored link no longer matches the
    /// current hash of its predecessor.
    pub fn first_broken_link(&self) -> Option<usize> {
        let broken = self
            .chain
            .windows(2)
            .position(|pair| !pair[1].links_to(&pair[0]))
            .map(|i| i + 1);
        if let Some(index) = broken {
            warn!(
                "CHAIN - block #{} does not link to block #{}",
                index,
                index - 1
            );
        }
        broken
    }

    /// Validate linkage of every adjacent pair. Genesis is not checked on its
    /// own, and a change to the last block has no successor to expose it.
    pub fn verify(&self) -> bool {
        self.first_broken_link().is_none()
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.chain.get(index)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn pow(&self) -> &ProofOfWork {
        &self.pow
    }

    pub fn difficulty(&self) -> usize {
        self.pow.difficulty()
    }
}

#[cfg(test)]
mod tests {
    use super::Blockchain;
    use crate::blockchain::ProofOfWork;

    fn chain_with(difficulty: usize, items: &[&str]) -> Blockchain {
        let mut bc = Blockchain::new(ProofOfWork::new(difficulty).unwrap());
        for item in items {
            bc.append(*item).unwrap();
        }
        bc
    }

    #[test]
    fn empty_chain_verifies() {
        let bc = chain_with(1, &[]);
        assert!(bc.is_empty());
        assert!(bc.last_block().is_none());
        assert!(bc.verify());
    }

    #[test]
    fn first_append_is_genesis() {
        let bc = chain_with(1, &["first"]);
        let genesis = bc.get(0).unwrap();
        assert_eq!(genesis.previous_hash, None);
        assert_eq!(genesis.nonce, 0);
    }

    #[test]
    fn genesis_only_chain_verifies_at_any_difficulty() {
        let bc = chain_with(32, &["alone"]);
        assert_eq!(bc.len(), 1);
        assert!(bc.verify());
    }

    #[test]
    fn fresh_chain_verifies_and_links() {
        let bc = chain_with(1, &["a", "b", "c", "d"]);
        assert_eq!(bc.len(), 4);
        assert!(bc.verify());
        for i in 1..bc.len() {
            let block = &bc.chain[i];
            assert_eq!(block.previous_hash, Some(bc.chain[i - 1].compute_hash()));
            assert!(block.satisfies(bc.pow()));
        }
    }

    #[test]
    fn tampering_any_non_terminal_block_is_detected() {
        let items = ["a", "b", "c", "d"];
        for k in 0..items.len() - 1 {
            let mut bc = chain_with(1, &items);
            bc.chain[k].data = "tampered".into();
            assert!(!bc.verify(), "tamper at {k} went unnoticed");
            assert_eq!(bc.first_broken_link(), Some(k + 1));
        }
    }

    #[test]
    fn tampering_the_last_block_is_not_detected() {
        let mut bc = chain_with(1, &["a", "b"]);
        let last = bc.len() - 1;
        bc.chain[last].data = "tampered".into();
        assert!(bc.verify());
        assert_eq!(bc.first_broken_link(), None);
    }

    #[test]
    fn tampering_nonce_or_timestamp_is_detected() {
        let mut bc = chain_with(0, &["a", "b", "c"]);
        bc.chain[1].nonce += 1;
        assert!(!bc.verify());

        let mut bc = chain_with(0, &["a", "b", "c"]);
        bc.chain[0].timestamp -= 1;
        assert!(!bc.verify());
    }

    #[test]
    fn end_to_end_scenario() {
        let mut bc = chain_with(2, &["Hello World!", "How are you?", "I'm fine!"]);
        assert_eq!(bc.difficulty(), 2);
        assert!(bc.verify());
        for block in bc.blocks().iter().skip(1) {
            let hash = block.compute_hash();
            assert_eq!(&hash.as_bytes()[..2], &[0, 0]);
        }

        bc.chain[1].data = "How do you feel?".into();
        assert!(!bc.verify());
    }
}
