pub mod block;
pub mod digest;
pub mod model;
pub mod pow;

pub use block::Block;
pub use digest::Digest;
pub use model::Blockchain;
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zero bytes).
pub const DEFAULT_DIFFICULTY: usize = 2;

/// How many nonces between two mining progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;
