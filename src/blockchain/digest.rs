use std::fmt;

use sha2::{Digest as _, Sha256};

/// Size in bytes of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// A 256-bit block hash. Compared byte-wise, printed as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hash `bytes` with SHA-256.
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Canonical representation: 64 lowercase hex chars.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Number of leading bytes equal to zero.
    pub fn leading_zero_bytes(&self) -> usize {
        self.0.iter().take_while(|b| **b == 0).count()
    }

    /// Proof-of-Work admission rule: the first `difficulty` bytes must be zero.
    /// Byte granularity, so each unit of difficulty costs a factor of 256.
    pub fn meets_difficulty(&self, difficulty: usize) -> bool {
        difficulty <= DIGEST_LEN && self.0[..difficulty].iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hex form of an optional digest; `None` (no predecessor) maps to `None`
/// instead of being dereferenced.
pub fn optional_hex(digest: Option<&Digest>) -> Option<String> {
    digest.map(Digest::to_hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input_matches_known_vector() {
        let d = Digest::of(b"");
        assert_eq!(
            d.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hex_is_lowercase_two_chars_per_byte() {
        let mut raw = [0u8; DIGEST_LEN];
        raw[0] = 0xAB;
        raw[31] = 0x0F;
        let d = Digest::from_bytes(raw);
        let s = d.to_string();
        assert_eq!(s.len(), 64);
        assert!(s.starts_with("ab00"));
        assert!(s.ends_with("0f"));
        assert_eq!(s, s.to_lowercase());
    }

    #[test]
    fn difficulty_counts_bytes_not_nibbles() {
        let mut raw = [0xFFu8; DIGEST_LEN];
        raw[0] = 0x00;
        raw[1] = 0x0F; // hex "000f..." has three zero nibbles but one zero byte
        let d = Digest::from_bytes(raw);
        assert_eq!(d.leading_zero_bytes(), 1);
        assert!(d.meets_difficulty(0));
        assert!(d.meets_difficulty(1));
        assert!(!d.meets_difficulty(2));
    }

    #[test]
    fn difficulty_above_digest_length_never_met() {
        let d = Digest::from_bytes([0u8; DIGEST_LEN]);
        assert!(d.meets_difficulty(DIGEST_LEN));
        assert!(!d.meets_difficulty(DIGEST_LEN + 1));
    }

    #[test]
    fn absent_digest_has_no_hex() {
        assert_eq!(optional_hex(None), None);
        let d = Digest::of(b"x");
        assert_eq!(optional_hex(Some(&d)), Some(d.to_hex()));
    }
}
