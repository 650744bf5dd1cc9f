use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Source of uniform floats in `[0, 1)` driving target and jitter draws.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }

    /// `floor(u * (steps + 1)) / 100` seconds, i.e. 0.00 to 0.09 for 9 steps.
    fn next_jitter_secs(&mut self, steps: u32) -> f64 {
        let buckets = f64::from(steps) + 1.0;
        (self.next_f64() * buckets).floor().min(f64::from(steps)) / 100.0
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Hex SHA-256 of `input`; lets a page publish a seed without revealing it.
pub fn sha256_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Maps successive big-endian 4-byte chunks to floats in `[0, 1)`.
pub fn derive_floats(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            f64::from(v) / (f64::from(u32::MAX) + 1.0)
        })
        .collect()
}

/// Deterministic HMAC-SHA256 stream: `HMAC(seed, "{nonce}:{block}")`.
///
/// Each spin of a seeded wheel uses a fresh nonce, so a page can replay the
/// exact same sequence of results given the same seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: String,
    nonce: u64,
    block: u64,
    buffer: Vec<f64>,
    cursor: usize,
}

impl SeededRng {
    pub fn new(seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            seed: seed.into(),
            nonce,
            block: 0,
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    pub fn seed_hash_hex(&self) -> String {
        sha256_hex(self.seed.as_bytes())
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Moves to the next nonce and restarts the stream.
    pub fn advance(&mut self) {
        self.nonce = self.nonce.wrapping_add(1);
        self.block = 0;
        self.buffer.clear();
        self.cursor = 0;
    }

    fn refill(&mut self) {
        let message = format!("{}:{}", self.nonce, self.block);
        // HMAC accepts keys of any length, so this never comes back empty.
        self.buffer = HmacSha256::new_from_slice(self.seed.as_bytes())
            .map(|mac| derive_floats(&mac.chain_update(message).finalize().into_bytes()))
            .unwrap_or_default();
        self.block += 1;
        self.cursor = 0;
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        if self.cursor >= self.buffer.len() {
            self.refill();
        }
        let v = self.buffer.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        v
    }
}

/// Replays a fixed list of floats, cycling when exhausted. Handy for tests
/// and scripted demos.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SeededRng::new("seed", 1);
        let mut rng2 = SeededRng::new("seed", 1);
        assert_eq!(rng1.seed_hash_hex(), rng2.seed_hash_hex());
        let a: Vec<f64> = (0..20).map(|_| rng1.next_f64()).collect();
        let b: Vec<f64> = (0..20).map(|_| rng2.next_f64()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_hash_is_sha256_hex() {
        assert_eq!(
            SeededRng::new("", 0).seed_hash_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn nonce_changes_stream() {
        let mut rng1 = SeededRng::new("seed", 1);
        let mut rng2 = SeededRng::new("seed", 1);
        rng2.advance();
        assert_eq!(rng2.nonce(), 2);
        assert_ne!(rng1.next_f64(), rng2.next_f64());
    }

    #[test]
    fn floats_stay_in_unit_range() {
        let mut rng = SeededRng::new("", 0);
        for _ in 0..100 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn index_and_jitter_bounds() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.999_999, 0.5]);
        assert_eq!(rng.next_index(5), 0);
        assert_eq!(rng.next_index(5), 4);
        assert_eq!(rng.next_index(5), 2);

        let mut rng = ScriptedRng::new(vec![0.0, 0.999_999, 0.55]);
        assert_eq!(rng.next_jitter_secs(9), 0.0);
        assert_eq!(rng.next_jitter_secs(9), 0.09);
        assert_eq!(rng.next_jitter_secs(9), 0.05);
    }
}
