//! Seed value object and derivation helpers
//!
//! A seed is the unit of reproducibility for a generated map: the same seed,
//! table and mode always yield the same scenario. Seeds are kept within 31
//! bits so they survive any signed 32-bit storage.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Largest representable seed (2^31 - 1)
pub const MAX_SEED: u32 = (1 << 31) - 1;

/// Stream used for text content draws
const CONTENT_STREAM: u64 = 0;
/// Stream used for shape draws, independent of the content draw order
const SHAPES_STREAM: u64 = 1;

/// Non-negative integer driving deterministic generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u32);

impl Seed {
    /// Normalize a raw value, clamping anything above [`MAX_SEED`]
    pub fn new(raw: u64) -> Self {
        Self(raw.min(u64::from(MAX_SEED)) as u32)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Derive a seed from a configuration value.
    ///
    /// The value is serialized canonically (keys sorted, no whitespace),
    /// hashed with SHA-256, and the first four bytes are read big-endian and
    /// masked to 31 bits. The same configuration always re-derives the same
    /// seed, and reverting a change reverts the seed.
    pub fn derive_from_config(config: &serde_json::Value) -> Self {
        // serde_json maps are ordered by key, so this is already canonical
        let canonical = config.to_string();
        let digest = Sha256::digest(canonical.as_bytes());
        Self(first_word_masked(&digest))
    }

    /// Draw a seed from the operating system CSPRNG. Not reproducible.
    pub fn random() -> Self {
        Self(OsRng.next_u32() & MAX_SEED)
    }

    /// Seed used for retry `attempt` of a generation run.
    ///
    /// Attempt 0 is the seed itself; later attempts hash the seed together
    /// with the attempt index so consecutive attempts are uncorrelated.
    pub fn for_attempt(&self, attempt: u32) -> Self {
        if attempt == 0 {
            return *self;
        }
        let mut hasher = Sha256::new();
        hasher.update(u64::from(self.0).to_be_bytes());
        hasher.update(attempt.to_be_bytes());
        let digest = hasher.finalize();
        Self(first_word_masked(&digest))
    }

    /// Fresh RNG for text content. Never shared between calls.
    pub fn content_rng(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(self.0));
        rng.set_stream(CONTENT_STREAM);
        rng
    }

    /// Fresh RNG for shape generation. Never shared between calls.
    pub fn shapes_rng(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(self.0));
        rng.set_stream(SHAPES_STREAM);
        rng
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn first_word_masked(digest: &[u8]) -> u32 {
    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    word & MAX_SEED
}

/// How the caller wants the seed of a new card chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRequest {
    /// Use this seed verbatim
    Explicit(Seed),
    /// Derive the seed from the request content
    Derive,
    /// Draw a fresh, non-reproducible seed
    Surprise,
}

impl SeedRequest {
    /// Map raw request input onto a seed request. Zero or negative counts as "no seed".
    pub fn from_input(seed: Option<i64>, surprise: bool) -> Self {
        match seed {
            Some(raw) if raw > 0 => SeedRequest::Explicit(Seed::new(raw.unsigned_abs())),
            _ if surprise => SeedRequest::Surprise,
            _ => SeedRequest::Derive,
        }
    }

    /// Resolve into a concrete seed. `config` is only consulted for [`SeedRequest::Derive`].
    pub fn resolve(self, config: impl FnOnce() -> serde_json::Value) -> Seed {
        match self {
            SeedRequest::Explicit(seed) => seed,
            SeedRequest::Derive => Seed::derive_from_config(&config()),
            SeedRequest::Surprise => Seed::random(),
        }
    }
}
