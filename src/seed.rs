//! Textual seeds and the deterministic random stream derived from them

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// 64-bit FNV-1a parameters (offset basis and prime from the FNV reference, draft-eastlake-fnv)
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash a textual seed into the numeric seed of the random stream
///
/// 64-bit FNV-1a over the UTF-8 bytes. Unlike `std`'s `DefaultHasher` the
/// result never changes between runs, builds or platforms.
pub fn hash_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Generate a fresh unique seed token (32 hex digits)
pub fn generate_seed_token() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// A seeded pseudo-random stream paired with the seed that produced it
///
/// Each independent generation path should own its own stream; two streams
/// built from the same seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct RandomStream {
    seed: String,
    rng: ChaCha8Rng,
}

impl RandomStream {
    /// Create a stream from a textual seed
    ///
    /// An empty seed is replaced by a freshly generated token, which can be
    /// read back through [`RandomStream::seed`] to reproduce the run.
    pub fn new(seed: &str) -> Self {
        let seed = if seed.is_empty() {
            generate_seed_token()
        } else {
            seed.to_owned()
        };
        let rng = ChaCha8Rng::seed_from_u64(hash_seed(&seed));
        Self { seed, rng }
    }

    /// The textual seed this stream was built from
    #[inline]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Mutable access to the underlying generator
    #[inline]
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}
