// Deterministic id source for the planner.
//
// Object ids are UUID v4 values whose random bits come from this generator
// rather than from OS entropy, so a plan rebuilt from the same seed and the
// same edit sequence assigns the same ids. That keeps golden-file tests and
// saved-plan diffs stable.
//
// The generator is xoshiro256++ (Blackman & Vigna) with its 256-bit state
// expanded from a single `u64` seed by SplitMix64. It is only used for ids;
// nothing in the placement rules draws random numbers.
//
// See also: `types.rs` for `ObjectId::new`, `plan.rs` which owns the one
// `IdRng` of a session.

use serde::{Deserialize, Serialize};

/// Seeded xoshiro256++ generator. One instance per `BuildPlan`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRng {
    state: [u64; 4],
}

impl IdRng {
    /// Seed the generator. Equal seeds give equal id streams.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        let state = [
            splitmix64(&mut sm),
            splitmix64(&mut sm),
            splitmix64(&mut sm),
            splitmix64(&mut sm),
        ];
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.state;
        let out = s0.wrapping_add(s3).rotate_left(23).wrapping_add(s0);

        let shifted = s1 << 17;
        let mut next = [s0, s1, s2 ^ s0, s3 ^ s1];
        next[1] ^= next[2];
        next[0] ^= next[3];
        next[2] ^= shifted;
        next[3] = next[3].rotate_left(45);
        self.state = next;

        out
    }

    /// 16 bytes of output, little-endian, for UUID construction.
    pub fn next_bytes16(&mut self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.next_u64().to_le_bytes());
        out[8..].copy_from_slice(&self.next_u64().to_le_bytes());
        out
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_seeds_equal_streams() {
        let mut a = IdRng::new(7);
        let mut b = IdRng::new(7);
        for _ in 0..64 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = IdRng::new(1);
        let mut b = IdRng::new(2);
        let sa: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let sb: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn state_survives_json() {
        let mut rng = IdRng::new(99);
        rng.next_u64();
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: IdRng = serde_json::from_str(&json).unwrap();
        assert_eq!(rng.next_u64(), restored.next_u64());
    }

    #[test]
    fn sixteen_bytes_use_two_words() {
        let mut a = IdRng::new(3);
        let mut b = IdRng::new(3);
        let bytes = a.next_bytes16();
        let lo = b.next_u64().to_le_bytes();
        let hi = b.next_u64().to_le_bytes();
        assert_eq!(&bytes[..8], &lo);
        assert_eq!(&bytes[8..], &hi);
    }
}
