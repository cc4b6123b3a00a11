//! Property-based tests for the codec.

use huffpack_core::{decode, encode, Codebook, FrequencyTable};
use proptest::prelude::*;

/// Strategy for inputs dominated by a few symbols, like flat image regions.
fn skewed_input_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(0u8),
            1 => any::<u8>(),
        ],
        0..2048,
    )
}

proptest! {
    /// Property: decode(encode(S)) == S for any byte sequence.
    #[test]
    fn prop_round_trip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let artifact = encode(&data).unwrap();
        prop_assert_eq!(decode(artifact.as_bytes()).unwrap(), data);
    }

    /// Property: round trip holds for low-entropy inputs too.
    #[test]
    fn prop_round_trip_skewed(data in skewed_input_strategy()) {
        let artifact = encode(&data).unwrap();
        prop_assert_eq!(decode(artifact.as_bytes()).unwrap(), data);
    }

    /// Property: a repeated single byte round-trips at one bit per symbol.
    #[test]
    fn prop_single_symbol(byte in any::<u8>(), len in 1usize..1000) {
        let data = vec![byte; len];
        let artifact = encode(&data).unwrap();
        prop_assert_eq!(artifact.header().unwrap().bit_count, len as u64);
        prop_assert_eq!(decode(artifact.as_bytes()).unwrap(), data);
    }

    /// Property: no code is a prefix of another code in the same codebook.
    #[test]
    fn prop_codebook_is_prefix_free(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let codebook = Codebook::from_frequencies(&FrequencyTable::from_bytes(&data)).unwrap();
        let codes: Vec<_> = codebook.iter().map(|(_, code)| code).collect();

        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                prop_assert!(!b.is_prefix_of(a), "{} is a prefix of {}", b, a);
            }
        }
    }

    /// Property: encoding is deterministic.
    #[test]
    fn prop_deterministic(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(encode(&data).unwrap(), encode(&data).unwrap());
    }

    /// Property: skewed inputs of a few dozen bytes or more use fewer bits
    /// than the raw bytes.
    #[test]
    fn prop_skewed_input_compacts(
        filler in 48usize..2048,
        others in prop::collection::vec(1u8..=255, 1..8),
    ) {
        let mut data = vec![0u8; filler];
        data.extend_from_slice(&others);

        let header = encode(&data).unwrap().header().unwrap();
        prop_assert!(header.bit_count < 8 * data.len() as u64);
    }

    /// Property: damaging an artifact never panics, and any failure is a
    /// format error.
    #[test]
    fn prop_mutation_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..512),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut bytes = encode(&data).unwrap().into_bytes();
        let i = index.index(bytes.len());
        bytes[i] ^= flip;

        match decode(&bytes) {
            Ok(output) => prop_assert_eq!(output, data),
            Err(err) => prop_assert!(err.is_format(), "unexpected error: {}", err),
        }
    }
}
