use comte_region::bits::{unpack_aligned, unpack_tight};
use proptest::prelude::*;

proptest! {
    /// When 64 % b == 0 the tight and aligned unpackers are
    /// bit-identical on the same payload.
    #[test]
    fn tight_equals_aligned_when_divisible(words in prop::collection::vec(any::<u64>(), 1024)) {
        let payload: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        // 256 words carry 4096 4-bit entries, 512 words 8-bit, 1024 words 16-bit
        for bpb in [4usize, 8, 16] {
            let len = 4096 * bpb / 64 * 8;
            prop_assert_eq!(
                unpack_tight(&payload[..len]),
                unpack_aligned(&payload[..len]),
                "bpb {}", bpb
            );
        }
    }
}
