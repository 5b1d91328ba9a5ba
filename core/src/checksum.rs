//! Rolling 32-bit checksum over the serialized save file.

/// Computes the save-file checksum of `bytes`.
///
/// The accumulator starts at 0; for every byte, it is rotated left by one
/// bit and the byte value is added with silent wraparound. The result is
/// order- and position-sensitive: it is a dispersion hash for corruption
/// detection, not a cryptographic digest.
///
/// The checksum field itself must be zeroed in the input for the stored
/// and computed values to be comparable.
pub fn compute(bytes: &[u8]) -> u32 {
    let mut chk: u32 = 0;

    for &byte in bytes {
        chk = chk.rotate_left(1).wrapping_add(byte as u32);
    }

    chk
}

#[cfg(test)]
mod tests {
    use super::compute;

    #[test]
    fn empty_input_hashes_to_zero() {
        assert_eq!(compute(&[]), 0);
    }

    #[test]
    fn single_bytes_hash_to_their_own_value() {
        for value in 0..=255u8 {
            assert_eq!(compute(&[value]), value as u32);
        }
    }

    #[test]
    fn known_small_vectors() {
        // 0 -> rot -> 0 + 1 = 1, rot -> 2 + 2 = 4
        assert_eq!(compute(&[1, 2]), 4);
        // 0 -> rot -> 0 + 2 = 2, rot -> 4 + 1 = 5
        assert_eq!(compute(&[2, 1]), 5);
        // a trailing zero still rotates the accumulator
        assert_eq!(compute(&[1, 0]), 2);
    }

    #[test]
    fn rotation_wraps_at_bit_31() {
        // A leading 1 followed by 31 zero bytes lands on the top bit,
        // and one more zero byte rotates it back around to bit 0.
        let mut bytes = vec![0u8; 32];
        bytes[0] = 1;
        assert_eq!(compute(&bytes), 0x8000_0000);

        bytes.push(0);
        assert_eq!(compute(&bytes), 1);
    }

    #[test]
    fn transposition_changes_the_result() {
        let forward: Vec<u8> = (0..=255).collect();
        let mut swapped = forward.clone();
        swapped.swap(100, 101);

        assert_ne!(compute(&forward), compute(&swapped));
    }

    #[test]
    fn is_deterministic() {
        let bytes: Vec<u8> = (0..4096).map(|i| (i % 251) as u8).collect();
        assert_eq!(compute(&bytes), compute(&bytes));
    }

    #[test]
    fn saturated_input_does_not_panic() {
        // Forces the wraparound path on every iteration.
        let bytes = vec![0xFFu8; 8192];
        let _ = compute(&bytes);
    }
}
