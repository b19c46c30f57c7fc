//! MGF1 mask generation, [RFC8017 § B.2.1].
//!
//! [RFC8017 § B.2.1]: https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2.1

use digest::{Digest, FixedOutputReset};

/// XORs `out` with the MGF1 mask derived from `seed`.
///
/// Panics if out is larger than 2**32, the limit RFC 8017 puts on the mask length.
pub(crate) fn mgf1_xor<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    const MAX_LEN: u64 = u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    let h_len = <D as Digest>::output_size();
    for (counter, chunk) in out.chunks_mut(h_len).enumerate() {
        Digest::update(digest, seed);
        Digest::update(digest, (counter as u32).to_be_bytes());

        let mask = digest.finalize_reset();
        chunk
            .iter_mut()
            .zip(mask.iter())
            .for_each(|(byte, m)| *byte ^= m);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use sha2::Sha256;

    #[test]
    fn test_mgf1_sha256_mask() {
        // MGF1-SHA256("foo", 3 bytes) and the first 64 bytes of the same mask.
        let mut out = [0u8; 3];
        mgf1_xor(&mut out, &mut Sha256::new(), b"foo");
        let mut long = [0u8; 40];
        mgf1_xor(&mut long, &mut Sha256::new(), b"foo");
        assert_eq!(out, long[..3]);

        let first_block = Sha256::digest(hex!("666f6f00000000"));
        assert_eq!(long[..32], first_block[..]);
        let second_block = Sha256::digest(hex!("666f6f00000001"));
        assert_eq!(long[32..], second_block[..8]);
    }

    #[test]
    fn test_mgf1_is_an_involution() {
        let mut data = *b"some data block to be masked";
        let orig = data;
        mgf1_xor(&mut data, &mut Sha256::new(), b"seed");
        assert_ne!(data, orig);
        mgf1_xor(&mut data, &mut Sha256::new(), b"seed");
        assert_eq!(data, orig);
    }
}
