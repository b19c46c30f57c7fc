//! Fixed-width big-endian encoding of `BigUint` values.

use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Returns a new vector of the given length, with 0s left padded.
#[inline]
pub(crate) fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::InvalidPadLen);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

/// Converts input to a vector of exactly `padded_len` big-endian bytes.
#[inline]
pub(crate) fn uint_to_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    left_pad(&input.to_bytes_be(), padded_len)
}

/// Same as [`uint_to_be_pad`], wiping the intermediate copies of a secret value.
#[inline]
pub(crate) fn uint_to_zeroizing_be_pad(input: BigUint, padded_len: usize) -> Result<Vec<u8>> {
    let m = Zeroizing::new(input);
    let m = Zeroizing::new(m.to_bytes_be());
    left_pad(&m, padded_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_pad() {
        const INPUT_LEN: usize = 3;
        let input = vec![7u8; INPUT_LEN];

        let padded = left_pad(&input, INPUT_LEN + 2).unwrap();
        assert_eq!(padded, vec![0, 0, 7, 7, 7]);

        let padded = left_pad(&input, INPUT_LEN).unwrap();
        assert_eq!(padded, input);

        assert!(matches!(
            left_pad(&input, INPUT_LEN - 1),
            Err(Error::InvalidPadLen)
        ));
    }

    #[test]
    fn test_uint_to_be_pad_keeps_leading_zeros() {
        let value = BigUint::from(0x0102u32);
        assert_eq!(uint_to_be_pad(value.clone(), 4).unwrap(), vec![0, 0, 1, 2]);
        assert_eq!(uint_to_zeroizing_be_pad(value, 2).unwrap(), vec![1, 2]);
    }
}
