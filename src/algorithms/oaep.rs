//! EME-OAEP encoding, [RFC8017 § 7.1].
//!
//! [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

// 2**61 - 1, the input limit of SHA-1 and SHA-256.
const MAX_LABEL_LEN: u64 = 2_305_843_009_213_693_951;

/// Encodes `msg` into a `k`-byte OAEP block.
///
/// `D` hashes the label, `MGD` drives MGF1. The message must be no longer
/// than `k - 2 * hLen - 2`.
#[inline]
pub(crate) fn oaep_encrypt<D, MGD>(
    rng: &mut dyn CryptoRngCore,
    msg: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if label.len() as u64 > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }

    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // DB = lHash || PS || 0x01 || M
    let db_len = k - h_size - 1;
    db[0..h_size].copy_from_slice(&D::digest(label));
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    let mut mgf_digest = MGD::new();
    mgf1_xor(db, &mut mgf_digest, seed);
    mgf1_xor(seed, &mut mgf_digest, db);

    Ok(em)
}

/// Decodes a `k`-byte OAEP block and returns the message.
///
/// Every failure, label mismatch included, is reported as
/// [`Error::Decryption`] so callers cannot tell them apart.
#[inline]
pub(crate) fn oaep_decrypt<D, MGD>(em: &mut [u8], label: &[u8], k: usize) -> Result<Vec<u8>>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    let h_size = <D as Digest>::output_size();

    if label.len() as u64 > MAX_LABEL_LEN {
        return Err(Error::LabelTooLong);
    }

    if k < 11 || k < h_size * 2 + 2 || em.len() != k {
        return Err(Error::Decryption);
    }

    let expected_p_hash = D::digest(label);

    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    let mut mgf_digest = MGD::new();
    mgf1_xor(seed, &mut mgf_digest, db);
    mgf1_xor(db, &mut mgf_digest, seed);

    let hash_are_equal = db[0..h_size].ct_eq(expected_p_hash.as_slice());

    // After lHash: zero or more 0x00, then 0x01, then the message.
    //   looking_for_index: 1 while the 0x01 has not been seen
    //   nonzero_before_one: 1 if some other byte came first
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;
    if valid.unwrap_u8() != 1 {
        return Err(Error::Decryption);
    }

    let start = index as usize + 2 + h_size * 2;
    Ok(em[start..].to_vec())
}
