//! PKCS#1 v1.5 encoding blocks as described in [RFC8017 § 7.2] and [RFC8017 § 9.2].
//!
//! Block type 2 (`00 02 PS 00 M`, random non-zero PS) carries encrypted
//! messages. Block type 1 (`00 01 FF.. 00 T`) carries signatures and the
//! payload of private-key encryption.
//!
//! [RFC8017 § 7.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.2
//! [RFC8017 § 9.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-9.2

use digest::Digest;
use pkcs8::AssociatedOid;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Bytes of overhead in either block type: `00`, the type byte, at least
/// eight padding bytes and the `00` separator.
pub(crate) const PKCS1V15_OVERHEAD: usize = 11;

/// Fills the provided slice with random values, which are guaranteed
/// to not be zero.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Builds a block-type-2 encryption block of `k` bytes around `msg`.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + PKCS1V15_OVERHEAD > k {
        return Err(Error::MessageTooLong);
    }

    // EM = 0x00 || 0x02 || PS || 0x00 || M
    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Removes block-type-2 padding.
///
/// The structure check runs in constant time; only the final verdict
/// branches.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: Vec<u8>, k: usize) -> Result<Vec<u8>> {
    if k < PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // looking_for_index: 1 while the separating zero has not been seen.
    // index: offset of that zero.
    let mut looking_for_index = 1u8;
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), Choice::from(looking_for_index) & equals0);
        looking_for_index.conditional_assign(&0u8, equals0);
    }

    // PS must be at least 8 bytes, starting two bytes into em.
    let valid_ps = index.ct_gt(&(2 + 8 - 1));
    let valid =
        first_byte_is_zero & second_byte_is_two & Choice::from(!looking_for_index & 1) & valid_ps;
    let index = u32::conditional_select(&0, &(index + 1), valid);

    if valid.unwrap_u8() == 0 {
        return Err(Error::Decryption);
    }

    Ok(em[index as usize..].to_vec())
}

/// Builds a block-type-1 block of `k` bytes: `00 01 FF.. 00 prefix hashed`.
///
/// With an empty prefix this is the layout private-key encryption applies to
/// an arbitrary message.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + PKCS1V15_OVERHEAD {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..k].copy_from_slice(hashed);

    Ok(em)
}

/// Checks a block-type-1 signature block against the expected prefix and hash.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hashed.len();
    if k < t_len + PKCS1V15_OVERHEAD || em.len() != k {
        return Err(Error::Verification);
    }

    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    ok &= em[k - hash_len..k].ct_eq(hashed);
    ok &= em[k - t_len..k - hash_len].ct_eq(prefix);
    ok &= em[k - t_len - 1].ct_eq(&0u8);

    for el in em.iter().skip(2).take(k - t_len - 3) {
        ok &= el.ct_eq(&0xff)
    }

    if ok.unwrap_u8() != 1 {
        return Err(Error::Verification);
    }

    Ok(())
}

/// Recovers the payload of a block-type-1 block from the minimal big-endian
/// bytes of the recovered integer.
///
/// The leading zero of the block is gone once the value is converted back to
/// bytes, so `out` normally starts at the `01` type byte. The payload follows
/// the first `FF 00` pair found at or after offset 2. A missing pair is a
/// decryption failure.
pub(crate) fn pkcs1v15_marker_unpad(out: &[u8]) -> Result<Vec<u8>> {
    out.windows(2)
        .enumerate()
        .skip(2)
        .find(|(_, pair)| pair[0] == 0xff && pair[1] == 0x00)
        .map(|(i, _)| out[i + 2..].to_vec())
        .ok_or(Error::Decryption)
}

/// DigestInfo prefix of a hash function:
/// `30 <oid_len + 8 + digest_len> 30 <oid_len + 4> 06 <oid_len> oid 05 00 04 <digest_len>`
#[inline]
pub(crate) fn pkcs1v15_generate_prefix<D>() -> Vec<u8>
where
    D: Digest + AssociatedOid,
{
    let oid = D::OID.as_bytes();
    let oid_len = oid.len() as u8;
    let digest_len = <D as Digest>::output_size() as u8;
    let mut v = vec![
        0x30,
        oid_len + 8 + digest_len,
        0x30,
        oid_len + 4,
        0x6,
        oid_len,
    ];
    v.extend_from_slice(oid);
    v.extend_from_slice(&[0x05, 0x00, 0x04, digest_len]);
    v
}
