//! Inverse-role PKCS#1 v1.5 operations: encryption with the private key and
//! decryption with the public key.
//!
//! [`private_encrypt`] lays the message out as a block-type-1 block
//! (`00 01 FF.. 00 M`, the same layout as an unprefixed signature) and raises
//! it to `d` through the CRT path of the key. [`public_decrypt`] undoes it
//! with `e` and returns the bytes after the first `FF 00` marker.
//!
//! These operations provide no confidentiality: anyone holding the public key
//! can recover the message. They exist for interoperability with peers that
//! exchange data this way.
//!
//! # Example
//!
//! ```
//! use rsa_helper::{inverse, RsaPrivateKey};
//!
//! let mut rng = rand::thread_rng();
//! let key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//!
//! let sealed = inverse::private_encrypt(Some(&mut rng), &key, b"hello").unwrap();
//! let opened = inverse::public_decrypt(&key.to_public_key(), &sealed).unwrap();
//! assert_eq!(opened, b"hello");
//! ```

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::algorithms::pad::uint_to_be_pad;
use crate::algorithms::pkcs1v15::{pkcs1v15_marker_unpad, pkcs1v15_sign_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::traits::PublicKeyParts;

/// Encrypts `msg` with the private key.
///
/// The message must be no longer than `k - 11` bytes, where `k` is the byte
/// length of the modulus. Passing an `rng` blinds the exponentiation.
///
/// The result is the minimal big-endian encoding of the output integer, so it
/// is shorter than `k` bytes whenever that integer has leading zero bytes.
/// Use [`private_encrypt_fixed`] for a fixed-width result.
pub fn private_encrypt<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    priv_key: &RsaPrivateKey,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let m = private_exponentiate(rng, priv_key, msg)?;
    Ok(m.to_bytes_be())
}

/// Same as [`private_encrypt`], with the result left-padded to exactly `k` bytes.
pub fn private_encrypt_fixed<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    priv_key: &RsaPrivateKey,
    msg: &[u8],
) -> Result<Vec<u8>> {
    let m = private_exponentiate(rng, priv_key, msg)?;
    uint_to_be_pad(m, priv_key.size())
}

/// Decrypts a value produced by [`private_encrypt`] or
/// [`private_encrypt_fixed`] with the matching public key.
///
/// Computes `value^e mod n` and returns the bytes following the first
/// `FF 00` pair at or after offset 2 of its minimal big-endian encoding.
/// Returns [`Error::Decryption`] when no such pair exists.
pub fn public_decrypt(pub_key: &RsaPublicKey, value: &[u8]) -> Result<Vec<u8>> {
    let value = BigUint::from_bytes_be(value);
    let c = rsa_encrypt(pub_key, &value)?;
    pkcs1v15_marker_unpad(&c.to_bytes_be())
}

fn private_exponentiate<R: CryptoRngCore + ?Sized>(
    rng: Option<&mut R>,
    priv_key: &RsaPrivateKey,
    msg: &[u8],
) -> Result<BigUint> {
    let em = pkcs1v15_sign_pad(&[], msg, priv_key.size())?;
    let c = representative(&em, priv_key.n())?;
    rsa_decrypt_and_check(priv_key, rng, &c)
}

/// Integer value of the padded block, which must lie below the modulus.
fn representative(em: &[u8], n: &BigUint) -> Result<BigUint> {
    let c = BigUint::from_bytes_be(em);
    if &c >= n {
        return Err(Error::MessageRepresentativeOutOfRange);
    }
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::rsa::rsa_decrypt;
    use crate::dummy_rng::DummyRng;
    use crate::Pkcs1v15Sign;

    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use sha2::{Digest, Sha256};

    fn key(seed: u8, nprimes: usize, bits: usize) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        RsaPrivateKey::new_multi_prime(&mut rng, nprimes, bits).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);

        for (nprimes, bits) in [(2, 512), (3, 768), (4, 1024)] {
            let priv_key = key(nprimes as u8, nprimes, bits);
            let pub_key = priv_key.to_public_key();
            let k = priv_key.size();

            for len in [0, 1, 5, k / 2, k - 11] {
                let mut msg = vec![0u8; len];
                rng.fill_bytes(&mut msg);

                let sealed = private_encrypt::<DummyRng>(None, &priv_key, &msg).unwrap();
                assert!(sealed.len() <= k);
                assert_eq!(public_decrypt(&pub_key, &sealed).unwrap(), msg);

                let blinded = private_encrypt(Some(&mut rng), &priv_key, &msg).unwrap();
                assert_eq!(blinded, sealed);

                let fixed = private_encrypt_fixed::<DummyRng>(None, &priv_key, &msg).unwrap();
                assert_eq!(fixed.len(), k);
                assert_eq!(public_decrypt(&pub_key, &fixed).unwrap(), msg);
            }
        }
    }

    #[test]
    fn test_hello() {
        let priv_key = key(1, 2, 1024);
        let sealed = private_encrypt::<DummyRng>(None, &priv_key, b"hello").unwrap();
        let opened = public_decrypt(&priv_key.to_public_key(), &sealed).unwrap();
        assert_eq!(opened, b"hello");
    }

    #[test]
    fn test_matches_unprefixed_signature() {
        // A block-type-1 block over a DigestInfo is exactly a PKCS#1 v1.5 signature.
        let priv_key = key(9, 2, 1024);
        let hashed = Sha256::digest(b"Test.\n");
        let mut digest_info = crate::algorithms::pkcs1v15::pkcs1v15_generate_prefix::<Sha256>();
        digest_info.extend_from_slice(&hashed);

        let sealed = private_encrypt_fixed::<DummyRng>(None, &priv_key, &digest_info).unwrap();
        let signature = priv_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
            .unwrap();
        assert_eq!(sealed, signature);
    }

    #[test]
    fn test_crt_matches_plain_exponentiation() {
        let mut priv_key = key(3, 3, 768);
        let with_crt = private_encrypt::<DummyRng>(None, &priv_key, b"payload").unwrap();

        priv_key.clear_precomputed();
        let without_crt = private_encrypt::<DummyRng>(None, &priv_key, b"payload").unwrap();
        assert_eq!(with_crt, without_crt);
    }

    #[test]
    fn test_message_too_long() {
        let priv_key = key(4, 2, 512);
        let k = priv_key.size();

        assert!(private_encrypt::<DummyRng>(None, &priv_key, &vec![0xaa; k - 11]).is_ok());
        assert!(matches!(
            private_encrypt::<DummyRng>(None, &priv_key, &vec![0xaa; k - 10]),
            Err(Error::MessageTooLong)
        ));
    }

    #[test]
    fn test_representative_range() {
        let em = [0x00, 0x01, 0xff, 0xff, 0x00, 0x78];
        let value = BigUint::from_bytes_be(&em);

        let above = value.clone() + 1u32;
        assert_eq!(representative(&em, &above).unwrap(), value);

        assert!(matches!(
            representative(&em, &value),
            Err(Error::MessageRepresentativeOutOfRange)
        ));
        let below = value.clone() - 1u32;
        assert!(matches!(
            representative(&em, &below),
            Err(Error::MessageRepresentativeOutOfRange)
        ));
    }

    #[test]
    fn test_public_decrypt_without_marker() {
        let priv_key = key(6, 2, 512);
        let pub_key = priv_key.to_public_key();

        // Raise a value with no FF 00 pair to d, so e brings it back unchanged.
        let c = BigUint::from_bytes_be(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        let value = rsa_decrypt::<DummyRng>(None, &priv_key, &c).unwrap();

        assert!(matches!(
            public_decrypt(&pub_key, &value.to_bytes_be()),
            Err(Error::Decryption)
        ));
    }

    #[test]
    fn test_public_decrypt_with_wrong_key() {
        let priv_key = key(7, 2, 512);
        let other = key(8, 2, 512).to_public_key();

        let sealed = private_encrypt::<DummyRng>(None, &priv_key, b"hello").unwrap();
        match public_decrypt(&other, &sealed) {
            Ok(out) => assert_ne!(out, b"hello"),
            Err(e) => assert!(matches!(e, Error::Decryption)),
        }
    }
}
