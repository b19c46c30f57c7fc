//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#oaep-encryption).

use core::fmt;

use digest::{Digest, FixedOutputReset};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::oaep::{oaep_decrypt, oaep_encrypt};
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{rsa_decrypt_and_check, rsa_encrypt};
use crate::errors::{Error, Result};
use crate::key::{self, RsaPrivateKey, RsaPublicKey};
use crate::traits::{PaddingScheme, PublicKeyParts};

type EncodeFn = fn(&mut dyn CryptoRngCore, &[u8], &[u8], usize) -> Result<Zeroizing<Vec<u8>>>;
type DecodeFn = fn(&mut [u8], &[u8], usize) -> Result<Vec<u8>>;

/// Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
///
/// - `D` hashes the label. The maximum possible plaintext length is `m = k - 2 * h_len - 2`,
///   where `k` is the size of the RSA modulus.
/// - `MGD` is the hash function used in [MGF1](https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2).
/// - `label` is optional data bound to the message. Decryption with a
///   different label fails.
///
/// The two hash functions can, but don't need to be the same.
#[derive(Clone)]
pub struct Oaep {
    /// Label bound to the ciphertext. Empty when none was given.
    pub label: Vec<u8>,

    h_len: usize,
    encode: EncodeFn,
    decode: DecodeFn,
}

impl Oaep {
    /// Create a new OAEP `PaddingScheme`, using `D` as the hash function for both the (empty) label and for MGF1.
    ///
    /// # Example
    /// ```
    /// use rsa_helper::{sha2::Sha256, BigUint, Oaep, RsaPublicKey};
    /// use base64ct::{Base64, Encoding};
    ///
    /// let n = Base64::decode_vec("ALHgDoZmBQIx+jTmgeeHW6KsPOrj11f6CvWsiRleJlQpW77AwSZhd21ZDmlTKfaIHBSUxRUsuYNh7E2SHx8rkFVCQA2/gXkZ5GK2IUbzSTio9qXA25MWHvVxjMfKSL8ZAxZyKbrG94FLLszFAFOaiLLY8ECs7g+dXOriYtBwLUJK+lppbd+El+8ZA/zH0bk7vbqph5pIoiWggxwdq3mEz4LnrUln7r6dagSQzYErKewY8GADVpXcq5mfHC1xF2DFBub7bFjMVM5fHq7RK+pG5xjNDiYITbhLYrbVv3X0z75OvN0dY49ITWjM7xyvMWJXVJS7sJlgmCCL6RwWgP8PhcE=").unwrap();
    /// let e = Base64::decode_vec("AQAB").unwrap();
    ///
    /// let mut rng = rand::thread_rng();
    /// let key = RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e)).unwrap();
    /// let padding = Oaep::new::<Sha256>();
    /// let encrypted_data = key.encrypt(&mut rng, padding, b"secret").unwrap();
    /// assert_eq!(encrypted_data.len(), 256);
    /// ```
    pub fn new<D>() -> Self
    where
        D: 'static + Digest + FixedOutputReset,
    {
        Self::new_with_mgf_hash::<D, D>()
    }

    /// Create a new OAEP `PaddingScheme` with an associated `label`, using `D` as the hash function for both the label and for MGF1.
    pub fn new_with_label<D, S>(label: S) -> Self
    where
        D: 'static + Digest + FixedOutputReset,
        S: AsRef<[u8]>,
    {
        Self::new_with_mgf_hash_and_label::<D, D, S>(label)
    }

    /// Create a new OAEP `PaddingScheme`, using `D` as the hash function for the (empty) label, and `MGD` as the hash function for MGF1.
    pub fn new_with_mgf_hash<D, MGD>() -> Self
    where
        D: 'static + Digest,
        MGD: 'static + Digest + FixedOutputReset,
    {
        Self {
            label: Vec::new(),
            h_len: <D as Digest>::output_size(),
            encode: oaep_encrypt::<D, MGD>,
            decode: oaep_decrypt::<D, MGD>,
        }
    }

    /// Create a new OAEP `PaddingScheme` with an associated `label`, using `D` as the hash function for the label, and `MGD` as the hash function for MGF1.
    pub fn new_with_mgf_hash_and_label<D, MGD, S>(label: S) -> Self
    where
        D: 'static + Digest,
        MGD: 'static + Digest + FixedOutputReset,
        S: AsRef<[u8]>,
    {
        Self {
            label: label.as_ref().to_vec(),
            ..Self::new_with_mgf_hash::<D, MGD>()
        }
    }

    /// Largest plaintext this scheme accepts for a modulus of `k` bytes.
    pub fn max_message_len(&self, k: usize) -> usize {
        k.saturating_sub(2 * self.h_len + 2)
    }
}

impl PaddingScheme for Oaep {
    fn decrypt<Rng: CryptoRngCore>(
        self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        key::check_public(priv_key)?;

        let k = priv_key.size();
        if ciphertext.len() != k {
            return Err(Error::Decryption);
        }

        let c = BigUint::from_bytes_be(ciphertext);
        let m = rsa_decrypt_and_check(priv_key, rng, &c)?;
        let mut em = Zeroizing::new(uint_to_zeroizing_be_pad(m, k)?);

        (self.decode)(&mut em, &self.label, k)
    }

    fn encrypt<Rng: CryptoRngCore>(
        self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        key::check_public(pub_key)?;

        let k = pub_key.size();
        let em = (self.encode)(rng, msg, &self.label, k)?;
        let int = Zeroizing::new(BigUint::from_bytes_be(&em));
        uint_to_be_pad(rsa_encrypt(pub_key, &int)?, k)
    }
}

impl fmt::Debug for Oaep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAEP")
            .field("h_len", &self.h_len)
            .field("label", &self.label)
            .finish()
    }
}
