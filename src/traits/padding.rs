//! Seams between the key types and the padding schemes.
//!
//! [`RsaPrivateKey`] and [`RsaPublicKey`] know only the raw RSA primitive;
//! each scheme value ([`Pkcs1v15Encrypt`](crate::Pkcs1v15Encrypt),
//! [`Oaep`](crate::Oaep), [`Pkcs1v15Sign`](crate::Pkcs1v15Sign)) brings its
//! own block layout through these traits.

use rand_core::CryptoRngCore;

use crate::errors::Result;
use crate::key::{RsaPrivateKey, RsaPublicKey};

/// An encryption padding, consumed by one encrypt or decrypt call.
pub trait PaddingScheme {
    /// Opens `ciphertext` with `priv_key`.
    ///
    /// A `Some(rng)` blinds the private exponentiation. Every padding
    /// failure comes back as [`Error::Decryption`](crate::Error::Decryption).
    fn decrypt<Rng: CryptoRngCore>(
        self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Pads `msg` with randomness from `rng` and raises it to `e`.
    ///
    /// The output is always as long as the modulus.
    fn encrypt<Rng: CryptoRngCore>(
        self,
        rng: &mut Rng,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>>;
}

/// A signature padding over a precomputed digest.
pub trait SignatureScheme {
    /// Signs `hashed`, blinding the exponentiation when `rng` is given.
    fn sign<Rng: CryptoRngCore>(
        self,
        rng: Option<&mut Rng>,
        priv_key: &RsaPrivateKey,
        hashed: &[u8],
    ) -> Result<Vec<u8>>;

    /// Checks `sig` against `hashed`, which must come from the digest the
    /// scheme was built for.
    ///
    /// Any mismatch is [`Error::Verification`](crate::Error::Verification).
    fn verify(self, pub_key: &RsaPublicKey, hashed: &[u8], sig: &[u8]) -> Result<()>;
}
