use std::sync::Arc;

use super::{pkcs1v15_generate_prefix, sign, Signature, VerifyingKey};
use crate::{dummy_rng::DummyRng, Result, RsaPrivateKey};
use core::marker::PhantomData;
use digest::Digest;
use pkcs8::AssociatedOid;
use rand_core::CryptoRngCore;
use signature::{DigestSigner, Keypair, RandomizedSigner, Signer};
use zeroize::ZeroizeOnDrop;

/// Signing key for `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
///
/// The private key is shared, not copied: a key built with
/// [`SigningKey::from_shared`] signs with the same snapshot the
/// [`RsaHelper`](crate::RsaHelper) holds.
///
/// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
#[derive(Debug, Clone)]
pub struct SigningKey<D>
where
    D: Digest,
{
    inner: Arc<RsaPrivateKey>,
    prefix: Vec<u8>,
    phantom: PhantomData<D>,
}

impl<D> SigningKey<D>
where
    D: Digest + AssociatedOid,
{
    /// Create a new signing key with a prefix for the digest `D`.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self::from_shared(Arc::new(key))
    }

    /// Signing key over a shared private key, with a prefix for the digest `D`.
    pub fn from_shared(key: Arc<RsaPrivateKey>) -> Self {
        Self {
            inner: key,
            prefix: pkcs1v15_generate_prefix::<D>(),
            phantom: PhantomData,
        }
    }

    /// Generate a new signing key with a prefix for the digest `D`.
    pub fn random<R: CryptoRngCore + ?Sized>(rng: &mut R, bit_size: usize) -> Result<Self> {
        Ok(Self::new(RsaPrivateKey::new(rng, bit_size)?))
    }
}

impl<D> SigningKey<D>
where
    D: Digest,
{
    /// Signing key that signs the input bytes directly, with no DigestInfo
    /// prefix. Only interoperates with verifiers built the same way.
    pub fn new_unprefixed(key: RsaPrivateKey) -> Self {
        Self {
            inner: Arc::new(key),
            prefix: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Hashes `msg` with `D` and signs it, keeping this crate's error.
    ///
    /// Blinds the private-key operation when `rng` is given.
    pub(crate) fn sign_message<R: CryptoRngCore + ?Sized>(
        &self,
        rng: Option<&mut R>,
        msg: &[u8],
    ) -> Result<Signature> {
        self.sign_hashed(rng, &D::digest(msg))
    }

    fn sign_hashed<R: CryptoRngCore + ?Sized>(
        &self,
        rng: Option<&mut R>,
        hashed: &[u8],
    ) -> Result<Signature> {
        let bytes = sign(rng, &self.inner, &self.prefix, hashed)?;
        Ok(Signature {
            bytes: bytes.into_boxed_slice(),
        })
    }
}

impl<D> DigestSigner<D, Signature> for SigningKey<D>
where
    D: Digest,
{
    fn try_sign_digest(&self, digest: D) -> signature::Result<Signature> {
        Ok(self.sign_hashed::<DummyRng>(None, &digest.finalize())?)
    }
}

impl<D> RandomizedSigner<Signature> for SigningKey<D>
where
    D: Digest,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        Ok(self.sign_message(Some(rng), msg)?)
    }
}

impl<D> Signer<Signature> for SigningKey<D>
where
    D: Digest,
{
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign_message::<DummyRng>(None, msg)?)
    }
}

impl<D> AsRef<RsaPrivateKey> for SigningKey<D>
where
    D: Digest,
{
    fn as_ref(&self) -> &RsaPrivateKey {
        &self.inner
    }
}

impl<D> From<RsaPrivateKey> for SigningKey<D>
where
    D: Digest + AssociatedOid,
{
    fn from(key: RsaPrivateKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<SigningKey<D>> for RsaPrivateKey
where
    D: Digest,
{
    fn from(key: SigningKey<D>) -> Self {
        Arc::try_unwrap(key.inner).unwrap_or_else(|shared| RsaPrivateKey::clone(&shared))
    }
}

impl<D> Keypair for SigningKey<D>
where
    D: Digest,
{
    type VerifyingKey = VerifyingKey<D>;

    fn verifying_key(&self) -> Self::VerifyingKey {
        VerifyingKey {
            inner: Arc::new(self.inner.to_public_key()),
            prefix: self.prefix.clone(),
            phantom: PhantomData,
        }
    }
}

// The shared key wipes itself when its last reference drops.
impl<D> ZeroizeOnDrop for SigningKey<D> where D: Digest {}

impl<D> PartialEq for SigningKey<D>
where
    D: Digest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.prefix == other.prefix
    }
}
