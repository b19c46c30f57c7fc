use std::sync::Arc;

use super::{pkcs1v15_generate_prefix, verify, Signature};
use crate::{Result, RsaPublicKey};
use core::marker::PhantomData;
use digest::Digest;
use pkcs8::AssociatedOid;
use signature::{DigestVerifier, Verifier};

/// Verifying key for `RSASSA-PKCS1-v1_5` signatures as described in [RFC8017 § 8.2].
///
/// Like [`SigningKey`](super::SigningKey), it shares its public key rather
/// than copying it.
///
/// [RFC8017 § 8.2]: https://datatracker.ietf.org/doc/html/rfc8017#section-8.2
#[derive(Debug)]
pub struct VerifyingKey<D>
where
    D: Digest,
{
    pub(super) inner: Arc<RsaPublicKey>,
    pub(super) prefix: Vec<u8>,
    pub(super) phantom: PhantomData<D>,
}

impl<D> VerifyingKey<D>
where
    D: Digest + AssociatedOid,
{
    /// Create a new verifying key with a prefix for the digest `D`.
    pub fn new(key: RsaPublicKey) -> Self {
        Self::from_shared(Arc::new(key))
    }

    /// Verifying key over a shared public key, with a prefix for the digest `D`.
    pub fn from_shared(key: Arc<RsaPublicKey>) -> Self {
        Self {
            inner: key,
            prefix: pkcs1v15_generate_prefix::<D>(),
            phantom: PhantomData,
        }
    }
}

impl<D> VerifyingKey<D>
where
    D: Digest,
{
    /// Verifying key for signatures made without a DigestInfo prefix.
    pub fn new_unprefixed(key: RsaPublicKey) -> Self {
        Self {
            inner: Arc::new(key),
            prefix: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Hashes `msg` with `D` and checks the raw signature bytes against it.
    ///
    /// Any mismatch, wrong length included, is [`Error::Verification`](crate::Error::Verification).
    pub(crate) fn verify_message(&self, msg: &[u8], signature: &[u8]) -> Result<()> {
        verify(&self.inner, &self.prefix, &D::digest(msg), signature)
    }
}

impl<D> DigestVerifier<D, Signature> for VerifyingKey<D>
where
    D: Digest,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> signature::Result<()> {
        Ok(verify(
            &self.inner,
            &self.prefix,
            &digest.finalize(),
            &signature.bytes,
        )?)
    }
}

impl<D> Verifier<Signature> for VerifyingKey<D>
where
    D: Digest,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        Ok(self.verify_message(msg, &signature.bytes)?)
    }
}

impl<D> AsRef<RsaPublicKey> for VerifyingKey<D>
where
    D: Digest,
{
    fn as_ref(&self) -> &RsaPublicKey {
        &self.inner
    }
}

// Manual impl: `D` need not be `Clone`.
impl<D> Clone for VerifyingKey<D>
where
    D: Digest,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            prefix: self.prefix.clone(),
            phantom: PhantomData,
        }
    }
}

impl<D> From<RsaPublicKey> for VerifyingKey<D>
where
    D: Digest + AssociatedOid,
{
    fn from(key: RsaPublicKey) -> Self {
        Self::new(key)
    }
}

impl<D> From<VerifyingKey<D>> for RsaPublicKey
where
    D: Digest,
{
    fn from(key: VerifyingKey<D>) -> Self {
        Arc::try_unwrap(key.inner).unwrap_or_else(|shared| RsaPublicKey::clone(&shared))
    }
}

impl<D> PartialEq for VerifyingKey<D>
where
    D: Digest,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.prefix == other.prefix
    }
}
