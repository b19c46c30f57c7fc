//! Error types.

use std::io;

/// Alias for [`core::result::Result`] with the `rsa-helper` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading or writing a key file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid PEM envelope.
    #[error("invalid key envelope: {0}")]
    Decode(pkcs1::der::pem::Error),

    /// The PEM envelope carries a label this store does not accept.
    #[error("unexpected key envelope label: {0}")]
    UnexpectedLabel(String),

    /// PKCS#1 structure inside the envelope is malformed.
    #[error("{0}")]
    Pkcs1(pkcs1::Error),

    /// PKCS#8 structure inside the envelope is malformed.
    #[error("{0}")]
    Pkcs8(pkcs8::Error),

    /// Requested modulus size is not supported.
    #[error("unsupported key size: {bits} bits (minimum {min})")]
    InvalidKeySize {
        /// Requested size in bits.
        bits: usize,
        /// Smallest size accepted.
        min: usize,
    },

    /// The store has no private key.
    #[error("private key not set")]
    MissingPrivateKey,

    /// The store has no public key.
    #[error("public key not set")]
    MissingPublicKey,

    /// Padded message does not fit below the modulus.
    #[error("message representative out of range")]
    MessageRepresentativeOutOfRange,

    /// Invalid padding scheme.
    #[error("invalid padding scheme")]
    InvalidPaddingScheme,

    /// Decryption error, raised on any padding failure.
    #[error("decryption error")]
    Decryption,

    /// Verification error.
    #[error("verification error")]
    Verification,

    /// Message too long.
    #[error("message too long")]
    MessageTooLong,

    /// Input must be hashed.
    #[error("input must be hashed")]
    InputNotHashed,

    /// Number of primes must be 2 or greater.
    #[error("nprimes must be >= 2")]
    NprimesTooSmall,

    /// Too few primes of a given length to generate an RSA key.
    #[error("too few primes of given length to generate an RSA key")]
    TooFewPrimes,

    /// Invalid prime value.
    #[error("invalid prime value")]
    InvalidPrime,

    /// Invalid modulus.
    #[error("invalid modulus")]
    InvalidModulus,

    /// Invalid exponent.
    #[error("invalid exponent")]
    InvalidExponent,

    /// Invalid coefficient.
    #[error("invalid coefficient")]
    InvalidCoefficient,

    /// Modulus too large.
    #[error("modulus too large")]
    ModulusTooLarge,

    /// Public exponent too small.
    #[error("public exponent too small")]
    PublicExponentTooSmall,

    /// Public exponent too large.
    #[error("public exponent too large")]
    PublicExponentTooLarge,

    /// Internal error.
    #[error("internal error")]
    Internal,

    /// Label too long.
    #[error("label too long")]
    LabelTooLong,

    /// Invalid padding length.
    #[error("invalid padding length")]
    InvalidPadLen,
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Error {
        Error::Pkcs1(err)
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Error {
        Error::Pkcs8(err)
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Error {
        Error::Pkcs8(pkcs8::Error::PublicKey(err))
    }
}

impl From<pkcs1::der::pem::Error> for Error {
    fn from(err: pkcs1::der::pem::Error) -> Error {
        Error::Decode(err)
    }
}

impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        Self::from_source(err)
    }
}
