#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! RSA key store with PKCS#1 v1.5 and OAEP operations, plus inverse-role
//! operations (encryption with the private key, decryption with the public
//! key) accelerated through the Chinese remainder theorem.
//!
//! # Supported algorithms
//!
//! This crate supports the following schemes described in [RFC8017]:
//!
//! - [OAEP encryption scheme](#oaep-encryption)
//! - [PKCS#1 v1.5 encryption scheme](#pkcs1-v15-encryption)
//! - [PKCS#1 v1.5 signature scheme](#pkcs1-v15-signatures)
//! - [Block-type-1 encryption with the private key](#inverse-role-operations)
//!
//! Most applications only need [`RsaHelper`], which holds a key pair and
//! exposes every operation with SHA-256 defaults.
//!
//! # Usage
//!
//! ## Key store
//!
//! ```
//! use rsa_helper::{HelperConfig, RsaHelper};
//!
//! let helper = RsaHelper::with_config(HelperConfig::default().with_default_bits(1024));
//! let pair = helper.export_key_pair().expect("failed to generate a key");
//! assert!(pair.public.starts_with("-----BEGIN RSA PUBLIC KEY-----"));
//!
//! let other = RsaHelper::new();
//! other.import_public_key(pair.public.as_bytes()).unwrap();
//!
//! let enc_data = other.encrypt_pkcs1v15(b"hello world").unwrap();
//! assert_eq!(helper.decrypt_pkcs1v15(&enc_data).unwrap(), b"hello world");
//! ```
//!
//! ## OAEP encryption
//!
//! ```
//! use rsa_helper::{sha2::Sha256, Oaep, RsaPrivateKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! let sealed = public_key
//!     .encrypt(&mut rng, Oaep::new_with_label::<Sha256, _>("invoice"), b"amount=42")
//!     .expect("failed to encrypt");
//!
//! // The label is bound to the ciphertext.
//! let opened = private_key
//!     .decrypt(Oaep::new_with_label::<Sha256, _>("invoice"), &sealed)
//!     .expect("failed to decrypt");
//! assert_eq!(opened, b"amount=42");
//! assert!(private_key.decrypt(Oaep::new::<Sha256>(), &sealed).is_err());
//! ```
//!
//! ## PKCS#1 v1.5 encryption
//!
//! ```
//! use rsa_helper::{Pkcs1v15Encrypt, RsaPrivateKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//!
//! // At most k - 11 = 117 bytes fit in a 1024-bit block.
//! let sealed = private_key
//!     .to_public_key()
//!     .encrypt(&mut rng, Pkcs1v15Encrypt, &[7u8; 117])
//!     .expect("failed to encrypt");
//! let opened = private_key
//!     .decrypt_blinded(&mut rng, Pkcs1v15Encrypt, &sealed)
//!     .expect("failed to decrypt");
//! assert_eq!(opened, [7u8; 117]);
//! ```
//!
//! ## PKCS#1 v1.5 signatures
//!
//! The [`pkcs1v15`] module implements the [`signature`] crate's traits.
//!
//! ```
//! use rsa_helper::pkcs1v15::SigningKey;
//! use rsa_helper::sha2::Sha256;
//! use rsa_helper::signature::{Keypair, RandomizedSigner, Verifier};
//! use rsa_helper::RsaPrivateKey;
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let private_key = RsaPrivateKey::new(&mut rng, 1024).expect("failed to generate a key");
//!
//! let signing_key = SigningKey::<Sha256>::new(private_key);
//! let signature = signing_key.sign_with_rng(&mut rng, b"release v1.2.0");
//! signing_key
//!     .verifying_key()
//!     .verify(b"release v1.2.0", &signature)
//!     .expect("failed to verify");
//! ```
//!
//! ## Inverse-role operations
//!
//! See the [`inverse`] module. These provide integrity of origin only, never
//! confidentiality.
//!
//! ## Key encoding
//!
//! [`RsaPrivateKey`] and [`RsaPublicKey`] implement the PKCS#1 and PKCS#8
//! encoding traits of the re-exported [`pkcs1`] and [`pkcs8`] crates. The
//! store reads `RSA PRIVATE KEY`, `PRIVATE KEY`, `RSA PUBLIC KEY` and
//! `PUBLIC KEY` PEM envelopes and writes the PKCS#1 ones.
//!
//! ```
//! use rsa_helper::pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey, LineEnding};
//! use rsa_helper::{RsaPrivateKey, RsaPublicKey};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//! let public_key = RsaPrivateKey::new(&mut rng, 1024)
//!     .expect("failed to generate a key")
//!     .to_public_key();
//!
//! let pem = public_key.to_pkcs1_pem(LineEnding::LF).unwrap();
//! assert!(pem.starts_with("-----BEGIN RSA PUBLIC KEY-----"));
//! assert_eq!(RsaPublicKey::from_pkcs1_pem(&pem).unwrap(), public_key);
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017

pub use num_bigint::BigUint;
pub use rand_core;
pub use signature;

mod algorithms;
pub mod config;
pub mod errors;
pub mod helper;
pub mod inverse;
pub mod oaep;
pub mod pkcs1v15;
pub mod traits;

mod dummy_rng;
mod encoding;
mod key;

pub use pkcs1;
pub use pkcs8;
pub use sha2;

pub use crate::{
    config::HelperConfig,
    errors::{Error, Result},
    helper::{KeyPair, RsaHelper},
    key::{RsaPrivateKey, RsaPublicKey},
    oaep::Oaep,
    pkcs1v15::{Pkcs1v15Encrypt, Pkcs1v15Sign},
    traits::keys::CrtValue,
};
