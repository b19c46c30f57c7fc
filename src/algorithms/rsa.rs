//! Generic RSA implementation

use std::borrow::Cow;

use num_bigint::Sign::Plus;
use num_bigint::{BigInt, BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_traits::{One, Signed, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::traits::keys::CrtValue;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Raw RSA encryption of m with the public key. No padding is performed.
#[inline]
pub(crate) fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    Ok(m.modpow(key.e(), key.n()))
}

/// Raw RSA decryption with no padding or error checking.
///
/// Returns a plaintext `BigUint`. Performs RSA blinding if an `Rng` is passed.
/// When the key carries precomputed CRT values the exponentiation runs through
/// [`crt_exponentiate`], otherwise it falls back to `c^d mod n`.
#[inline]
pub(crate) fn rsa_decrypt<R: CryptoRngCore + ?Sized>(
    mut rng: Option<&mut R>,
    priv_key: &impl PrivateKeyParts,
    c: &BigUint,
) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    if priv_key.n().is_zero() {
        return Err(Error::Decryption);
    }

    let mut ir = None;

    let c = if let Some(ref mut rng) = rng {
        let (blinded, unblinder) = blind(rng, priv_key, c);
        ir = Some(unblinder);
        Cow::Owned(blinded)
    } else {
        Cow::Borrowed(c)
    };

    let m = match (
        priv_key.dp(),
        priv_key.dq(),
        priv_key.qinv(),
        priv_key.crt_values(),
    ) {
        (Some(dp), Some(dq), Some(qinv), Some(crt_values)) => {
            // We have the precalculated values needed for the CRT.
            crt_exponentiate(&c, priv_key.primes(), dp, dq, qinv, crt_values)?
        }
        _ => c.modpow(priv_key.d(), priv_key.n()),
    };

    match ir {
        Some(ref ir) => {
            // unblind
            Ok(unblind(priv_key, &m, ir))
        }
        None => Ok(m),
    }
}

/// Same as [`rsa_decrypt`], then re-encrypts the result and fails with
/// [`Error::Internal`] unless it matches `c`.
#[inline]
pub(crate) fn rsa_decrypt_and_check<R: CryptoRngCore + ?Sized>(
    priv_key: &impl PrivateKeyParts,
    rng: Option<&mut R>,
    c: &BigUint,
) -> Result<BigUint> {
    let m = rsa_decrypt(rng, priv_key, c)?;

    let check = rsa_encrypt(priv_key, &m)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Computes `c^d mod n` from its residues modulo each prime factor, using
/// Garner's recombination.
///
/// The first two primes use `dp`, `dq` and `qinv`:
///
/// ```text
/// m1 = c^dp mod p
/// m2 = c^dq mod q
/// h  = (m1 - m2) * qinv mod p
/// m  = m2 + h * q
/// ```
///
/// Every further prime folds its residue into the running value through its
/// [`CrtValue`]: `t = (c^exp mod prime - m) * coeff mod prime`, `m += t * r`.
/// `crt_values` must hold exactly one entry per prime past the second.
pub(crate) fn crt_exponentiate(
    c: &BigUint,
    primes: &[BigUint],
    dp: &BigUint,
    dq: &BigUint,
    qinv: &BigInt,
    crt_values: &[CrtValue],
) -> Result<BigUint> {
    if primes.len() < 2 || crt_values.len() != primes.len() - 2 {
        return Err(Error::Internal);
    }

    let p = BigInt::from_biguint(Plus, primes[0].clone());
    let q = BigInt::from_biguint(Plus, primes[1].clone());

    let m1 = BigInt::from_biguint(Plus, c.modpow(dp, &primes[0]));
    let m2 = BigInt::from_biguint(Plus, c.modpow(dq, &primes[1]));

    let mut h = m1 - &m2;
    while h.is_negative() {
        h += &p;
    }
    h *= qinv;
    h %= &p;
    if h.is_negative() {
        h += &p;
    }

    let mut m = m2 + &h * &q;
    h.zeroize();

    let mut c = BigInt::from_biguint(Plus, c.clone());
    let m_final = primes[2..]
        .iter()
        .zip(crt_values)
        .fold(m.clone(), |m, (prime, value)| {
            let prime = BigInt::from_biguint(Plus, prime.clone());

            let mut t = c.modpow(&value.exp, &prime);
            t -= &m;
            t *= &value.coeff;
            t %= &prime;
            if t.is_negative() {
                t += &prime;
            }

            let m = m + &t * &value.r;
            t.zeroize();
            m
        });

    // clear tmp values
    c.zeroize();
    m.zeroize();

    m_final.into_biguint().ok_or(Error::Internal)
}

/// Returns the blinded c, along with the unblinding factor.
fn blind<R: CryptoRngCore + ?Sized, K: PublicKeyParts>(
    rng: &mut R,
    key: &K,
    c: &BigUint,
) -> (BigUint, BigUint) {
    // Blinding involves multiplying c by r^e.
    // Then the decryption operation performs (m^e * r^e)^d mod n
    // which equals mr mod n. The factor of r can then be removed
    // by multiplying by the multiplicative inverse of r.

    let mut r: BigUint;
    let mut ir: Option<BigInt>;
    let unblinder;
    loop {
        r = rng.gen_biguint_below(key.n());
        if r.is_zero() {
            r = BigUint::one();
        }
        ir = r.clone().mod_inverse(key.n());
        if let Some(ir) = ir {
            if let Some(ub) = ir.into_biguint() {
                unblinder = ub;
                break;
            }
        }
    }

    let c = {
        let mut rpowe = r.modpow(key.e(), key.n()); // N != 0
        let mut c = c * &rpowe;
        c %= key.n();

        rpowe.zeroize();

        c
    };

    (c, unblinder)
}

/// Given an m and and unblinding factor, unblind the m.
fn unblind(key: &impl PublicKeyParts, m: &BigUint, unblinder: &BigUint) -> BigUint {
    (m * unblinder) % key.n()
}

/// Compute the modulus of a key from its primes.
pub(crate) fn compute_modulus(primes: &[BigUint]) -> BigUint {
    primes.iter().product()
}

/// Compute the private exponent from its primes (p and q) and public exponent
/// This uses Euler's totient function
#[inline]
pub(crate) fn compute_private_exponent_euler_totient(
    primes: &[BigUint],
    exp: &BigUint,
) -> Result<BigUint> {
    if primes.len() < 2 {
        return Err(Error::InvalidPrime);
    }

    let mut totient = BigUint::one();

    for prime in primes {
        totient *= prime - BigUint::one();
    }

    // NOTE: `mod_inverse` checks if `exp` evenly divides `totient` and returns `None` if so.
    // This ensures that `exp` is not a factor of any `(prime - 1)`.
    exp.clone()
        .mod_inverse(&totient)
        .and_then(IntoBigUint::into_biguint)
        .ok_or(Error::InvalidPrime)
}
