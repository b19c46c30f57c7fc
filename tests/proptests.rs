//! Property-based tests.

use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use rsa_helper::{
    inverse, pkcs1v15,
    sha2::Sha256,
    signature::{Keypair, SignatureEncoding, Signer, Verifier},
    traits::PublicKeyParts,
    Oaep, RsaPrivateKey,
};

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. It's insecure and optimized for test speed.
    fn private_key()(seed in any::<[u8; 32]>()) -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::new(&mut rng, 512).unwrap()
    }
}

proptest! {
    #[test]
    fn pkcs1v15_sign_roundtrip(private_key in private_key(), msg in any::<Vec<u8>>()) {
        let signing_key = pkcs1v15::SigningKey::<Sha256>::new(private_key);
        let signature_bytes = signing_key.sign(&msg).to_bytes();

        let verifying_key = signing_key.verifying_key();
        let signature = pkcs1v15::Signature::try_from(&*signature_bytes).unwrap();
        prop_assert!(verifying_key.verify(&msg, &signature).is_ok());
    }

    #[test]
    fn inverse_roundtrip(
        private_key in private_key(),
        msg in proptest::collection::vec(any::<u8>(), 0..=53),
        seed in any::<[u8; 32]>(),
    ) {
        let mut rng = ChaCha8Rng::from_seed(seed);
        let public_key = private_key.to_public_key();

        let sealed = inverse::private_encrypt(Some(&mut rng), &private_key, &msg).unwrap();
        prop_assert!(sealed.len() <= private_key.size());
        prop_assert_eq!(inverse::public_decrypt(&public_key, &sealed).unwrap(), msg.clone());

        let fixed = inverse::private_encrypt_fixed(Some(&mut rng), &private_key, &msg).unwrap();
        prop_assert_eq!(fixed.len(), private_key.size());
        prop_assert_eq!(inverse::public_decrypt(&public_key, &fixed).unwrap(), msg);
    }

    #[test]
    fn oaep_label_binding(
        private_key in private_key(),
        msg in proptest::collection::vec(any::<u8>(), 0..=22),
        label in any::<Vec<u8>>(),
        seed in any::<[u8; 32]>(),
    ) {
        // 512-bit keys leave 64 - 2 * 20 - 2 = 22 bytes with SHA-1.
        let mut rng = ChaCha8Rng::from_seed(seed);
        let public_key = private_key.to_public_key();

        let ciphertext = public_key
            .encrypt(&mut rng, Oaep::new_with_label::<sha1::Sha1, _>(&label), &msg)
            .unwrap();
        prop_assert_eq!(
            private_key.decrypt(Oaep::new_with_label::<sha1::Sha1, _>(&label), &ciphertext).unwrap(),
            msg
        );

        let mut other = label.clone();
        other.push(0);
        prop_assert!(private_key
            .decrypt(Oaep::new_with_label::<sha1::Sha1, _>(&other), &ciphertext)
            .is_err());
    }
}
