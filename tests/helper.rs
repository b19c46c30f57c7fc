//! Key store behaviour across instances and threads.

use std::sync::Arc;
use std::thread;

use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsa_helper::{
    pkcs1::EncodeRsaPublicKey,
    pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding},
    Error, HelperConfig, RsaHelper, RsaPrivateKey,
};

fn key(seed: u8) -> RsaPrivateKey {
    let mut rng = ChaCha8Rng::from_seed([seed; 32]);
    RsaPrivateKey::new(&mut rng, 1024).unwrap()
}

fn store(seed: u8) -> RsaHelper {
    let key = key(seed);
    let helper = RsaHelper::new();
    let pem = key.to_pkcs8_pem(LineEnding::LF).unwrap();
    helper.import_private_key(pem.as_bytes()).unwrap();
    helper
}

#[test]
fn exchange_public_key_between_stores() {
    let alice = store(1);
    let bob = RsaHelper::new();

    let pair = alice.export_key_pair().unwrap();
    bob.import_public_key(pair.public.as_bytes()).unwrap();

    let ciphertext = bob.encrypt_oaep(b"to alice", b"ctx").unwrap();
    assert_eq!(alice.decrypt_oaep(&ciphertext, b"ctx").unwrap(), b"to alice");

    let sealed = alice.private_encrypt(b"from alice").unwrap();
    assert_eq!(bob.public_decrypt(&sealed).unwrap(), b"from alice");

    let signature = alice.sign(b"statement").unwrap();
    bob.verify(b"statement", &signature).unwrap();
    assert!(matches!(
        bob.verify(b"other statement", &signature),
        Err(Error::Verification)
    ));
}

#[test]
fn spki_and_pkcs1_public_envelopes_are_equivalent() {
    let public = key(2).to_public_key();
    let spki = public.to_public_key_pem(LineEnding::LF).unwrap();
    let pkcs1 = public.to_pkcs1_pem(LineEnding::LF).unwrap();

    let a = RsaHelper::new();
    let b = RsaHelper::new();
    assert_eq!(
        *a.import_public_key(spki.as_bytes()).unwrap(),
        *b.import_public_key(pkcs1.as_bytes()).unwrap()
    );
}

#[test]
fn decrypt_with_wrong_store_fails() {
    let alice = store(3);
    let mallory = store(4);

    let ciphertext = alice.encrypt_pkcs1v15(b"secret").unwrap();
    assert!(matches!(
        mallory.decrypt_pkcs1v15(&ciphertext),
        Err(Error::Decryption)
    ));
}

#[test]
fn readers_keep_their_snapshot_while_key_is_replaced() {
    let helper = Arc::new(store(5));
    let ciphertext = helper.encrypt_pkcs1v15(b"snapshot").unwrap();
    let original = helper.private_key().unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let helper = Arc::clone(&helper);
            let ciphertext = ciphertext.clone();
            let original = Arc::clone(&original);
            thread::spawn(move || {
                // Either the old or the new key is seen; never a torn state.
                let snapshot = helper.private_key().unwrap();
                let result = snapshot.decrypt(rsa_helper::Pkcs1v15Encrypt, &ciphertext);
                (Arc::ptr_eq(&snapshot, &original), result)
            })
        })
        .collect();

    helper.set_private_key(key(6));

    for reader in readers {
        let (saw_original, result) = reader.join().unwrap();
        if saw_original {
            assert_eq!(result.unwrap(), b"snapshot");
        }
    }
}

#[test]
fn persisted_files_round_trip() {
    let dir = std::env::temp_dir().join(format!("rsa-helper-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let helper = RsaHelper::with_config(
        HelperConfig::default()
            .with_default_bits(1024)
            .with_file_mode(0o600),
    );
    helper.persist_key_pair(&dir, "service").unwrap();

    let text = std::fs::read_to_string(dir.join("service.pub")).unwrap();
    assert!(text.starts_with("-----BEGIN RSA PUBLIC KEY-----\n"));

    let reloaded = RsaHelper::new();
    reloaded
        .load_private_key_from_file(dir.join("service"))
        .unwrap();
    assert_eq!(
        reloaded.export_key_pair().unwrap(),
        helper.export_key_pair().unwrap()
    );

    std::fs::remove_dir_all(&dir).unwrap();
}
