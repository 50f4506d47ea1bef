use std::path::Path;

use rocacheck_rs::{BigUint, Error, RsaPublicKey, ScanOutcome, Verdict};

/// Public keys generated by an affected Infineon library.
const WEAK_KEYS: [&[u8]; 3] = [
    include_bytes!("data/weak_spki_0.pem"),
    include_bytes!("data/weak_spki_1.pem"),
    include_bytes!("data/weak_spki_2.pem"),
];

/// Ordinary 2048-bit RSA public keys.
const STRONG_KEYS: [&[u8]; 3] = [
    include_bytes!("data/strong_spki_0.pem"),
    include_bytes!("data/strong_spki_1.pem"),
    include_bytes!("data/strong_spki_2.pem"),
];

fn data(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn known_weak_keys_are_detected() {
    for (i, pem) in WEAK_KEYS.iter().enumerate() {
        let verdict = rocacheck_rs::check_public_key_pem(pem).expect("should parse PEM");
        assert_eq!(verdict, Verdict::Weak, "expected key {i} to fail");
    }
}

#[test]
fn known_strong_keys_pass() {
    for (i, pem) in STRONG_KEYS.iter().enumerate() {
        let verdict = rocacheck_rs::check_public_key_pem(pem).expect("should parse PEM");
        assert_eq!(verdict, Verdict::NotWeak, "expected key {i} to pass");
    }
}

#[test]
fn pkcs1_pem_is_accepted() {
    let pem = include_bytes!("data/weak_pkcs1.pem");
    assert_eq!(
        rocacheck_rs::check_public_key_pem(pem).unwrap(),
        Verdict::Weak
    );
}

#[test]
fn verdict_is_stable_across_calls_and_threads() {
    let expected = rocacheck_rs::check_public_key_pem(WEAK_KEYS[1]).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| rocacheck_rs::check_public_key_pem(WEAK_KEYS[1]).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn moduli_outside_supported_sizes_are_not_weak() {
    let sizes: Vec<_> = rocacheck_rs::supported_key_sizes().collect();
    let smallest = *sizes.first().unwrap().start();
    let largest = *sizes.last().unwrap().end();
    assert_eq!((smallest, largest), (512, 4096));

    // 65537^31 is 497 bits and would otherwise match every prime.
    let below = BigUint::from(65537u32).pow(31);
    assert!(below.bits() < smallest);
    assert!(!rocacheck_rs::is_weak_modulus(&below));

    let above = (BigUint::from(1u32) << largest as usize) | BigUint::from(1u32);
    assert_eq!(above.bits(), largest + 1);
    assert!(!rocacheck_rs::is_weak_modulus(&above));
}

#[test]
fn exponent_does_not_affect_verdict() {
    let n = BigUint::from(65537u32).pow(40);
    for e in [3u32, 17, 65537] {
        let key = RsaPublicKey::new(n.clone(), BigUint::from(e));
        assert!(rocacheck_rs::is_weak(&key));
    }
}

#[test]
fn weak_certificate_fails() {
    let pem = include_bytes!("data/weak_cert.pem");
    match rocacheck_rs::check_certificates(pem).unwrap() {
        ScanOutcome::Weak(key) => {
            assert_eq!(key.label, "CN=weak.example");
            assert_eq!(key.key.bits(), 2048);
        }
        other => panic!("expected weak outcome, got {other:?}"),
    }
}

#[test]
fn strong_chain_passes() {
    let pem = include_bytes!("data/good_chain.pem");
    assert_eq!(
        rocacheck_rs::check_certificates(pem).unwrap(),
        ScanOutcome::AllPass { checked: 2 }
    );
}

#[test]
fn weak_key_in_non_certificate_block_is_ignored() {
    let pem = include_bytes!("data/certs_with_other_blocks.pem");
    assert_eq!(
        rocacheck_rs::check_certificates(pem).unwrap(),
        ScanOutcome::AllPass { checked: 2 }
    );
}

#[test]
fn chain_reports_first_weak_certificate() {
    let pem = include_bytes!("data/chain_with_weak.pem");
    let outcome = rocacheck_rs::check_certificates(pem).unwrap();
    assert!(matches!(outcome, ScanOutcome::Weak(ref key) if key.label == "CN=weak.example"));
}

#[test]
fn corrupt_certificate_returns_error() {
    let pem = include_bytes!("data/corrupt_cert.pem");
    assert!(matches!(
        rocacheck_rs::check_certificates(pem),
        Err(Error::CertificateParse(_))
    ));
}

#[test]
fn certificate_stream_without_rsa_passes() {
    let outcome = rocacheck_rs::check_certificates(b"").unwrap();
    assert_eq!(outcome, ScanOutcome::AllPass { checked: 0 });
}

#[test]
fn mixed_keyring_passes() {
    let armored = include_bytes!("data/mixed_keyring.asc");
    assert_eq!(
        rocacheck_rs::check_keyring(armored).unwrap(),
        ScanOutcome::AllPass { checked: 2 }
    );
}

#[test]
fn weak_keyring_fails() {
    let armored = include_bytes!("data/weak_keyring.asc");
    let outcome = rocacheck_rs::check_keyring(armored).unwrap();
    assert!(matches!(outcome, ScanOutcome::Weak(ref key) if key.label == "CBECC1F8"));
}

#[test]
fn weak_key_after_non_rsa_entity_fails() {
    let armored = include_bytes!("data/keyring_with_weak.asc");
    let keys = rocacheck_rs::keyring::rsa_keys(armored).unwrap();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].label, "CBECC1F8");
    assert!(!rocacheck_rs::scan(keys).is_pass());
}

#[test]
fn file_checks() {
    let outcome = rocacheck_rs::check_certificate_file(&data("weak_cert.pem")).unwrap();
    let err = outcome.ensure_pass(Path::new("weak_cert.pem")).unwrap_err();
    assert_eq!(err.to_string(), "public key in weak_cert.pem is vulnerable to roca");

    let outcome = rocacheck_rs::check_keyring_file(&data("mixed_keyring.asc")).unwrap();
    assert!(outcome.is_pass());
}

#[test]
fn missing_file_returns_io_error() {
    let result = rocacheck_rs::check_certificate_file(&data("does-not-exist.pem"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn non_rsa_public_key_is_rejected() {
    let pem = include_bytes!("data/mixed_algorithms.pem");
    assert!(matches!(
        rocacheck_rs::check_public_key_pem(pem),
        Err(Error::NotRsa)
    ));
}

#[test]
fn invalid_der_returns_error() {
    let result = rocacheck_rs::check_public_key_der(b"\x00\x01\x02");
    assert!(result.is_err());
}

#[test]
fn invalid_pem_returns_error() {
    let result = rocacheck_rs::check_public_key_pem(b"not a pem");
    assert!(result.is_err());
}
