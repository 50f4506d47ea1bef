//! # rocacheck-rs
//!
//! Detect RSA public keys produced by the key generator affected by ROCA
//! ("Return of Coppersmith's Attack", CVE-2017-15361).
//!
//! The vulnerable generator builds its primes as `k * M + (65537^a mod M)`
//! where `M` is a primorial, which leaves a fingerprint on the modulus that
//! can be checked with a handful of small modular reductions. No factoring is
//! involved. The primorial table is computed at build time, so checks
//! require no I/O.
//!
//! Keys can be supplied directly, as PEM certificates, or as armored OpenPGP
//! key rings.
//!
//! # Example
//!
//! ```no_run
//! # fn example(pem: &[u8]) -> Result<(), rocacheck_rs::Error> {
//! match rocacheck_rs::check_certificates(pem)? {
//!     rocacheck_rs::ScanOutcome::Weak(key) => println!("vulnerable to ROCA: {key}"),
//!     rocacheck_rs::ScanOutcome::AllPass { checked } => println!("{checked} keys ok"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cert;
mod error;
mod fingerprint;
mod key;
pub mod keyring;
mod scan;

pub use error::Error;
pub use key::{LabeledKey, PublicKey, RsaPublicKey};
pub use num_bigint::BigUint;
pub use scan::{scan, ScanOutcome, Verdict};

use std::ops::RangeInclusive;
use std::path::Path;

/// Check whether an RSA public key carries the ROCA fingerprint.
pub fn is_weak(key: &RsaPublicKey) -> bool {
    fingerprint::is_weak(key.modulus())
}

/// Check a bare RSA modulus.
///
/// Moduli outside [`supported_key_sizes`] are never weak.
pub fn is_weak_modulus(n: &BigUint) -> bool {
    fingerprint::is_weak(n)
}

/// Modulus bit lengths the vulnerable generator is known to produce.
pub fn supported_key_sizes() -> impl Iterator<Item = RangeInclusive<u64>> {
    fingerprint::key_sizes()
}

fn verdict_for(key: PublicKey) -> Result<Verdict, Error> {
    key.into_rsa()
        .map(|key| Verdict::of(&key))
        .ok_or(Error::NotRsa)
}

/// Check a PEM-encoded public key.
///
/// Accepts SubjectPublicKeyInfo PEM, PKCS #1 RSA public key PEM, or a single
/// certificate. Returns `Err` if the data cannot be parsed or is not RSA.
pub fn check_public_key_pem(pem_data: &[u8]) -> Result<Verdict, Error> {
    verdict_for(cert::pubkey_from_pem(pem_data)?)
}

/// Check a DER-encoded SubjectPublicKeyInfo.
pub fn check_public_key_der(der_data: &[u8]) -> Result<Verdict, Error> {
    verdict_for(cert::pubkey_from_spki_der(der_data)?)
}

/// Check every RSA certificate in a PEM stream.
///
/// Non-certificate blocks and non-RSA certificates are ignored; a corrupt
/// certificate is an error.
pub fn check_certificates(pem_data: &[u8]) -> Result<ScanOutcome, Error> {
    Ok(scan(cert::rsa_keys(pem_data)?))
}

/// Check the RSA primary key of every entity in an armored key ring.
pub fn check_keyring(armored: &[u8]) -> Result<ScanOutcome, Error> {
    Ok(scan(keyring::rsa_keys(armored)?))
}

/// Read an input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// [`check_certificates`] on the contents of a file.
pub fn check_certificate_file(path: &Path) -> Result<ScanOutcome, Error> {
    check_certificates(&read_input(path)?)
}

/// [`check_keyring`] on the contents of a file.
pub fn check_keyring_file(path: &Path) -> Result<ScanOutcome, Error> {
    check_keyring(&read_input(path)?)
}
