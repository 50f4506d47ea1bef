//! Extraction of RSA public keys from PEM-encoded X.509 material.

use der::asn1::ObjectIdentifier;
use der::Decode;
use x509_cert::spki::SubjectPublicKeyInfoOwned;
use x509_cert::Certificate;

use crate::error::Error;
use crate::key::{LabeledKey, PublicKey, RsaPublicKey};

/// `rsaEncryption` (PKCS #1).
const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const CERTIFICATE_LABEL: &str = "CERTIFICATE";
const SPKI_LABEL: &str = "PUBLIC KEY";
const PKCS1_LABEL: &str = "RSA PUBLIC KEY";

/// Parse a PKCS #1 `RSAPublicKey` structure.
pub(crate) fn rsa_key_from_pkcs1_der(der_data: &[u8]) -> Result<RsaPublicKey, Error> {
    let key = pkcs1::RsaPublicKey::from_der(der_data).map_err(Error::RsaKeyParse)?;
    Ok(RsaPublicKey::from_be_bytes(
        key.modulus.as_bytes(),
        key.public_exponent.as_bytes(),
    ))
}

/// Narrow a SubjectPublicKeyInfo to the key it carries.
///
/// Non-RSA algorithms are not an error here; they come back as
/// [`PublicKey::Unsupported`] so callers can decide whether to skip them.
pub(crate) fn pubkey_from_spki(spki: &SubjectPublicKeyInfoOwned) -> Result<PublicKey, Error> {
    if spki.algorithm.oid != RSA_ENCRYPTION {
        return Ok(PublicKey::Unsupported(spki.algorithm.oid.to_string()));
    }
    let bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::RsaKeyParse(der::Tag::BitString.value_error()))?;
    rsa_key_from_pkcs1_der(bytes).map(PublicKey::Rsa)
}

/// Parse a DER-encoded SubjectPublicKeyInfo.
pub(crate) fn pubkey_from_spki_der(der_data: &[u8]) -> Result<PublicKey, Error> {
    let spki = SubjectPublicKeyInfoOwned::from_der(der_data).map_err(Error::SpkiParse)?;
    pubkey_from_spki(&spki)
}

/// Parse a DER certificate, returning its subject and subject public key.
pub(crate) fn pubkey_from_certificate_der(der_data: &[u8]) -> Result<(String, PublicKey), Error> {
    let cert = Certificate::from_der(der_data).map_err(Error::CertificateParse)?;
    let tbs = &cert.tbs_certificate;
    let key = pubkey_from_spki(&tbs.subject_public_key_info)?;
    Ok((tbs.subject.to_string(), key))
}

/// Parse a single PEM block holding one public key.
///
/// Tries, by label:
/// 1. SubjectPublicKeyInfo (`-----BEGIN PUBLIC KEY-----`)
/// 2. PKCS #1 (`-----BEGIN RSA PUBLIC KEY-----`)
/// 3. X.509 certificate (`-----BEGIN CERTIFICATE-----`), using its subject key
pub(crate) fn pubkey_from_pem(pem_data: &[u8]) -> Result<PublicKey, Error> {
    let block = pem::parse(pem_data)?;
    match block.tag() {
        SPKI_LABEL => pubkey_from_spki_der(block.contents()),
        PKCS1_LABEL => rsa_key_from_pkcs1_der(block.contents()).map(PublicKey::Rsa),
        CERTIFICATE_LABEL => pubkey_from_certificate_der(block.contents()).map(|(_, key)| key),
        other => Err(Error::UnexpectedPemLabel(other.to_string())),
    }
}

/// Extract the RSA keys of every certificate in a PEM stream, in stream order.
///
/// Blocks with any label other than `CERTIFICATE` are ignored, as are
/// certificates for non-RSA keys. A certificate block that fails to decode
/// aborts the whole extraction.
pub fn rsa_keys(pem_data: &[u8]) -> Result<Vec<LabeledKey>, Error> {
    let blocks = pem::parse_many(pem_data)?;
    let mut keys = Vec::new();
    for block in blocks.iter().filter(|b| b.tag() == CERTIFICATE_LABEL) {
        let (subject, key) = pubkey_from_certificate_der(block.contents())?;
        match key {
            PublicKey::Rsa(key) => keys.push(LabeledKey {
                label: subject,
                key,
            }),
            PublicKey::Unsupported(algorithm) => {
                log::debug!("skipping certificate for {subject}: key algorithm {algorithm}");
            }
        }
    }
    Ok(keys)
}
