use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse PEM data: {0}")]
    PemParse(#[from] pem::PemError),

    #[error("failed to parse X.509 certificate: {0}")]
    CertificateParse(der::Error),

    #[error("unexpected PEM label: {0}")]
    UnexpectedPemLabel(String),

    #[error("failed to parse SubjectPublicKeyInfo: {0}")]
    SpkiParse(der::Error),

    #[error("failed to parse RSA public key: {0}")]
    RsaKeyParse(der::Error),

    #[error("not an RSA key")]
    NotRsa,

    #[error("failed to decode armored key ring: {0}")]
    KeyRingParse(pgp::errors::Error),

    #[error("public key in {} is vulnerable to roca", path.display())]
    Vulnerable { path: PathBuf },
}
