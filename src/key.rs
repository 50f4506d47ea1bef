use std::fmt;

use num_bigint::BigUint;

/// An RSA public key as extracted from a certificate or key ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: BigUint,
    exponent: BigUint,
}

impl RsaPublicKey {
    /// Build a key from its modulus `n` and public exponent `e`.
    pub fn new(modulus: BigUint, exponent: BigUint) -> Self {
        Self { modulus, exponent }
    }

    /// Build a key from big-endian modulus and exponent bytes.
    pub fn from_be_bytes(modulus: &[u8], exponent: &[u8]) -> Self {
        Self::new(
            BigUint::from_bytes_be(modulus),
            BigUint::from_bytes_be(exponent),
        )
    }

    /// The modulus `n`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The public exponent `e`.
    pub fn exponent(&self) -> &BigUint {
        &self.exponent
    }

    /// Size of the modulus in bits.
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }
}

/// A decoded public key, narrowed to the algorithms the checker distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// An RSA key, the only kind the fingerprint applies to.
    Rsa(RsaPublicKey),
    /// Any other algorithm, identified by a printable name or OID.
    Unsupported(String),
}

impl PublicKey {
    /// The RSA key, if this is one.
    pub fn into_rsa(self) -> Option<RsaPublicKey> {
        match self {
            Self::Rsa(key) => Some(key),
            Self::Unsupported(_) => None,
        }
    }
}

/// An RSA key paired with a label for reporting (certificate subject or key ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledKey {
    /// Certificate subject or short key ID.
    pub label: String,
    /// The key itself.
    pub key: RsaPublicKey,
}

impl fmt::Display for LabeledKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-bit RSA)", self.label, self.key.bits())
    }
}
