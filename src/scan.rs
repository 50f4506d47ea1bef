use std::path::Path;

use crate::error::Error;
use crate::fingerprint;
use crate::key::{LabeledKey, RsaPublicKey};

/// Classification of a single RSA key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The modulus carries the fingerprint of the vulnerable generator.
    Weak,
    /// No fingerprint match, or a modulus size the generator never produces.
    NotWeak,
}

impl Verdict {
    /// Classify `key`.
    pub fn of(key: &RsaPublicKey) -> Self {
        if fingerprint::is_weak(key.modulus()) {
            Self::Weak
        } else {
            Self::NotWeak
        }
    }

    /// Whether this is [`Verdict::Weak`].
    pub fn is_weak(&self) -> bool {
        matches!(self, Self::Weak)
    }
}

/// Result of scanning every key extracted from one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// No key was weak; `checked` keys were tested (possibly zero).
    AllPass { checked: usize },
    /// The first weak key found. Keys after it were not tested.
    Weak(LabeledKey),
}

impl ScanOutcome {
    /// Whether no weak key was found.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::AllPass { .. })
    }

    /// Turn a weak finding for the input at `path` into an error.
    pub fn ensure_pass(self, path: &Path) -> Result<(), Error> {
        match self {
            Self::AllPass { .. } => Ok(()),
            Self::Weak(_) => Err(Error::Vulnerable {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Test keys in order, stopping at the first weak one.
///
/// `keys` is consumed lazily, so nothing past the first weak key is pulled.
pub fn scan<I>(keys: I) -> ScanOutcome
where
    I: IntoIterator<Item = LabeledKey>,
{
    let mut checked = 0;
    let weak = keys
        .into_iter()
        .inspect(|_| checked += 1)
        .find(|k| Verdict::of(&k.key).is_weak());

    match weak {
        Some(key) => {
            log::info!("weak key found after {checked} checked: {key}");
            ScanOutcome::Weak(key)
        }
        None => ScanOutcome::AllPass { checked },
    }
}
