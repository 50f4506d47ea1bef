//! Extraction of RSA public keys from ASCII-armored OpenPGP key rings.

use pgp::composed::{Deserializable, SignedPublicKey};
use pgp::types::{KeyDetails, KeyId, PublicKeyTrait, PublicParams};
use rsa::traits::PublicKeyParts;

use crate::error::Error;
use crate::key::{LabeledKey, PublicKey, RsaPublicKey};

/// Short form of a key ID: the low 32 bits as upper-case hex.
pub(crate) fn short_key_id(id: &KeyId) -> String {
    let bytes: &[u8] = id.as_ref();
    hex::encode_upper(&bytes[bytes.len().saturating_sub(4)..])
}

/// Narrow the primary key of an entity to the key it carries.
pub(crate) fn primary_pubkey(entity: &SignedPublicKey) -> PublicKey {
    match entity.primary_key.public_params() {
        PublicParams::RSA(params) => PublicKey::Rsa(RsaPublicKey::from_be_bytes(
            &params.key.n().to_bytes_be(),
            &params.key.e().to_bytes_be(),
        )),
        _ => PublicKey::Unsupported(format!("{:?}", entity.primary_key.algorithm())),
    }
}

/// Extract the RSA primary keys of an armored key ring, in entity order.
///
/// Each key is labeled with its short key ID. Subkeys are not examined.
/// Entities that fail to parse are skipped; only a failure to read the
/// armored container itself is an error.
pub fn rsa_keys(armored: &[u8]) -> Result<Vec<LabeledKey>, Error> {
    let (entities, _headers) =
        SignedPublicKey::from_armor_many(armored).map_err(Error::KeyRingParse)?;

    let mut keys = Vec::new();
    for entity in entities {
        let entity = match entity {
            Ok(entity) => entity,
            Err(err) => {
                log::warn!("skipping malformed key ring entity: {err}");
                continue;
            }
        };
        let label = short_key_id(&entity.primary_key.key_id());
        match primary_pubkey(&entity) {
            PublicKey::Rsa(key) => keys.push(LabeledKey { label, key }),
            PublicKey::Unsupported(algorithm) => {
                log::debug!("skipping key {label}: algorithm {algorithm}");
            }
        }
    }
    Ok(keys)
}
