use crate::models::{PrivateKey, SafeSignature};
use secp256k1::SecretKey;
use std::str::FromStr;
use thiserror::Error;
use web3::{
    signing::{hash_message, Key, SecretKeyRef},
    types::{Address, H256},
};

/// Safe marks `eth_sign` signatures by shifting `v` from 27/28 to 31/32.
const ETH_SIGN_V_OFFSET: u64 = 4;

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("PRIVATE_KEY is not a valid secp256k1 key: {0}")]
    InvalidKey(#[source] secp256k1::Error),
    #[error("Failed to sign the Safe transaction hash: {0}")]
    Sign(#[source] web3::signing::SigningError),
}

/// Something that can approve Safe transaction hashes on behalf of an owner.
pub trait HashSigner {
    fn address(&self) -> Address;

    fn sign_hash(&self, hash: H256) -> Result<SafeSignature, SigningError>;
}

/// Signs with a Safe owner's key held in memory for the lifetime of this value.
pub struct OwnerSigner {
    key: SecretKey,
    address: Address,
}

impl OwnerSigner {
    pub fn from_private_key(private_key: &PrivateKey) -> Result<Self, SigningError> {
        let key =
            SecretKey::from_str(private_key.hex_digits()).map_err(SigningError::InvalidKey)?;
        let address = SecretKeyRef::new(&key).address();
        Ok(Self { key, address })
    }
}

impl HashSigner for OwnerSigner {
    fn address(&self) -> Address {
        self.address
    }

    /// Produces an `eth_sign` style signature: the hash is signed as an EIP-191 personal
    /// message, the way Safe owners approve transactions off-chain.
    fn sign_hash(&self, hash: H256) -> Result<SafeSignature, SigningError> {
        let digest = hash_message(hash.as_bytes());
        let signature = SecretKeyRef::new(&self.key)
            .sign_message(digest.as_bytes())
            .map_err(SigningError::Sign)?;

        let mut bytes = Vec::with_capacity(65);
        bytes.extend_from_slice(signature.r.as_bytes());
        bytes.extend_from_slice(signature.s.as_bytes());
        bytes.push(eth_sign_v(signature.v));

        Ok(SafeSignature {
            signer: self.address,
            bytes,
        })
    }
}

/// `v` may come back as a bare recovery ID (0/1) or already offset (27/28).
fn eth_sign_v(v: u64) -> u8 {
    let v = if v < 27 { v + 27 } else { v };
    (v + ETH_SIGN_V_OFFSET) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use web3::signing::recover;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const ADDRESS: &str = "2c7536e3605d9c16a7a3d7b1898e529396a65c23";

    fn signer() -> OwnerSigner {
        OwnerSigner::from_private_key(&PrivateKey::new(KEY.to_owned())).unwrap()
    }

    #[test]
    fn address_is_derived_from_the_key() {
        assert_eq!(signer().address(), ADDRESS.parse().unwrap());
    }

    #[test]
    fn prefix_is_optional() {
        let unprefixed =
            OwnerSigner::from_private_key(&PrivateKey::new(KEY[2..].to_owned())).unwrap();
        assert_eq!(unprefixed.address(), signer().address());
    }

    #[test]
    fn invalid_keys_are_rejected() {
        for key in ["", "0x", "0x1234", "not hex at all", &"00".repeat(32)] {
            let result = OwnerSigner::from_private_key(&PrivateKey::new(key.to_owned()));
            assert!(matches!(result, Err(SigningError::InvalidKey(_))), "{key}");
        }
    }

    #[test]
    fn signature_recovers_to_the_owner() {
        let signer = signer();
        let hash = H256::repeat_byte(0x42);

        let signature = signer.sign_hash(hash).unwrap();
        assert_eq!(signature.signer, signer.address());
        assert_eq!(signature.bytes.len(), 65);

        let v = signature.bytes[64];
        assert!(v == 31 || v == 32, "v = {v}");

        let recovery_id = (v - 31) as i32;
        let recovered = recover(
            hash_message(hash.as_bytes()).as_bytes(),
            &signature.bytes[..64],
            recovery_id,
        )
        .unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn signing_is_deterministic() {
        let hash = H256::repeat_byte(0x01);
        assert_eq!(
            signer().sign_hash(hash).unwrap(),
            signer().sign_hash(hash).unwrap()
        );
    }

    #[test]
    fn v_normalisation() {
        assert_eq!(eth_sign_v(0), 31);
        assert_eq!(eth_sign_v(1), 32);
        assert_eq!(eth_sign_v(27), 31);
        assert_eq!(eth_sign_v(28), 32);
    }
}
