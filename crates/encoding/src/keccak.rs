use crate::Bytes32;
use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 over the concatenation of `data`.
pub fn keccak256<const N: usize>(data: [&[u8]; N]) -> Bytes32 {
    let mut hasher = Keccak::v256();
    for elem in data {
        hasher.update(elem);
    }
    let mut hash = [0; 32];
    hasher.finalize(&mut hash);
    hash
}
