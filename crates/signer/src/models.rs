use crate::{checksum, hex_string};
use safe_msg_encoding::{sign_message_calldata, Operation, SIGN_MSG_LIB};
use std::fmt;
use web3::types::{Address, Bytes, U256};
use zeroize::Zeroizing;

/// A hex-encoded owner key. The buffer is wiped on drop and never printed.
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<String>);

impl PrivateKey {
    pub fn new(hex: String) -> Self {
        Self(Zeroizing::new(hex))
    }

    /// The key digits, without any `0x` prefix.
    pub fn hex_digits(&self) -> &str {
        let s = self.0.as_str();
        s.strip_prefix("0x").unwrap_or(s)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A Safe transaction, as hashed by the Safe contract and stored by the Transaction Service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTransactionData {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
    pub safe_tx_gas: U256,
    pub base_gas: U256,
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
}

impl SafeTransactionData {
    /// A delegate call into `SignMessageLib.signMessage(message)`, with no value, no gas refund
    /// and the given Safe `nonce`.
    pub fn sign_message(message: &str, nonce: U256) -> Self {
        Self {
            to: Address::from(SIGN_MSG_LIB),
            value: U256::zero(),
            data: Bytes(sign_message_calldata(message.as_bytes())),
            operation: Operation::DelegateCall,
            safe_tx_gas: U256::zero(),
            base_gas: U256::zero(),
            gas_price: U256::zero(),
            gas_token: Address::zero(),
            refund_receiver: Address::zero(),
            nonce,
        }
    }
}

/// An owner's signature over a Safe transaction hash: `r || s || v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeSignature {
    pub signer: Address,
    pub bytes: Vec<u8>,
}

impl fmt::Display for SafeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", hex_string(&self.bytes), checksum(self.signer))
    }
}
