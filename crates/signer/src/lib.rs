pub mod commands;
pub mod config;
pub mod contracts;
pub mod diagnostics;
pub mod models;
pub mod signer;
pub mod tx_service;

pub use config::{Config, ConfigError, Flow};
pub use contracts::{SafeApi, SafeContract};
pub use models::{PrivateKey, SafeSignature, SafeTransactionData};
pub use signer::{HashSigner, OwnerSigner, SigningError};
pub use tx_service::{
    ProposeTransaction, RelayError, TransactionServiceApi, TransactionServiceClient,
};

use web3::types::Address;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("Failed to reach the JSON-RPC node: {0}")]
    Network(#[source] web3::Error),
    #[error("Safe contract call failed: {0}")]
    ContractCall(#[source] web3::contract::Error),
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error("The JSON-RPC node is on chain {node}, but chain {configured} was configured")]
    ChainMismatch { node: u64, configured: u64 },
}

impl From<web3::Error> for Error {
    fn from(err: web3::Error) -> Self {
        use web3::Error::*;
        match err {
            Unreachable | Transport(_) | Io(_) => Error::Network(err),
            // Reverts come back as RPC errors; undecodable answers as decoder errors.
            other => Error::ContractCall(web3::contract::Error::Api(other)),
        }
    }
}

impl From<web3::contract::Error> for Error {
    fn from(err: web3::contract::Error) -> Self {
        match err {
            web3::contract::Error::Api(api_error) => api_error.into(),
            other => Error::ContractCall(other),
        }
    }
}

pub fn hex_string(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// EIP-55 rendering of `address`, as expected by the Safe Transaction Service.
pub fn checksum(address: Address) -> String {
    safe_msg_encoding::to_checksum(&address.0)
}
