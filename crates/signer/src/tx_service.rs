use crate::{checksum, hex_string, models::SafeSignature, SafeTransactionData};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;
use web3::types::{Address, H256};

const USER_AGENT: &str = concat!("safe-msg-signer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Failed to reach the Safe Transaction Service: {0}")]
    Unreachable(#[from] reqwest::Error),
    #[error("Bad Safe Transaction Service endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("The Safe Transaction Service rejected the proposal ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Everything the Transaction Service needs to store a pending Safe transaction together with
/// its first owner signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposeTransaction {
    pub safe: Address,
    pub transaction: SafeTransactionData,
    pub safe_tx_hash: H256,
    pub sender: Address,
    pub signature: SafeSignature,
}

/// Stores proposed transactions until enough owners have signed them.
#[async_trait(?Send)]
pub trait TransactionServiceApi {
    /// Submits `proposal` exactly once. Rejections are returned verbatim.
    async fn propose_transaction(&self, proposal: &ProposeTransaction) -> Result<(), RelayError>;
}

pub struct TransactionServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl TransactionServiceClient {
    pub fn new(base_url: Url) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base_url })
    }

    fn multisig_transactions_url(&self, safe: Address) -> Result<Url, RelayError> {
        // `Url::join` replaces the last path segment unless it ends with a slash.
        let mut base_url = self.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let path = format!("api/v1/safes/{}/multisig-transactions/", checksum(safe));
        Ok(base_url.join(&path)?)
    }
}

#[async_trait(?Send)]
impl TransactionServiceApi for TransactionServiceClient {
    async fn propose_transaction(&self, proposal: &ProposeTransaction) -> Result<(), RelayError> {
        let url = self.multisig_transactions_url(proposal.safe)?;
        let body = ProposeTransactionBody::from(proposal);
        debug!(%url, ?body, "Proposing transaction");

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            info!(%status, "The Safe Transaction Service accepted the proposal");
            Ok(())
        } else {
            let body = response.text().await?;
            Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// The JSON body of `POST /api/v1/safes/{address}/multisig-transactions/`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposeTransactionBody {
    to: String,
    value: String,
    data: String,
    operation: u8,
    safe_tx_gas: String,
    base_gas: String,
    gas_price: String,
    gas_token: String,
    refund_receiver: String,
    nonce: String,
    contract_transaction_hash: String,
    sender: String,
    signature: String,
}

impl From<&ProposeTransaction> for ProposeTransactionBody {
    fn from(proposal: &ProposeTransaction) -> Self {
        let tx = &proposal.transaction;
        Self {
            to: checksum(tx.to),
            value: tx.value.to_string(),
            data: hex_string(&tx.data.0),
            operation: tx.operation.as_u8(),
            safe_tx_gas: tx.safe_tx_gas.to_string(),
            base_gas: tx.base_gas.to_string(),
            gas_price: tx.gas_price.to_string(),
            gas_token: checksum(tx.gas_token),
            refund_receiver: checksum(tx.refund_receiver),
            nonce: tx.nonce.to_string(),
            contract_transaction_hash: hex_string(proposal.safe_tx_hash.as_bytes()),
            sender: checksum(proposal.sender),
            signature: hex_string(&proposal.signature.bytes),
        }
    }
}
