use crate::{checksum, models::SafeTransactionData, Error};
use async_trait::async_trait;
use tracing::{debug, trace};
use web3::{
    contract::{Contract, Options},
    types::{Address, Bytes, H256, U256},
    Transport, Web3,
};

static SAFE_ABI: &[u8] = include_bytes!("abi/Safe.json");

/// The read-only view of a Safe that both commands need.
#[async_trait(?Send)]
pub trait SafeApi {
    fn address(&self) -> Address;

    /// The chain ID reported by the node the Safe is read through.
    async fn chain_id(&self) -> Result<u64, Error>;

    /// `getMessageHash(bytes)`, returned as is.
    async fn get_message_hash(&self, message: &[u8]) -> Result<H256, Error>;

    /// The nonce the next Safe transaction must use.
    async fn nonce(&self) -> Result<U256, Error>;

    /// The Safe's canonical hash for `transaction`, which owners sign.
    async fn get_transaction_hash(&self, transaction: &SafeTransactionData)
        -> Result<H256, Error>;
}

pub struct SafeContract<T>
where
    T: Transport,
{
    web3: Web3<T>,
    safe: Contract<T>,
}

impl<T> SafeContract<T>
where
    T: Transport,
{
    pub fn new(web3: Web3<T>, address: Address) -> Result<Self, Error> {
        let safe = Contract::from_json(web3.eth(), address, SAFE_ABI)
            .map_err(|err| Error::ContractCall(err.into()))?;
        Ok(Self { web3, safe })
    }
}

#[async_trait(?Send)]
impl<T> SafeApi for SafeContract<T>
where
    T: Transport,
{
    fn address(&self) -> Address {
        self.safe.address()
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        let chain_id = self.web3.eth().chain_id().await?;
        trace!(%chain_id, "Node reported its chain ID");
        if chain_id > U256::from(u64::MAX) {
            let reason = format!("chain ID {chain_id} does not fit in 64 bits");
            return Err(web3::Error::InvalidResponse(reason).into());
        }
        Ok(chain_id.as_u64())
    }

    async fn get_message_hash(&self, message: &[u8]) -> Result<H256, Error> {
        trace!(
            safe = checksum(self.address()).as_str(),
            message_len = message.len(),
            "Querying the Safe for a message hash"
        );
        let message_hash: H256 = self
            .safe
            .query(
                "getMessageHash",
                (Bytes(message.to_vec()),),
                None,
                Options::default(),
                None,
            )
            .await?;
        Ok(message_hash)
    }

    async fn nonce(&self) -> Result<U256, Error> {
        let nonce: U256 = self
            .safe
            .query("nonce", (), None, Options::default(), None)
            .await?;
        debug!(%nonce, "Read the Safe nonce");
        Ok(nonce)
    }

    async fn get_transaction_hash(
        &self,
        transaction: &SafeTransactionData,
    ) -> Result<H256, Error> {
        let tx = transaction.clone();
        let safe_tx_hash: H256 = self
            .safe
            .query(
                "getTransactionHash",
                (
                    tx.to,
                    tx.value,
                    tx.data,
                    U256::from(tx.operation.as_u8()),
                    tx.safe_tx_gas,
                    tx.base_gas,
                    tx.gas_price,
                    tx.gas_token,
                    tx.refund_receiver,
                    tx.nonce,
                ),
                None,
                Options::default(),
                None,
            )
            .await?;
        Ok(safe_tx_hash)
    }
}
