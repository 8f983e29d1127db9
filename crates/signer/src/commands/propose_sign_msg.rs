use crate::{
    checksum, hex_string, models::SafeSignature, Config, Error, HashSigner, OwnerSigner,
    ProposeTransaction, SafeApi, SafeTransactionData, TransactionServiceApi,
    TransactionServiceClient,
};
use tracing::{debug, info};
use web3::types::{Address, H256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedProposal {
    pub safe_tx_hash: H256,
    pub sender: Address,
    pub signature: SafeSignature,
}

/// Proposes a delegate call from the Safe into `SignMessageLib.signMessage(message)`, signed by
/// `signer`.
///
/// The proposal is submitted exactly once. Nothing is deduplicated: calling this twice with the
/// same inputs proposes twice, and the relay decides what to make of that.
pub async fn submit_sign_message_proposal<S, K, R>(
    safe: &S,
    signer: &K,
    tx_service: &R,
    message: &str,
    chain_id: u64,
) -> Result<SubmittedProposal, Error>
where
    S: SafeApi + ?Sized,
    K: HashSigner + ?Sized,
    R: TransactionServiceApi + ?Sized,
{
    let sender = signer.address();

    // The Transaction Service is chain-specific, so the node had better agree with it.
    let node_chain_id = safe.chain_id().await?;
    if node_chain_id != chain_id {
        return Err(Error::ChainMismatch {
            node: node_chain_id,
            configured: chain_id,
        });
    }

    let nonce = safe.nonce().await?;
    let transaction = SafeTransactionData::sign_message(message, nonce);
    debug!(?transaction, "Built the Safe transaction");

    let safe_tx_hash = safe.get_transaction_hash(&transaction).await?;
    info!(
        safe_tx_hash = hex_string(safe_tx_hash.as_bytes()).as_str(),
        %nonce,
        "Got the Safe transaction hash"
    );

    let signature = signer.sign_hash(safe_tx_hash)?;
    debug!(%signature, "Signed the Safe transaction hash");

    let proposal = ProposeTransaction {
        safe: safe.address(),
        transaction,
        safe_tx_hash,
        sender,
        signature: signature.clone(),
    };
    tx_service.propose_transaction(&proposal).await?;
    info!(
        safe = checksum(proposal.safe).as_str(),
        sender = checksum(sender).as_str(),
        "Proposed the transaction"
    );

    Ok(SubmittedProposal {
        safe_tx_hash,
        sender,
        signature,
    })
}

pub async fn propose_sign_message(config: Config) -> Result<(), Error> {
    // Derived before any I/O, so a bad key never costs a network round trip.
    let signer = OwnerSigner::from_private_key(config.owner_private_key()?)?;
    let tx_service = TransactionServiceClient::new(config.tx_service_url()?.clone())?;
    let safe = super::init_safe(&config)?;

    let submitted = submit_sign_message_proposal(
        &safe,
        &signer,
        &tx_service,
        &config.message,
        config.chain_id,
    )
    .await?;
    drop(signer);

    println!("{}", proposal_report(&config.message, submitted.safe_tx_hash));
    Ok(())
}

fn proposal_report(message: &str, safe_tx_hash: H256) -> String {
    format!(
        "proposed: Safe ---delegatecall---> SignMessageLib.signMessage(\"{}\")\nsafe tx hash {}",
        message,
        hex_string(safe_tx_hash.as_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::fakes::{
            owner_address, safe_address, FakeSafe, FakeSigner, FakeTransactionService,
        },
        RelayError,
    };
    use safe_msg_encoding::{sign_message_calldata, Operation, SIGN_MSG_LIB};
    use web3::types::U256;

    #[tokio::test]
    async fn proposal_carries_hash_signature_and_transaction() {
        let safe = FakeSafe::new();
        let signer = FakeSigner::new();
        let tx_service = FakeTransactionService::accepting();

        let submitted = submit_sign_message_proposal(&safe, &signer, &tx_service, "hello", 100)
            .await
            .unwrap();

        assert_eq!(submitted.safe_tx_hash, safe.safe_tx_hash);
        assert_eq!(submitted.sender, owner_address());
        assert_eq!(*signer.signed.lock().unwrap(), vec![safe.safe_tx_hash]);

        let proposals = tx_service.proposals();
        assert_eq!(proposals.len(), 1);
        let proposal = &proposals[0];
        assert_eq!(proposal.safe, safe_address());
        assert_eq!(proposal.safe_tx_hash, safe.safe_tx_hash);
        assert_eq!(proposal.sender, owner_address());
        assert_eq!(proposal.signature.bytes, signer.signature);
        assert_eq!(
            proposal.transaction,
            SafeTransactionData::sign_message("hello", safe.nonce)
        );

        // The hashed transaction is the proposed one.
        assert_eq!(
            *safe.hashed_transactions.lock().unwrap(),
            vec![proposal.transaction.clone()]
        );
        assert_eq!(
            safe.calls(),
            vec!["chain_id", "nonce", "get_transaction_hash"]
        );
    }

    #[tokio::test]
    async fn transaction_shape_does_not_depend_on_the_message() {
        for message in ["", "hello", "0xdeadbeef", "héllo ✓", &"long ".repeat(100)] {
            let tx_service = FakeTransactionService::accepting();
            submit_sign_message_proposal(
                &FakeSafe::new(),
                &FakeSigner::new(),
                &tx_service,
                message,
                100,
            )
            .await
            .unwrap();

            let tx = tx_service.proposals().remove(0).transaction;
            assert_eq!(tx.to, Address::from(SIGN_MSG_LIB));
            assert_eq!(tx.operation, Operation::DelegateCall);
            assert_eq!(tx.value, U256::zero());
            assert_eq!(tx.data.0, sign_message_calldata(message.as_bytes()));
        }
    }

    #[tokio::test]
    async fn relay_rejection_propagates_without_retry() {
        let body = r#"{"safe":["Checksum address validation failed"]}"#;
        let tx_service = FakeTransactionService::rejecting(422, body);

        let err = submit_sign_message_proposal(
            &FakeSafe::new(),
            &FakeSigner::new(),
            &tx_service,
            "hello",
            100,
        )
        .await
        .unwrap_err();

        match err {
            Error::Relay(RelayError::Rejected { status, body: reason }) => {
                assert_eq!(status, 422);
                assert_eq!(reason, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(tx_service.proposals().len(), 1);
    }

    #[tokio::test]
    async fn identical_invocations_are_not_deduplicated() {
        let safe = FakeSafe::new();
        let signer = FakeSigner::new();
        let tx_service = FakeTransactionService::accepting();

        for _ in 0..2 {
            submit_sign_message_proposal(&safe, &signer, &tx_service, "hello", 100)
                .await
                .unwrap();
        }

        let proposals = tx_service.proposals();
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0], proposals[1]);
    }

    #[tokio::test]
    async fn chain_mismatch_stops_before_signing_or_proposing() {
        let safe = FakeSafe {
            chain_id: 1,
            ..FakeSafe::new()
        };
        let signer = FakeSigner::new();
        let tx_service = FakeTransactionService::accepting();

        let err = submit_sign_message_proposal(&safe, &signer, &tx_service, "hello", 100)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::ChainMismatch {
                node: 1,
                configured: 100
            }
        ));
        assert_eq!(safe.calls(), vec!["chain_id"]);
        assert!(signer.signed.lock().unwrap().is_empty());
        assert!(tx_service.proposals().is_empty());
    }

    #[tokio::test]
    async fn node_failure_stops_before_proposing() {
        let safe = FakeSafe {
            unreachable: true,
            ..FakeSafe::new()
        };
        let tx_service = FakeTransactionService::accepting();

        let err =
            submit_sign_message_proposal(&safe, &FakeSigner::new(), &tx_service, "hello", 100)
                .await
                .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
        assert!(tx_service.proposals().is_empty());
    }

    #[tokio::test]
    async fn real_signer_signature_reaches_the_relay() {
        let key = crate::PrivateKey::new(
            "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318".to_owned(),
        );
        let signer = OwnerSigner::from_private_key(&key).unwrap();
        let safe = FakeSafe::new();
        let tx_service = FakeTransactionService::accepting();

        let submitted = submit_sign_message_proposal(&safe, &signer, &tx_service, "hello", 100)
            .await
            .unwrap();

        assert_eq!(submitted.sender, owner_address());
        assert_eq!(submitted.signature, signer.sign_hash(safe.safe_tx_hash).unwrap());
        assert_eq!(tx_service.proposals()[0].signature, submitted.signature);
    }

    #[test]
    fn report_lines() {
        assert_eq!(
            proposal_report("hello", H256::repeat_byte(0x48)),
            format!(
                "proposed: Safe ---delegatecall---> SignMessageLib.signMessage(\"hello\")\n\
                 safe tx hash 0x{}",
                "48".repeat(32)
            )
        );
    }
}
