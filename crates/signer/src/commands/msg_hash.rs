use crate::{checksum, hex_string, Config, Error, SafeApi};
use tracing::info;
use web3::types::H256;

/// Asks the Safe for the hash of `message`, as `getMessageHash(bytes)` computes it.
///
/// Exactly one read-only call is made and its result is returned untouched.
pub async fn compute_hash<S>(safe: &S, message: &str) -> Result<H256, Error>
where
    S: SafeApi + ?Sized,
{
    let message_hash = safe.get_message_hash(message.as_bytes()).await?;
    info!(
        safe = checksum(safe.address()).as_str(),
        message_hash = hex_string(message_hash.as_bytes()).as_str(),
        "Got the message hash from the Safe"
    );
    Ok(message_hash)
}

pub async fn print_message_hash(config: Config) -> Result<(), Error> {
    let safe = super::init_safe(&config)?;
    let message_hash = compute_hash(&safe, &config.message).await?;
    println!("{}", message_hash_line(message_hash));
    Ok(())
}

fn message_hash_line(message_hash: H256) -> String {
    format!("msgHash {}", hex_string(message_hash.as_bytes()))
}
