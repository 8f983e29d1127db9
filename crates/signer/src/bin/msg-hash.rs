//! Prints the Safe's `getMessageHash` for `MSG`.
//!
//! ```sh
//! SAFE=0x... MSG="hello" msg-hash
//! ```

use safe_msg_signer::{commands, diagnostics::init_logging, Config, Flow};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse(Flow::MessageHash)?;
    init_logging(config.log_level);
    info!(log_level = %config.log_level, chain_id = config.chain_id, "Computing the message hash.");

    commands::print_message_hash(config).await?;
    Ok(())
}
