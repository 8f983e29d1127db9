//! Proposes `Safe ---delegatecall---> SignMessageLib.signMessage(MSG)` to the Safe Transaction
//! Service, signed by the owner holding `PRIVATE_KEY`.
//!
//! ```sh
//! SAFE=0x... PRIVATE_KEY=0x... MSG="hello" propose-sign-msg
//! ```

use safe_msg_signer::{commands, diagnostics::init_logging, Config, Flow};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse(Flow::ProposeSignMessage)?;
    init_logging(config.log_level);
    info!(log_level = %config.log_level, chain_id = config.chain_id, "Proposing a signMessage transaction.");

    commands::propose_sign_message(config).await?;
    Ok(())
}
