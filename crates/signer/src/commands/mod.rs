pub mod msg_hash;
pub mod propose_sign_msg;

pub use msg_hash::{compute_hash, print_message_hash};
pub use propose_sign_msg::{propose_sign_message, submit_sign_message_proposal, SubmittedProposal};

use crate::{contracts::SafeContract, Config, Error};
use tracing::debug;
use web3::{transports::Http, Web3};

pub(crate) fn init_safe(config: &Config) -> Result<SafeContract<Http>, Error> {
    debug!(jrpc_url = %config.jrpc_url, chain_id = config.chain_id, "Connecting to the node");
    let transport = Http::new(config.jrpc_url.as_str())?;
    SafeContract::new(Web3::new(transport), config.safe_address)
}
