use crate::models::PrivateKey;
use clap::Parser;
use safe_msg_encoding::parse_address;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use url::Url;
use web3::types::Address;

pub const SAFE: &str = "SAFE";
pub const MSG: &str = "MSG";
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const RPC: &str = "RPC";
pub const TX_SERVICE_URL: &str = "TX_SERVICE_URL";
pub const CHAIN_ID: &str = "CHAIN_ID";
pub const LOG_LEVEL: &str = "LOG_LEVEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("must set env var {0}")]
    Missing(&'static str),
    #[error("Invalid SAFE address: {0}")]
    InvalidAddress(#[from] safe_msg_encoding::Error),
    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
    #[error("There is no default for {var} on chain {chain_id}; please set it explicitly")]
    UnsupportedChain { var: &'static str, chain_id: u64 },
}

/// Which of the two commands is being configured. Only the proposal flow needs a signing key and
/// a transaction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    MessageHash,
    ProposeSignMessage,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: LevelFilter,
    pub safe_address: Address,
    pub message: String,
    pub chain_id: u64,
    pub jrpc_url: Url,
    owner_private_key: Option<PrivateKey>,
    tx_service_url: Option<Url>,
}

impl Config {
    /// Loads all configuration options from environment variables (or their equivalent CLI
    /// flags) and validates them for `flow`. Nothing here touches the network.
    pub fn parse(flow: Flow) -> Result<Self, ConfigError> {
        Self::from_clap(Clap::parse(), flow)
    }

    /// Parses `args` as if none of the configuration variables were exported. Callers must hold
    /// [`tests::ENV_LOCK`].
    #[cfg(test)]
    fn parse_from_clean_env(flow: Flow, args: &[&str]) -> Result<Self, ConfigError> {
        for var in [SAFE, MSG, PRIVATE_KEY, RPC, CHAIN_ID, TX_SERVICE_URL, LOG_LEVEL] {
            std::env::remove_var(var);
        }
        Self::from_clap(Clap::try_parse_from(args).unwrap(), flow)
    }

    #[cfg(test)]
    fn parse_from(flow: Flow, args: &[&str]) -> Result<Self, ConfigError> {
        let _guard = tests::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        Self::parse_from_clean_env(flow, args)
    }

    fn from_clap(clap: Clap, flow: Flow) -> Result<Self, ConfigError> {
        let safe = required(clap.safe, SAFE)?;
        let message = required(clap.msg, MSG)?;
        let owner_private_key = non_empty(clap.private_key).map(PrivateKey::new);
        if flow == Flow::ProposeSignMessage && owner_private_key.is_none() {
            return Err(ConfigError::Missing(PRIVATE_KEY));
        }

        let safe_address = Address::from(parse_address(&safe)?);
        // Hashing never checks the chain, so any chain falls back to the public gateway.
        let default_jrpc_url = match flow {
            Flow::MessageHash => chain_defaults::jrpc_url(clap.chain_id)
                .or(chain_defaults::jrpc_url(chain_defaults::GNOSIS)),
            Flow::ProposeSignMessage => chain_defaults::jrpc_url(clap.chain_id),
        };
        let jrpc_url = endpoint(non_empty(clap.rpc), default_jrpc_url, RPC, clap.chain_id)?;
        let tx_service_url = match flow {
            Flow::MessageHash => None,
            Flow::ProposeSignMessage => Some(endpoint(
                non_empty(clap.tx_service_url),
                chain_defaults::tx_service_url(clap.chain_id),
                TX_SERVICE_URL,
                clap.chain_id,
            )?),
        };

        Ok(Self {
            log_level: clap.log_level,
            safe_address,
            message,
            chain_id: clap.chain_id,
            jrpc_url,
            owner_private_key,
            tx_service_url,
        })
    }

    pub fn owner_private_key(&self) -> Result<&PrivateKey, ConfigError> {
        self.owner_private_key
            .as_ref()
            .ok_or(ConfigError::Missing(PRIVATE_KEY))
    }

    pub fn tx_service_url(&self) -> Result<&Url, ConfigError> {
        self.tx_service_url
            .as_ref()
            .ok_or(ConfigError::UnsupportedChain {
                var: TX_SERVICE_URL,
                chain_id: self.chain_id,
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn required(value: Option<String>, var: &'static str) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::Missing(var))
}

fn endpoint(
    explicit: Option<String>,
    default: Option<&'static str>,
    var: &'static str,
    chain_id: u64,
) -> Result<Url, ConfigError> {
    let raw = match (explicit.as_deref(), default) {
        (Some(url), _) => url,
        (None, Some(url)) => url,
        (None, None) => return Err(ConfigError::UnsupportedChain { var, chain_id }),
    };
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
struct Clap {
    /// Address of the Safe.
    #[clap(long, env = "SAFE")]
    safe: Option<String>,
    /// The UTF-8 message to hash or sign.
    #[clap(long, env = "MSG")]
    msg: Option<String>,
    /// Hex-encoded private key of one of the Safe owners. Only needed to propose transactions.
    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// The JSON-RPC endpoint of a node for `chain-id`. Defaults to a public gateway.
    #[clap(long, env = "RPC")]
    rpc: Option<String>,
    /// Numeric ID of the chain the Safe lives on.
    #[clap(long, env = "CHAIN_ID", default_value = "100")]
    chain_id: u64,
    /// Base URL of the Safe Transaction Service for `chain-id`.
    #[clap(long, env = "TX_SERVICE_URL")]
    tx_service_url: Option<String>,
    /// Only show log messages at or above this level. `INFO` by default.
    #[clap(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

/// Public endpoints for the chains the original tooling was used on.
mod chain_defaults {
    pub const GNOSIS: u64 = 100;
    pub const SEPOLIA: u64 = 11_155_111;

    pub fn jrpc_url(chain_id: u64) -> Option<&'static str> {
        match chain_id {
            GNOSIS => Some("https://rpc.gnosis.gateway.fm"),
            SEPOLIA => Some("https://1rpc.io/sepolia"),
            _ => None,
        }
    }

    pub fn tx_service_url(chain_id: u64) -> Option<&'static str> {
        match chain_id {
            GNOSIS => Some("https://safe-transaction-gnosis-chain.safe.global"),
            SEPOLIA => Some("https://safe-transaction-sepolia.safe.global"),
            _ => None,
        }
    }
}
