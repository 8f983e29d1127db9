//! Chain-independent encoding helpers for proposing Safe `signMessage` transactions.
//!
//! Nothing in this crate performs I/O: it only knows how to hash, how to render addresses and how
//! to build the ABI call data that the Safe and its `SignMessageLib` expect.

mod address;
mod calldata;
mod keccak;

pub use address::{parse_address, to_checksum};
pub use calldata::{sign_message_calldata, SIGN_MESSAGE};
pub use keccak::keccak256;

pub type Bytes32 = [u8; 32];
pub type Address = [u8; 20];

/// The `SignMessageLib` deployment targeted by every proposal
/// (`0xd53cd0aB83D845Ac265BE939c57F53AD838012c9`).
pub const SIGN_MSG_LIB: Address = [
    0xd5, 0x3c, 0xd0, 0xab, 0x83, 0xd8, 0x45, 0xac, 0x26, 0x5b, 0xe9, 0x39, 0xc5, 0x7f, 0x53, 0xad,
    0x83, 0x80, 0x12, 0xc9,
];

/// Something that went wrong while decoding user-supplied values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Address {0} has an invalid EIP-55 checksum")]
    BadChecksum(String),
}

/// How the Safe executes a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operation {
    Call = 0,
    /// The callee's code runs in the Safe's own storage context.
    DelegateCall = 1,
}

impl Operation {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
