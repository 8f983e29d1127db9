use ethabi::{encode, short_signature, ParamType, Token};

/// `SignMessageLib.signMessage(bytes)`.
pub const SIGN_MESSAGE: &str = "signMessage";

/// Call data for `signMessage(bytes)` with `message` as its only argument.
pub fn sign_message_calldata(message: &[u8]) -> Vec<u8> {
    let signature = short_signature(SIGN_MESSAGE, &[ParamType::Bytes]);
    let payload = Token::Bytes(message.to_vec());
    let encoded = encode(&[payload]);
    signature.into_iter().chain(encoded).collect()
}
