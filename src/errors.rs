use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors produced while decoding a transaction's instructions.
///
/// Every variant aborts the whole transaction walk on first occurrence;
/// a partially decoded transaction has no defined meaning, so there is no
/// per-instruction recovery and nothing is retried.
#[derive(Error, Debug, PartialEq)]
pub enum DecoderError {
    /// The instruction's target program matches none of the registered IDLs.
    #[error("unknown program: {0}")]
    UnknownProgram(Pubkey),

    /// The payload matched no operation selector, or the matched operation's
    /// argument layout failed to deserialize the remaining bytes.
    #[error("failed to decode instruction: {0}")]
    DecodeFailure(String),

    /// A pre-parsed instruction carries a type with no built-in mapping.
    #[error("unknown parsed instruction: {0}")]
    UnknownParsedOperation(String),

    /// The base58 transit encoding of an instruction payload is invalid.
    #[error("malformed instruction data encoding: {0}")]
    MalformedEncoding(String),
}
