//! # Solana Transaction Decoder
//!
//! Decodes the instructions of a confirmed Solana transaction into
//! human-readable descriptions. For each instruction the owning program is
//! resolved against a caller-supplied set of IDLs, the Anchor/Borsh payload
//! is decoded into a named operation with typed arguments, and every
//! referenced account is annotated with the name, mutability and signer
//! attributes its IDL declares for that position.
//!
//! The crate is organized as:
//! - `models`: IDL definitions, raw instruction records and the output
//!   description types.
//! - `registry`: exact-match lookup from program id to IDL.
//! - `decoder`: selector matching, Borsh argument deserialization and the
//!   positional account zip.
//! - `parser`: the transaction walker, including built-in handling of
//!   pre-parsed system instructions.
//! - `services`: the ledger-query boundary (RPC fetch with confirmation).

pub mod decoder;
pub mod errors;
pub mod logging;
pub mod models;
pub mod parser;
pub mod registry;
pub mod services;
pub mod utils;

pub use decoder::decode_instruction;
pub use errors::DecoderError;
pub use models::*;
pub use parser::parse_transaction;
pub use registry::ProgramRegistry;
pub use services::{ProviderError, TransactionFetcher, TransactionFetcherTrait};
