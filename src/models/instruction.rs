//! Transaction and instruction records, and the decoded output shapes.
//!
//! [`RawInstruction`] is an explicit sum type decided once when the record
//! is received from the ledger-query boundary: an instruction is either an
//! opaque payload requiring schema-driven decoding, or a pre-parsed
//! operation produced upstream for well-known system instructions.

use serde::Serialize;
use serde_json::{Map, Value};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// One account reference in a decoded instruction: the concrete address
/// plus the name and role attributes its IDL slot declares.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccountDescription {
    pub pubkey: Pubkey,
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
}

/// A fully decoded instruction: operation name, attributed accounts in
/// call-site order, and the decoded argument map. Immutable once built.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstructionDescription {
    pub name: String,
    pub accounts: Vec<AccountDescription>,
    pub data: Map<String, Value>,
}

/// An instruction whose payload is an undecoded byte blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueInstruction {
    pub program_id: Pubkey,
    pub accounts: Vec<Pubkey>,
    /// Payload in its base58 transit encoding.
    pub data: String,
}

/// An instruction already decoded upstream into a tagged operation with a
/// key-value argument payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreParsedInstruction {
    /// Upstream label for the owning program (e.g. "system").
    pub program: String,
    pub instruction_type: String,
    pub info: Value,
}

/// One raw instruction as delivered by the ledger-query service.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInstruction {
    Opaque(OpaqueInstruction),
    Parsed(PreParsedInstruction),
}

/// A confirmed transaction's instructions in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransactionRecord {
    pub signature: Signature,
    pub instructions: Vec<RawInstruction>,
}
