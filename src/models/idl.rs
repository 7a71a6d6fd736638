//! Program interface definitions.
//!
//! An [`Idl`] declares, per program, the set of supported instructions and
//! for each instruction the ordered, named, attributed account slots and the
//! Borsh field layout of its arguments. Definitions are immutable once
//! constructed; the selector index is computed exactly once at construction
//! time so decoding is a direct lookup rather than a linear scan.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::utils::snake_case;

/// Anchor's namespace for regular program instructions.
pub const INSTRUCTION_NAMESPACE: &str = "global";

/// Length in bytes of the operation selector prefixing every payload.
pub const SELECTOR_LEN: usize = 8;

/// A named, attributed account slot within an instruction definition.
///
/// Slot order is the IDL's contract with every caller: the i-th address
/// supplied at call time occupies the i-th slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdlAccount {
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
}

/// A named argument field with its Borsh type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// The Borsh-expressible argument types the decoder supports.
///
/// Scalars plus one level of `option`/`vec` wrapping; no struct or enum
/// sub-arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdlType {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    String,
    #[serde(rename = "publicKey")]
    Pubkey,
    Bytes,
    Option(Box<IdlType>),
    Vec(Box<IdlType>),
}

/// One instruction definition: name, account slots and argument layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdlInstruction {
    pub name: String,
    pub accounts: Vec<IdlAccount>,
    pub args: Vec<IdlField>,
}

/// A program's interface definition with its precomputed selector index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Idl {
    pub name: String,
    instructions: Vec<IdlInstruction>,
    /// Selector -> index into `instructions`. On a selector collision the
    /// first instruction in declared order wins; later entries never
    /// overwrite, so resolution is deterministic.
    #[serde(skip)]
    selectors: HashMap<[u8; SELECTOR_LEN], usize>,
}

impl Idl {
    pub fn new(name: impl Into<String>, instructions: Vec<IdlInstruction>) -> Self {
        let mut selectors = HashMap::with_capacity(instructions.len());
        for (index, instruction) in instructions.iter().enumerate() {
            let selector = sighash(INSTRUCTION_NAMESPACE, &instruction.name);
            selectors.entry(selector).or_insert(index);
        }
        Self {
            name: name.into(),
            instructions,
            selectors,
        }
    }

    /// Looks up the instruction definition whose selector matches the given
    /// 8-byte payload prefix.
    pub fn instruction_for_selector(
        &self,
        selector: &[u8; SELECTOR_LEN],
    ) -> Option<&IdlInstruction> {
        self.selectors
            .get(selector)
            .map(|&index| &self.instructions[index])
    }

    pub fn instructions(&self) -> &[IdlInstruction] {
        &self.instructions
    }
}

impl<'de> Deserialize<'de> for Idl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawIdl {
            name: String,
            instructions: Vec<IdlInstruction>,
        }
        let raw = RawIdl::deserialize(deserializer)?;
        Ok(Idl::new(raw.name, raw.instructions))
    }
}

/// Computes the 8-byte operation selector for an instruction name.
///
/// SHA-256 of `"<namespace>:<snake_case(name)>"`, truncated to 8 bytes.
/// Not a true sighash: arguments are excluded, since Rust programs have no
/// function overloading and the name alone identifies the operation.
pub fn sighash(namespace: &str, name: &str) -> [u8; SELECTOR_LEN] {
    let preimage = format!("{}:{}", namespace, snake_case(name));
    let digest = Sha256::digest(preimage.as_bytes());
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&digest[..SELECTOR_LEN]);
    selector
}
