//! Built-in builders for pre-parsed system instructions.
//!
//! The RPC service pre-decodes well-known system-level instructions into a
//! tagged key-value payload; each supported type maps here to a builder
//! that produces the common output shape. The registry is intentionally
//! partial: adding a type means adding one entry, the walker's control
//! flow never changes.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use solana_sdk::pubkey::Pubkey;

use crate::{
    errors::DecoderError,
    models::{AccountDescription, InstructionDescription, PreParsedInstruction},
};

type Builder = fn(&PreParsedInstruction) -> Result<InstructionDescription, DecoderError>;

static BUILDERS: Lazy<HashMap<&'static str, Builder>> = Lazy::new(|| {
    let mut builders: HashMap<&'static str, Builder> = HashMap::new();
    builders.insert("createAccount", build_create_account);
    builders
});

/// Maps a pre-parsed instruction through the builder registry.
pub(super) fn build(
    instruction: &PreParsedInstruction,
) -> Result<InstructionDescription, DecoderError> {
    let builder = BUILDERS
        .get(instruction.instruction_type.as_str())
        .ok_or_else(|| {
            DecoderError::UnknownParsedOperation(instruction.instruction_type.clone())
        })?;
    builder(instruction)
}

/// System program `createAccount`: account roles are fixed by the program's
/// ABI, so they are hard-coded rather than looked up in any IDL. The
/// `lamports` and `space` arguments are carried over verbatim.
fn build_create_account(
    instruction: &PreParsedInstruction,
) -> Result<InstructionDescription, DecoderError> {
    let info = &instruction.info;
    let accounts = vec![
        AccountDescription {
            pubkey: info_pubkey(info, "newAccount")?,
            name: "newAccount".to_string(),
            is_mut: true,
            is_signer: true,
        },
        AccountDescription {
            pubkey: info_pubkey(info, "owner")?,
            name: "owner".to_string(),
            is_mut: false,
            is_signer: false,
        },
        AccountDescription {
            pubkey: info_pubkey(info, "source")?,
            name: "source".to_string(),
            is_mut: true,
            is_signer: true,
        },
    ];

    let mut data = Map::new();
    data.insert("lamports".to_string(), info_field(info, "lamports")?.clone());
    data.insert("space".to_string(), info_field(info, "space")?.clone());

    Ok(InstructionDescription {
        name: "createAccount".to_string(),
        accounts,
        data,
    })
}

fn info_field<'v>(info: &'v Value, key: &str) -> Result<&'v Value, DecoderError> {
    info.get(key).ok_or_else(|| {
        DecoderError::DecodeFailure(format!("pre-parsed payload missing field '{}'", key))
    })
}

fn info_pubkey(info: &Value, key: &str) -> Result<Pubkey, DecoderError> {
    let raw = info_field(info, key)?.as_str().ok_or_else(|| {
        DecoderError::DecodeFailure(format!("pre-parsed field '{}' is not a string", key))
    })?;
    Pubkey::from_str(raw).map_err(|e| {
        DecoderError::DecodeFailure(format!("pre-parsed field '{}' is not a pubkey: {}", key, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_account_instruction(info: Value) -> PreParsedInstruction {
        PreParsedInstruction {
            program: "system".to_string(),
            instruction_type: "createAccount".to_string(),
            info,
        }
    }

    #[test]
    fn test_create_account_maps_fixed_roles_and_verbatim_args() {
        let new_account = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let source = Pubkey::new_unique();
        let instruction = create_account_instruction(json!({
            "newAccount": new_account.to_string(),
            "owner": owner.to_string(),
            "source": source.to_string(),
            "lamports": 1000,
            "space": 32,
        }));

        let description = build(&instruction).unwrap();

        assert_eq!(description.name, "createAccount");
        assert_eq!(
            description.accounts,
            vec![
                AccountDescription {
                    pubkey: new_account,
                    name: "newAccount".to_string(),
                    is_mut: true,
                    is_signer: true,
                },
                AccountDescription {
                    pubkey: owner,
                    name: "owner".to_string(),
                    is_mut: false,
                    is_signer: false,
                },
                AccountDescription {
                    pubkey: source,
                    name: "source".to_string(),
                    is_mut: true,
                    is_signer: true,
                },
            ]
        );
        assert_eq!(description.data["lamports"], json!(1000));
        assert_eq!(description.data["space"], json!(32));
    }

    #[test]
    fn test_unknown_type_is_unknown_parsed_operation() {
        let instruction = PreParsedInstruction {
            program: "system".to_string(),
            instruction_type: "assign".to_string(),
            info: json!({}),
        };

        let result = build(&instruction);
        assert_eq!(
            result,
            Err(DecoderError::UnknownParsedOperation("assign".to_string()))
        );
    }

    #[test]
    fn test_missing_info_field_is_decode_failure() {
        let instruction = create_account_instruction(json!({
            "newAccount": Pubkey::new_unique().to_string(),
            "owner": Pubkey::new_unique().to_string(),
            // no "source"
            "lamports": 1000,
            "space": 32,
        }));

        let result = build(&instruction);
        assert!(matches!(result, Err(DecoderError::DecodeFailure(_))));
    }
}
