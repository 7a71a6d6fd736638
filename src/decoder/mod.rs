//! Schema-driven instruction decoding.
//!
//! Matches a raw payload's 8-byte selector against the program's IDL,
//! deserializes the remaining bytes into the matched instruction's declared
//! argument fields, and zips the supplied account addresses against the
//! instruction's account slots by position.

mod args;

use log::debug;

use crate::{
    errors::DecoderError,
    models::{AccountDescription, Idl, InstructionDescription, SELECTOR_LEN},
};
use solana_sdk::pubkey::Pubkey;

/// Decodes one opaque instruction against its program's IDL.
///
/// Pure function of `(idl, accounts, data)`; owns no state and performs no
/// I/O. `data` is the payload in its base58 transit encoding.
///
/// The i-th supplied address is assigned the i-th declared slot's name and
/// role attributes; a length mismatch between the two lists is a
/// [`DecoderError::DecodeFailure`], never a silent truncation.
pub fn decode_instruction(
    idl: &Idl,
    accounts: &[Pubkey],
    data: &str,
) -> Result<InstructionDescription, DecoderError> {
    let payload = bs58::decode(data)
        .into_vec()
        .map_err(|e| DecoderError::MalformedEncoding(e.to_string()))?;

    if payload.len() < SELECTOR_LEN {
        return Err(DecoderError::DecodeFailure(format!(
            "payload too short for a selector: {} bytes",
            payload.len()
        )));
    }
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&payload[..SELECTOR_LEN]);

    let instruction = idl.instruction_for_selector(&selector).ok_or_else(|| {
        DecoderError::DecodeFailure(format!(
            "no instruction in '{}' matches selector {}",
            idl.name,
            hex::encode(selector)
        ))
    })?;

    let data = args::deserialize_args(&instruction.args, &payload[SELECTOR_LEN..])?;

    if accounts.len() != instruction.accounts.len() {
        return Err(DecoderError::DecodeFailure(format!(
            "instruction '{}' declares {} accounts but {} were supplied",
            instruction.name,
            instruction.accounts.len(),
            accounts.len()
        )));
    }
    let accounts = accounts
        .iter()
        .zip(&instruction.accounts)
        .map(|(pubkey, slot)| AccountDescription {
            pubkey: *pubkey,
            name: slot.name.clone(),
            is_mut: slot.is_mut,
            is_signer: slot.is_signer,
        })
        .collect();

    debug!("decoded '{}' instruction of '{}'", instruction.name, idl.name);
    Ok(InstructionDescription {
        name: instruction.name.clone(),
        accounts,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sighash, IdlAccount, IdlField, IdlInstruction, IdlType, INSTRUCTION_NAMESPACE};
    use serde_json::Value;

    fn transfer_idl() -> Idl {
        Idl::new(
            "vault",
            vec![IdlInstruction {
                name: "transfer".to_string(),
                accounts: vec![
                    IdlAccount {
                        name: "from".to_string(),
                        is_mut: true,
                        is_signer: true,
                    },
                    IdlAccount {
                        name: "to".to_string(),
                        is_mut: true,
                        is_signer: false,
                    },
                ],
                args: vec![IdlField {
                    name: "amount".to_string(),
                    ty: IdlType::U64,
                }],
            }],
        )
    }

    fn encode_transfer(amount: u64) -> String {
        let mut payload = sighash(INSTRUCTION_NAMESPACE, "transfer").to_vec();
        payload.extend(amount.to_le_bytes());
        bs58::encode(payload).into_string()
    }

    #[test]
    fn test_decode_round_trips_name_and_arguments() {
        let idl = transfer_idl();
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();

        let description =
            decode_instruction(&idl, &[from, to], &encode_transfer(1_000)).unwrap();

        assert_eq!(description.name, "transfer");
        assert_eq!(description.data["amount"], Value::from(1_000u64));
        assert_eq!(
            description.accounts,
            vec![
                AccountDescription {
                    pubkey: from,
                    name: "from".to_string(),
                    is_mut: true,
                    is_signer: true,
                },
                AccountDescription {
                    pubkey: to,
                    name: "to".to_string(),
                    is_mut: true,
                    is_signer: false,
                },
            ]
        );
    }

    #[test]
    fn test_accounts_zip_preserves_caller_order() {
        let idl = transfer_idl();
        let accounts = [Pubkey::new_unique(), Pubkey::new_unique()];

        let description =
            decode_instruction(&idl, &accounts, &encode_transfer(5)).unwrap();

        assert_eq!(description.accounts.len(), accounts.len());
        for (described, supplied) in description.accounts.iter().zip(&accounts) {
            assert_eq!(described.pubkey, *supplied);
        }
    }

    #[test]
    fn test_unmatched_selector_is_decode_failure() {
        let idl = transfer_idl();
        let mut payload = sighash(INSTRUCTION_NAMESPACE, "burn").to_vec();
        payload.extend(1u64.to_le_bytes());
        let data = bs58::encode(payload).into_string();

        let result = decode_instruction(&idl, &[Pubkey::new_unique(), Pubkey::new_unique()], &data);
        assert!(matches!(result, Err(DecoderError::DecodeFailure(_))));
    }

    #[test]
    fn test_account_count_mismatch_is_decode_failure() {
        let idl = transfer_idl();

        let result = decode_instruction(&idl, &[Pubkey::new_unique()], &encode_transfer(1));
        assert!(matches!(result, Err(DecoderError::DecodeFailure(_))));
    }

    #[test]
    fn test_invalid_base58_is_malformed_encoding() {
        let idl = transfer_idl();

        let result = decode_instruction(&idl, &[], "not-base58-0OIl");
        assert!(matches!(result, Err(DecoderError::MalformedEncoding(_))));
    }

    #[test]
    fn test_short_payload_is_decode_failure() {
        let idl = transfer_idl();
        let data = bs58::encode([1u8, 2, 3]).into_string();

        let result = decode_instruction(&idl, &[], &data);
        assert!(matches!(result, Err(DecoderError::DecodeFailure(_))));
    }

    #[test]
    fn test_argument_underflow_is_decode_failure() {
        let idl = transfer_idl();
        let mut payload = sighash(INSTRUCTION_NAMESPACE, "transfer").to_vec();
        payload.extend([1u8, 2]); // u64 argument needs 8 bytes
        let data = bs58::encode(payload).into_string();

        let result = decode_instruction(&idl, &[Pubkey::new_unique(), Pubkey::new_unique()], &data);
        assert!(matches!(result, Err(DecoderError::DecodeFailure(_))));
    }
}
