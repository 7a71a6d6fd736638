//! Transaction walker.
//!
//! Walks a transaction's instructions in their original order, dispatching
//! each to either the schema-driven decoder (opaque payloads) or the
//! built-in pre-parsed builders, and collects the descriptions. The walk is
//! fail-fast: the first unresolvable instruction aborts the whole
//! transaction with no partial result.

mod builtin;

use log::{debug, trace};

use crate::{
    decoder::decode_instruction,
    errors::DecoderError,
    models::{InstructionDescription, ParsedTransactionRecord, RawInstruction},
    registry::ProgramRegistry,
};

/// Decodes every instruction of a confirmed transaction, preserving
/// instruction order in the output.
///
/// Decodes are pure and independent of sibling instructions, so this loop
/// could run them in parallel; sequential execution keeps the ordering
/// trivially deterministic and is fast enough for transaction-sized inputs.
pub fn parse_transaction(
    record: &ParsedTransactionRecord,
    registry: &ProgramRegistry,
) -> Result<Vec<InstructionDescription>, DecoderError> {
    let mut descriptions = Vec::with_capacity(record.instructions.len());

    for (index, instruction) in record.instructions.iter().enumerate() {
        let description = match instruction {
            RawInstruction::Parsed(parsed) => builtin::build(parsed)?,
            RawInstruction::Opaque(opaque) => {
                let idl = registry
                    .find(&opaque.program_id)
                    .ok_or(DecoderError::UnknownProgram(opaque.program_id))?;
                decode_instruction(idl, &opaque.accounts, &opaque.data)?
            }
        };
        trace!("instruction {} decoded as '{}'", index, description.name);
        descriptions.push(description);
    }

    debug!(
        "decoded {} instructions of transaction {}",
        descriptions.len(),
        record.signature
    );
    Ok(descriptions)
}
