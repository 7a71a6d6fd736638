//! Borsh-layout deserialization of instruction arguments against an IDL
//! field list.
//!
//! Little-endian fixed-width integers, u32-length-prefixed strings, bytes
//! and vectors, single-byte option tags. The whole argument region must be
//! consumed exactly; truncation and trailing bytes are both decode failures.

use serde_json::{Map, Value};
use solana_sdk::pubkey::Pubkey;

use crate::{
    errors::DecoderError,
    models::{IdlField, IdlType},
};

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], DecoderError> {
        if self.pos + len > self.bytes.len() {
            return Err(DecoderError::DecodeFailure(format!(
                "argument data truncated: needed {} bytes at offset {}",
                len, self.pos
            )));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecoderError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn take_len_prefix(&mut self) -> Result<usize, DecoderError> {
        Ok(u32::from_le_bytes(self.take_array()?) as usize)
    }
}

/// Deserializes the post-selector payload bytes into an argument map keyed
/// by field name, in the field order the IDL declares.
pub(super) fn deserialize_args(
    fields: &[IdlField],
    bytes: &[u8],
) -> Result<Map<String, Value>, DecoderError> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let mut args = Map::new();
    for field in fields {
        let value = read_value(&mut cursor, &field.ty)?;
        args.insert(field.name.clone(), value);
    }
    if cursor.pos != bytes.len() {
        return Err(DecoderError::DecodeFailure(format!(
            "{} trailing bytes after last declared argument",
            bytes.len() - cursor.pos
        )));
    }
    Ok(args)
}

fn read_value(cursor: &mut Cursor, ty: &IdlType) -> Result<Value, DecoderError> {
    let value = match ty {
        IdlType::Bool => match cursor.take(1)?[0] {
            0 => Value::from(false),
            1 => Value::from(true),
            other => {
                return Err(DecoderError::DecodeFailure(format!(
                    "invalid bool tag: {}",
                    other
                )))
            }
        },
        IdlType::U8 => Value::from(cursor.take(1)?[0]),
        IdlType::I8 => Value::from(cursor.take(1)?[0] as i8),
        IdlType::U16 => Value::from(u16::from_le_bytes(cursor.take_array()?)),
        IdlType::I16 => Value::from(i16::from_le_bytes(cursor.take_array()?)),
        IdlType::U32 => Value::from(u32::from_le_bytes(cursor.take_array()?)),
        IdlType::I32 => Value::from(i32::from_le_bytes(cursor.take_array()?)),
        IdlType::U64 => Value::from(u64::from_le_bytes(cursor.take_array()?)),
        IdlType::I64 => Value::from(i64::from_le_bytes(cursor.take_array()?)),
        // 128-bit values exceed JSON's number range; rendered as strings.
        IdlType::U128 => Value::from(u128::from_le_bytes(cursor.take_array()?).to_string()),
        IdlType::I128 => Value::from(i128::from_le_bytes(cursor.take_array()?).to_string()),
        IdlType::String => {
            let len = cursor.take_len_prefix()?;
            let raw = cursor.take(len)?.to_vec();
            Value::from(String::from_utf8(raw).map_err(|e| {
                DecoderError::DecodeFailure(format!("string argument is not valid utf-8: {}", e))
            })?)
        }
        IdlType::Pubkey => {
            Value::from(Pubkey::new_from_array(cursor.take_array()?).to_string())
        }
        IdlType::Bytes => {
            let len = cursor.take_len_prefix()?;
            Value::Array(cursor.take(len)?.iter().map(|&b| Value::from(b)).collect())
        }
        IdlType::Option(inner) => match cursor.take(1)?[0] {
            0 => Value::Null,
            1 => read_value(cursor, inner)?,
            other => {
                return Err(DecoderError::DecodeFailure(format!(
                    "invalid option tag: {}",
                    other
                )))
            }
        },
        IdlType::Vec(inner) => {
            let len = cursor.take_len_prefix()?;
            let mut items = Vec::with_capacity(len.min(1024));
            for _ in 0..len {
                items.push(read_value(cursor, inner)?);
            }
            Value::Array(items)
        }
    };
    Ok(value)
}
