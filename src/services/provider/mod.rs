//! Ledger-query boundary.
//!
//! Thin wrapper over the non-blocking Solana `RpcClient`: waits for a
//! transaction to reach confirmed finality, fetches it with jsonParsed
//! encoding, and converts the RPC record into the crate's
//! [`ParsedTransactionRecord`]. The opaque-vs-pre-parsed distinction is
//! decided here, once per instruction, never re-checked downstream.
//!
//! The confirmation wait is the crate's one suspension point: the status
//! is polled at confirmed commitment until it flips or the wait deadline
//! passes. The fetch itself is never retried and nothing is cached;
//! failures propagate to the caller unchanged.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcTransactionConfig};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature};
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiInstruction, UiMessage,
    UiParsedInstruction, UiTransactionEncoding,
};
use thiserror::Error;

use crate::models::{
    OpaqueInstruction, ParsedTransactionRecord, PreParsedInstruction, RawInstruction,
};
use crate::utils::poll_until;

/// Interval between confirmation status polls.
const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default ceiling on the confirmation wait.
const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the ledger-query service.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport or RPC-level failure while confirming or fetching.
    #[error("RPC error: {0}")]
    RpcError(String),

    /// The transaction did not reach confirmed finality within the wait
    /// deadline; it may still be propagating or may not exist at all.
    #[error("timed out waiting for confirmation of {0}")]
    ConfirmationTimeout(Signature),

    /// The RPC response did not use the requested jsonParsed encoding, or
    /// carried a field this crate cannot interpret.
    #[error("unsupported transaction encoding: {0}")]
    UnsupportedEncoding(String),
}

/// Fetches confirmed transactions as parsed records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionFetcherTrait: Send + Sync {
    /// Waits for the transaction to reach confirmed finality, then returns
    /// its full parsed record with instructions in original order.
    async fn fetch_transaction(
        &self,
        signature: &Signature,
    ) -> Result<ParsedTransactionRecord, ProviderError>;
}

/// `RpcClient`-backed implementation of [`TransactionFetcherTrait`].
pub struct TransactionFetcher {
    client: RpcClient,
    confirmation_timeout: Duration,
}

impl TransactionFetcher {
    pub fn new(url: impl ToString) -> Self {
        Self::from_client(RpcClient::new_with_commitment(
            url.to_string(),
            CommitmentConfig::confirmed(),
        ))
    }

    pub fn new_with_timeout(url: impl ToString, confirmation_timeout: Duration) -> Self {
        Self {
            confirmation_timeout,
            ..Self::new(url)
        }
    }

    pub fn from_client(client: RpcClient) -> Self {
        Self {
            client,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }
}

#[async_trait]
impl TransactionFetcherTrait for TransactionFetcher {
    async fn fetch_transaction(
        &self,
        signature: &Signature,
    ) -> Result<ParsedTransactionRecord, ProviderError> {
        // confirm_transaction is a one-shot status check; poll it until the
        // transaction reaches confirmed finality or the deadline passes.
        let confirmed = poll_until(
            || async {
                self.client
                    .confirm_transaction(signature)
                    .await
                    .map_err(|e| ProviderError::RpcError(e.to_string()))
            },
            self.confirmation_timeout,
            CONFIRMATION_POLL_INTERVAL,
            "transaction confirmation",
        )
        .await?;
        if !confirmed {
            return Err(ProviderError::ConfirmationTimeout(*signature));
        }

        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::JsonParsed),
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
        };
        let response = self
            .client
            .get_transaction_with_config(signature, config)
            .await
            .map_err(|e| ProviderError::RpcError(e.to_string()))?;

        debug!("fetched transaction {} at slot {}", signature, response.slot);
        into_record(*signature, response)
    }
}

/// Converts the RPC transaction record into the crate's record type,
/// classifying each instruction as opaque or pre-parsed.
fn into_record(
    signature: Signature,
    response: EncodedConfirmedTransactionWithStatusMeta,
) -> Result<ParsedTransactionRecord, ProviderError> {
    let transaction = match response.transaction.transaction {
        EncodedTransaction::Json(transaction) => transaction,
        _ => {
            return Err(ProviderError::UnsupportedEncoding(
                "expected jsonParsed transaction encoding".to_string(),
            ))
        }
    };
    let message = match transaction.message {
        UiMessage::Parsed(message) => message,
        UiMessage::Raw(_) => {
            return Err(ProviderError::UnsupportedEncoding(
                "expected jsonParsed message".to_string(),
            ))
        }
    };

    let instructions = message
        .instructions
        .iter()
        .map(into_raw_instruction)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedTransactionRecord {
        signature,
        instructions,
    })
}

fn into_raw_instruction(instruction: &UiInstruction) -> Result<RawInstruction, ProviderError> {
    match instruction {
        UiInstruction::Parsed(UiParsedInstruction::PartiallyDecoded(decoded)) => {
            let accounts = decoded
                .accounts
                .iter()
                .map(|account| parse_pubkey(account))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RawInstruction::Opaque(OpaqueInstruction {
                program_id: parse_pubkey(&decoded.program_id)?,
                accounts,
                data: decoded.data.clone(),
            }))
        }
        UiInstruction::Parsed(UiParsedInstruction::Parsed(parsed)) => {
            let instruction_type = parsed
                .parsed
                .get("type")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ProviderError::UnsupportedEncoding(
                        "pre-parsed instruction without a type tag".to_string(),
                    )
                })?
                .to_string();
            let info = parsed.parsed.get("info").cloned().unwrap_or(Value::Null);
            Ok(RawInstruction::Parsed(PreParsedInstruction {
                program: parsed.program.clone(),
                instruction_type,
                info,
            }))
        }
        UiInstruction::Compiled(_) => Err(ProviderError::UnsupportedEncoding(
            "compiled instructions are not produced by jsonParsed encoding".to_string(),
        )),
    }
}

fn parse_pubkey(raw: &str) -> Result<Pubkey, ProviderError> {
    Pubkey::from_str(raw)
        .map_err(|e| ProviderError::UnsupportedEncoding(format!("invalid pubkey '{}': {}", raw, e)))
}
