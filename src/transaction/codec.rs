use crate::transaction::Transaction;
use thiserror::Error;

/// Errors that can occur during encoding/decoding
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to decode transaction: {0}")]
    DecodeError(String),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),
}

/// Codec for moving transactions in and out of the core.
///
/// Binary form is postcard; the hex form is a convenience for hosts that
/// carry transactions through text channels. No wire protocol is implied.
pub struct TransactionCodec;

impl TransactionCodec {
    /// Encode a transaction to binary bytes
    pub fn encode(tx: &Transaction) -> Vec<u8> {
        postcard::to_allocvec(tx).expect("Failed to encode transaction")
    }

    /// Decode a transaction from binary bytes
    pub fn decode(bytes: &[u8]) -> Result<Transaction, CodecError> {
        postcard::from_bytes(bytes).map_err(|e| CodecError::DecodeError(e.to_string()))
    }

    /// Encode a batch of candidate transactions to binary bytes
    pub fn encode_batch(txs: &[Transaction]) -> Vec<u8> {
        postcard::to_allocvec(txs).expect("Failed to encode transaction batch")
    }

    /// Decode a batch of candidate transactions from binary bytes
    pub fn decode_batch(bytes: &[u8]) -> Result<Vec<Transaction>, CodecError> {
        postcard::from_bytes(bytes).map_err(|e| CodecError::DecodeError(e.to_string()))
    }

    /// Encode to hex string
    pub fn encode_hex(tx: &Transaction) -> String {
        hex::encode(Self::encode(tx))
    }

    /// Decode from hex string
    pub fn decode_hex(hex_str: &str) -> Result<Transaction, CodecError> {
        let bytes = hex::decode(hex_str).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        Self::decode(&bytes)
    }
}
