use crate::identity::{PublicKey, Signature};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content-derived transaction hash (SHA-256 of the full transaction,
/// signatures included).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Create a TxHash from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Identifier of a transaction output: the hash of the transaction that
/// created it plus the output's position within that transaction.
///
/// Equality and ordering are purely structural; this is the key type of the
/// UTXO pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoId {
    tx_hash: TxHash,
    index: u32,
}

impl UtxoId {
    /// Create a new output identifier
    pub fn new(tx_hash: TxHash, index: u32) -> Self {
        Self { tx_hash, index }
    }

    /// Hash of the transaction that created the output
    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    /// Position of the output within its transaction
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash, self.index)
    }
}

/// A transaction output: recipient identity plus value in minor units.
///
/// Value is signed so that a negative amount is representable and rejected
/// during validation rather than ruled out by the type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    recipient: PublicKey,
    value: i64,
}

impl TxOutput {
    /// Create a new output
    pub fn new(recipient: PublicKey, value: i64) -> Self {
        Self { recipient, value }
    }

    /// Get the recipient identity
    pub fn recipient(&self) -> &PublicKey {
        &self.recipient
    }

    /// Get the value in minor units
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A transaction input: the identifier of the output it consumes plus a
/// signature over this transaction's signable content for the input's
/// position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    utxo_id: UtxoId,
    signature: Signature,
}

impl TxInput {
    /// Create a new input
    pub fn new(utxo_id: UtxoId, signature: Signature) -> Self {
        Self { utxo_id, signature }
    }

    /// Get the identifier of the consumed output
    pub fn utxo_id(&self) -> &UtxoId {
        &self.utxo_id
    }

    /// Get the spend authorization signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// A transaction: a content-derived hash, an ordered input sequence, and an
/// ordered output sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    hash: TxHash,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Create a transaction, computing its hash from the given content
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let hash = Self::content_hash(&inputs, &outputs);
        Self {
            hash,
            inputs,
            outputs,
        }
    }

    /// Assemble a transaction from an externally computed hash and its
    /// content. The hash is taken as-is; `verify_hash` tells whether it
    /// actually matches the content.
    pub fn from_parts(hash: TxHash, inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            hash,
            inputs,
            outputs,
        }
    }

    /// Get the transaction hash
    pub fn hash(&self) -> &TxHash {
        &self.hash
    }

    /// Get the ordered input sequence
    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    /// Get the ordered output sequence
    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// Check that the stored hash matches the transaction content
    pub fn verify_hash(&self) -> bool {
        self.hash == Self::content_hash(&self.inputs, &self.outputs)
    }

    /// The canonical bytes a signature at `input_index` authorizes: that
    /// input's consumed output identifier plus every output of this
    /// transaction. Signatures over other inputs are not material.
    ///
    /// Panics if `input_index` is out of bounds.
    pub fn signable_bytes(&self, input_index: usize) -> Vec<u8> {
        Self::signable_content(self.inputs[input_index].utxo_id(), &self.outputs)
    }

    /// Signable content for a prospective input consuming `utxo_id` in a
    /// transaction with the given outputs. Deterministic encoding: outpoint
    /// hash, outpoint index, then each output's value and recipient, all
    /// little-endian and length-prefixed where variable.
    pub fn signable_content(utxo_id: &UtxoId, outputs: &[TxOutput]) -> Vec<u8> {
        let mut bytes = Vec::new();

        bytes.extend_from_slice(utxo_id.tx_hash().as_bytes());
        bytes.extend_from_slice(&utxo_id.index().to_le_bytes());

        bytes.extend_from_slice(&(outputs.len() as u32).to_le_bytes());
        for output in outputs {
            bytes.extend_from_slice(&output.value().to_le_bytes());
            bytes.extend_from_slice(output.recipient().as_bytes());
        }

        bytes
    }

    /// SHA-256 over the full transaction content, signatures included
    pub fn content_hash(inputs: &[TxInput], outputs: &[TxOutput]) -> TxHash {
        let mut hasher = Sha256::new();

        hasher.update((inputs.len() as u32).to_le_bytes());
        for input in inputs {
            hasher.update(input.utxo_id().tx_hash().as_bytes());
            hasher.update(input.utxo_id().index().to_le_bytes());
            hasher.update(input.signature().as_bytes());
        }

        hasher.update((outputs.len() as u32).to_le_bytes());
        for output in outputs {
            hasher.update(output.value().to_le_bytes());
            hasher.update(output.recipient().as_bytes());
        }

        let digest = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        TxHash(hash)
    }
}
