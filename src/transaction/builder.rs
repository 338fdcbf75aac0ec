use crate::identity::{Keypair, PublicKey, Signer};
use crate::transaction::{Transaction, TxInput, TxOutput, UtxoId};
use thiserror::Error;

/// Errors that can occur when building a transaction
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid output value: {0} is negative")]
    NegativeOutput(i64),
}

/// Builder for creating signed transactions.
///
/// Each consumed output is registered together with the keypair authorized
/// to spend it; `build` signs every input over the transaction's signable
/// content for that input's position and computes the final hash.
pub struct TransactionBuilder<'a> {
    spends: Vec<(UtxoId, &'a Keypair)>,
    outputs: Vec<TxOutput>,
}

impl<'a> TransactionBuilder<'a> {
    /// Create a new TransactionBuilder
    pub fn new() -> Self {
        Self {
            spends: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Consume the output identified by `utxo_id`, authorized by `keypair`
    pub fn spend(mut self, utxo_id: UtxoId, keypair: &'a Keypair) -> Self {
        self.spends.push((utxo_id, keypair));
        self
    }

    /// Add an output paying `value` minor units to `recipient`
    pub fn pay(mut self, recipient: PublicKey, value: i64) -> Self {
        self.outputs.push(TxOutput::new(recipient, value));
        self
    }

    /// Sign all inputs and build the transaction
    pub fn build(self) -> Result<Transaction, TransactionError> {
        for output in &self.outputs {
            if output.value() < 0 {
                return Err(TransactionError::NegativeOutput(output.value()));
            }
        }

        let inputs = self
            .spends
            .iter()
            .map(|&(utxo_id, keypair)| {
                let message = Transaction::signable_content(&utxo_id, &self.outputs);
                TxInput::new(utxo_id, Signer::sign(keypair, &message))
            })
            .collect();

        Ok(Transaction::new(inputs, self.outputs))
    }
}

impl<'a> Default for TransactionBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}
