use crate::transaction::{TxOutput, UtxoId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The pool of currently unspent transaction outputs.
///
/// Every key present maps to an output that has been created by some
/// transaction and not yet consumed by any transaction applied to this
/// pool. `Clone` is a deep copy: the clone shares no mutable state with
/// the original.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, TxOutput>,
}

impl UtxoPool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    /// Check if an output is in the pool
    pub fn contains(&self, utxo_id: &UtxoId) -> bool {
        self.utxos.contains_key(utxo_id)
    }

    /// Get an output by its identifier
    pub fn get(&self, utxo_id: &UtxoId) -> Option<&TxOutput> {
        self.utxos.get(utxo_id)
    }

    /// Add an output to the pool, overwriting any existing mapping
    pub fn insert(&mut self, utxo_id: UtxoId, output: TxOutput) {
        self.utxos.insert(utxo_id, output);
    }

    /// Remove an output from the pool; no-op if absent
    pub fn remove(&mut self, utxo_id: &UtxoId) -> Option<TxOutput> {
        self.utxos.remove(utxo_id)
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Get the number of unspent outputs
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// Get the total value held in the pool
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| i128::from(o.value())).sum()
    }

    /// Iterate over all unspent outputs, in no meaningful order
    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &TxOutput)> {
        self.utxos.iter()
    }

    /// Get all output identifiers currently in the pool
    pub fn utxo_ids(&self) -> Vec<&UtxoId> {
        self.utxos.keys().collect()
    }
}
