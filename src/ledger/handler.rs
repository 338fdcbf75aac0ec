use crate::identity::Signer;
use crate::ledger::UtxoPool;
use crate::transaction::{Transaction, TxHash, UtxoId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors from transaction handling.
///
/// Ordinary rejection of a transaction is not an error: `is_valid` answers
/// `false` and `handle_batch` silently excludes. Errors are reserved for
/// inputs that violate the handler's preconditions.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Malformed transaction: stated hash {hash} does not match content")]
    MalformedTransaction { hash: TxHash },
}

/// The transaction validator and batch processor.
///
/// Owns one UTXO pool for its lifetime, constructed as a deep copy of the
/// caller's pool. Each accepted transaction mutates that pool; rejected
/// transactions leave it untouched.
pub struct TxHandler {
    pool: UtxoPool,
}

impl TxHandler {
    /// Create a handler over a copy of `pool`. The caller's pool is never
    /// aliased; later mutations on either side are invisible to the other.
    pub fn new(pool: &UtxoPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Get the current pool state
    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Check whether `tx` is valid against the current pool state.
    ///
    /// Valid means: every input consumes an output currently in the pool,
    /// every input's signature authorizes this transaction under the
    /// consumed output's recipient, no output is claimed twice within the
    /// transaction, no output value is negative, and the input total covers
    /// the output total (any surplus is an implicit fee).
    ///
    /// Pure predicate: the pool is not mutated. A transaction whose stated
    /// hash does not match its content is malformed, which is a
    /// precondition failure rather than a rejection.
    pub fn is_valid(&self, tx: &Transaction) -> Result<bool, HandlerError> {
        self.check_well_formed(tx)?;
        Ok(self.is_spendable(tx))
    }

    /// Process one epoch of candidate transactions.
    ///
    /// Candidates are considered in slice order. Each one is re-evaluated
    /// against the current, already-mutated pool state; if valid it is
    /// accepted and its effect applied immediately (consumed outputs
    /// removed, created outputs inserted under this transaction's hash),
    /// so a later candidate may spend an earlier candidate's output within
    /// the same batch. Invalid candidates are skipped permanently for this
    /// batch and never retried. The policy is deliberately greedy and
    /// order-dependent; it does not search for a maximal accepted subset.
    ///
    /// Structurally identical candidates collapse to one logical
    /// transaction. The accepted transactions are returned in
    /// first-accepted order.
    ///
    /// If any candidate is malformed the whole batch errors before the
    /// pool is touched, so a failed call never leaves a partial update.
    pub fn handle_batch(
        &mut self,
        candidates: &[Transaction],
    ) -> Result<Vec<Transaction>, HandlerError> {
        for tx in candidates {
            self.check_well_formed(tx)?;
        }

        let mut accepted = Vec::new();
        let mut accepted_hashes: HashSet<TxHash> = HashSet::new();

        for tx in candidates {
            if accepted_hashes.contains(tx.hash()) {
                trace!(tx = %tx.hash(), "duplicate candidate, already accepted");
                continue;
            }
            if !self.is_spendable(tx) {
                trace!(tx = %tx.hash(), "rejected candidate");
                continue;
            }

            self.apply(tx);
            debug!(tx = %tx.hash(), "accepted transaction");
            accepted_hashes.insert(*tx.hash());
            accepted.push(tx.clone());
        }

        debug!(
            candidates = candidates.len(),
            accepted = accepted.len(),
            pool_size = self.pool.len(),
            "processed batch"
        );
        Ok(accepted)
    }

    fn check_well_formed(&self, tx: &Transaction) -> Result<(), HandlerError> {
        if tx.verify_hash() {
            Ok(())
        } else {
            Err(HandlerError::MalformedTransaction { hash: *tx.hash() })
        }
    }

    /// The validity predicate proper, against the current pool state.
    fn is_spendable(&self, tx: &Transaction) -> bool {
        // Claim tracking is scoped to this single transaction; batch-level
        // conflicts are handled by the pool mutating between candidates.
        let mut claimed: HashSet<&UtxoId> = HashSet::new();
        let mut input_total: i128 = 0;

        for (index, input) in tx.inputs().iter().enumerate() {
            let output = match self.pool.get(input.utxo_id()) {
                Some(output) => output,
                None => return false,
            };
            let message = tx.signable_bytes(index);
            if !Signer::verify(output.recipient(), &message, input.signature()) {
                return false;
            }
            if !claimed.insert(input.utxo_id()) {
                return false;
            }
            input_total += i128::from(output.value());
        }

        let mut output_total: i128 = 0;
        for output in tx.outputs() {
            if output.value() < 0 {
                return false;
            }
            output_total += i128::from(output.value());
        }

        output_total <= input_total
    }

    /// Apply an accepted transaction: remove every consumed output, then
    /// insert every created output keyed by this transaction's hash.
    fn apply(&mut self, tx: &Transaction) {
        for input in tx.inputs() {
            self.pool.remove(input.utxo_id());
        }
        for (index, output) in tx.outputs().iter().enumerate() {
            self.pool
                .insert(UtxoId::new(*tx.hash(), index as u32), output.clone());
        }
    }
}
