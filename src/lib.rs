// utxo-ledger - Minimal UTXO ledger core
//
// The crate implements the state-transition function of a minimal ledger:
// a pool of unspent transaction outputs plus a batch of proposed
// transactions in, the mutually-consistent accepted subset and the updated
// pool out. Signature checks use Ed25519, hashing is SHA-256.

pub mod identity;
pub mod ledger;
pub mod transaction;
