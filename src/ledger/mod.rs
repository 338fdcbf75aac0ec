// Ledger module - the UTXO pool and the batch transaction handler

mod handler;
mod pool;

pub use handler::{HandlerError, TxHandler};
pub use pool::UtxoPool;
