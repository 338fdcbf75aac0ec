// Identity module - Ed25519 keypairs, signatures, and the verify primitive

mod keypair;
mod signer;

pub use keypair::*;
pub use signer::*;
