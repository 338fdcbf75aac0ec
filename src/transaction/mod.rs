// Transaction module - inputs, outputs, hashing, and per-input signable content

mod builder;
mod codec;
mod model;

pub use builder::*;
pub use codec::*;
pub use model::*;
