//! Index-addressed views over a workflow snapshot.

mod index;
mod order;

pub use index::*;
pub use order::*;
