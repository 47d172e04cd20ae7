//! Batches, data streams and evaluation scopes

mod batch;
mod stream;

pub use batch::{Batch, Scope};
pub use stream::{DataStream, InMemoryDataStream};
