pub mod conversion;
pub mod definition;
pub mod node_data;
pub mod snapshot;

pub use conversion::*;
pub use definition::*;
pub use node_data::*;
pub use snapshot::*;
