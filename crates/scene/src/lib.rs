pub mod framing;
pub mod node;
pub mod selection;
pub mod snapshot;

pub use framing::*;
pub use node::*;
pub use selection::*;
pub use snapshot::*;
