pub mod bounds;
pub mod crs;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use crs::*;
pub use time::*;
